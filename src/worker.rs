// ============================================================================
// Worker : exécution des requêtes réseau en arrière-plan
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - La boucle UI envoie des AppCommand au worker
// - Le worker exécute chaque commande dans une tâche tokio indépendante
// - Les résultats reviennent en AppResult via un autre channel
//
// Chaque commande porte un jeton (RequestToken) émis par App : deux
// requêtes du même type peuvent se croiser, App ne garde que la réponse
// au jeton le plus récent.
// ============================================================================

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::api::RatesApi;
use crate::error::FxError;
use crate::models::{ConversionRequest, ConversionResult, CurrencyPair, RateHistory, RatesSnapshot};

/// Identifiant croissant d'une requête, par type de requête
pub type RequestToken = u64;

/// Commandes envoyées au worker
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// GET /api/convert
    Convert {
        token: RequestToken,
        request: ConversionRequest,
    },

    /// GET /api/rates pour le panneau des taux populaires
    LoadRates { token: RequestToken, base: String },

    /// GET /api/history pour la vue graphique
    LoadHistory {
        token: RequestToken,
        pair: CurrencyPair,
        days: u32,
    },
}

/// Résultats renvoyés par le worker
#[derive(Debug, Clone, PartialEq)]
pub enum AppResult {
    Converted {
        token: RequestToken,
        request: ConversionRequest,
        outcome: Result<ConversionResult, FxError>,
    },

    RatesLoaded {
        token: RequestToken,
        base: String,
        outcome: Result<RatesSnapshot, FxError>,
    },

    HistoryLoaded {
        token: RequestToken,
        pair: CurrencyPair,
        outcome: Result<RateHistory, FxError>,
    },
}

/// Exécute une commande contre l'API
///
/// Ne peut pas échouer : l'erreur fait partie du résultat renvoyé à l'UI.
pub async fn execute(api: &dyn RatesApi, command: AppCommand) -> AppResult {
    match command {
        AppCommand::Convert { token, request } => {
            let outcome = api.convert(&request).await;
            AppResult::Converted {
                token,
                request,
                outcome,
            }
        }
        AppCommand::LoadRates { token, base } => {
            let outcome = api.rates(&base).await;
            AppResult::RatesLoaded {
                token,
                base,
                outcome,
            }
        }
        AppCommand::LoadHistory { token, pair, days } => {
            let outcome = api.history(&pair, days).await;
            AppResult::HistoryLoaded {
                token,
                pair,
                outcome,
            }
        }
    }
}

/// Lance le thread worker
///
/// CONCEPT RUST : Thread + async runtime
/// - std::thread : thread OS dédié, la boucle UI reste synchrone
/// - tokio::runtime::Runtime : créé ici (l'erreur remonte à l'appelant)
///   puis déplacé dans le thread
/// - runtime.spawn() : une tâche par commande, sans annulation
///
/// Le thread s'arrête quand tous les Sender de commandes sont détruits.
pub fn spawn_background_worker(
    api: Arc<dyn RatesApi>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    std::thread::Builder::new()
        .name("lazyfx-worker".to_string())
        .spawn(move || {
            while let Ok(command) = command_rx.recv() {
                debug!(?command, "Worker received command");

                let api = Arc::clone(&api);
                let result_tx = result_tx.clone();
                runtime.spawn(async move {
                    let result = execute(api.as_ref(), command).await;
                    if result_tx.send(result).is_err() {
                        warn!("Result channel closed, dropping result");
                    }
                });
            }
            info!("Worker thread exiting (channel closed)");
        })
        .map_err(|e| {
            error!(error = %e, "Failed to spawn worker thread");
            e
        })
        .context("Échec du lancement du thread worker")
}

/// Côté UI du channel des résultats
///
/// `drain` ne bloque jamais. Une fois le worker perdu, l'erreur est loggée
/// une seule fois puis le channel n'est plus interrogé.
pub struct ResultInbox {
    rx: mpsc::Receiver<AppResult>,
    connected: bool,
}

impl ResultInbox {
    pub fn new(rx: mpsc::Receiver<AppResult>) -> Self {
        Self { rx, connected: true }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Récupère tous les résultats déjà arrivés
    pub fn drain(&mut self) -> Vec<AppResult> {
        let mut results = Vec::new();
        while self.connected {
            match self.rx.try_recv() {
                Ok(result) => results.push(result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected, results will no longer arrive");
                    self.connected = false;
                }
            }
        }
        results
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    /// Faux client : répond immédiatement, compte les appels
    #[derive(Default)]
    struct FakeApi {
        convert_calls: AtomicUsize,
        rates_calls: AtomicUsize,
        history_calls: AtomicUsize,
    }

    #[async_trait]
    impl RatesApi for FakeApi {
        async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, FxError> {
            self.convert_calls.fetch_add(1, Ordering::SeqCst);
            if request.pair.to == "XXX" {
                return Err(FxError::Api("Unsupported currency".to_string()));
            }
            Ok(ConversionResult::new(request.amount * 0.88, 0.88))
        }

        async fn rates(&self, base: &str) -> Result<RatesSnapshot, FxError> {
            self.rates_calls.fetch_add(1, Ordering::SeqCst);
            let rates = HashMap::from([("EUR".to_string(), 0.92)]);
            Ok(RatesSnapshot::new(base, rates))
        }

        async fn history(&self, pair: &CurrencyPair, _days: u32) -> Result<RateHistory, FxError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RateHistory::new(pair.clone(), Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_execute_routes_each_command() {
        let api = FakeApi::default();
        let request =
            ConversionRequest::from_form("100", CurrencyPair::new("USD", "EUR")).unwrap();

        let result = execute(&api, AppCommand::Convert { token: 3, request }).await;
        match result {
            AppResult::Converted { token, outcome, .. } => {
                assert_eq!(token, 3);
                assert_eq!(outcome.unwrap().rate, 0.88);
            }
            other => panic!("unexpected result {:?}", other),
        }

        let result = execute(
            &api,
            AppCommand::LoadRates {
                token: 1,
                base: "USD".to_string(),
            },
        )
        .await;
        assert!(matches!(result, AppResult::RatesLoaded { token: 1, .. }));

        assert_eq!(api.convert_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.rates_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_inbox_drains_then_stops_after_disconnect() {
        let (result_tx, result_rx) = mpsc::channel();
        let mut inbox = ResultInbox::new(result_rx);

        assert!(inbox.drain().is_empty());
        assert!(inbox.is_connected());

        for token in [1, 2] {
            result_tx
                .send(AppResult::RatesLoaded {
                    token,
                    base: "USD".to_string(),
                    outcome: Err(FxError::malformed()),
                })
                .unwrap();
        }
        drop(result_tx);

        // Les résultats envoyés avant la fermeture arrivent quand même
        assert_eq!(inbox.drain().len(), 2);
        assert!(!inbox.is_connected());
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn test_background_worker_round_trip() {
        let api = Arc::new(FakeApi::default());
        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = spawn_background_worker(api.clone(), command_rx, result_tx).unwrap();

        command_tx
            .send(AppCommand::LoadHistory {
                token: 7,
                pair: CurrencyPair::new("EUR", "USD"),
                days: 7,
            })
            .unwrap();

        let result = result_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        match result {
            AppResult::HistoryLoaded { token, pair, outcome } => {
                assert_eq!(token, 7);
                assert_eq!(pair, CurrencyPair::new("EUR", "USD"));
                assert!(outcome.unwrap().is_empty());
            }
            other => panic!("unexpected result {:?}", other),
        }

        drop(command_tx);
        handle.join().unwrap();
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 1);
    }
}
