// ============================================================================
// API Client : serveur de conversion
// ============================================================================
// Interroge le serveur de conversion (qui lui-même relaie ExchangeRate-API)
//
// CONCEPTS RUST AVANCÉS :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Result<T, FxError> : erreurs typées, affichables telles quelles
// 3. serde_json::Value : lecture défensive d'un JSON dont la forme varie
//    (succès ou {"error": ...} sur la même route)
// ============================================================================

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::error::FxError;
use crate::models::{
    ConversionRequest, ConversionResult, CurrencyPair, HistoryPoint, RateHistory, RatesSnapshot,
};

use super::RatesApi;

/// Client HTTP de l'API de conversion
#[derive(Debug, Clone)]
pub struct HttpRatesClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRatesClient {
    /// Crée un client pour un serveur donné (ex: "http://127.0.0.1:5000")
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lazyfx/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Envoie un GET et retourne le corps brut
    ///
    /// Un statut hors 2xx est une erreur de transport, quel que soit le
    /// corps : le détail éventuel ne va que dans le log.
    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<String, FxError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "Sending HTTP request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "HTTP request failed");
                FxError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Server returned error status");
            return Err(FxError::bad_status());
        }

        response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            FxError::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl RatesApi for HttpRatesClient {
    #[instrument(skip(self, request), fields(from = %request.pair.from, to = %request.pair.to, amount = request.amount))]
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, FxError> {
        let query = [
            ("from", request.pair.from.clone()),
            ("to", request.pair.to.clone()),
            ("amount", request.amount.to_string()),
        ];
        let body = self.get_body("/api/convert", &query).await?;
        let result = parse_convert_body(&body)?;

        info!(result = result.result, rate = result.rate, "Conversion fetched");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn rates(&self, base: &str) -> Result<RatesSnapshot, FxError> {
        let body = self.get_body("/api/rates", &[("base", base.to_string())]).await?;
        let snapshot = parse_rates_body(base, &body)?;

        info!(count = snapshot.rates.len(), "Rates snapshot fetched");
        Ok(snapshot)
    }

    #[instrument(skip(self, pair), fields(pair = %pair.label()))]
    async fn history(&self, pair: &CurrencyPair, days: u32) -> Result<RateHistory, FxError> {
        let query = [
            ("base", pair.from.clone()),
            ("target", pair.to.clone()),
            ("days", days.to_string()),
        ];
        let body = self.get_body("/api/history", &query).await?;
        let history = parse_history_body(pair, &body)?;

        info!(points = history.len(), "Rate history fetched");
        Ok(history)
    }
}

// ============================================================================
// Parsing des réponses
// ============================================================================
// Fonctions pures (pas d'I/O) : testables sans serveur.
// ============================================================================

fn parse_json(body: &str) -> Result<Value, FxError> {
    serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "Response is not valid JSON");
        FxError::malformed()
    })
}

/// Message du champ `error`, s'il est renseigné
///
/// Les valeurs "fausses" (null, false, 0, chaîne vide) ne comptent pas
/// comme une erreur.
fn api_error(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse la réponse de /api/convert
pub fn parse_convert_body(body: &str) -> Result<ConversionResult, FxError> {
    let data = parse_json(body)?;

    if let Some(message) = api_error(&data) {
        warn!(error = %message, "Conversion rejected by server");
        return Err(FxError::Api(message));
    }

    let result = data.get("conversion_result").and_then(Value::as_f64);
    let rate = data.get("conversion_rate").and_then(Value::as_f64);

    match (result, rate) {
        (Some(result), Some(rate)) => Ok(ConversionResult::new(result, rate)),
        _ => {
            error!(body = %body, "Conversion response missing numeric fields");
            Err(FxError::malformed())
        }
    }
}

/// Parse la réponse de /api/rates
///
/// `rates` doit être un objet JSON ; les valeurs non numériques sont
/// traitées comme absentes.
pub fn parse_rates_body(base: &str, body: &str) -> Result<RatesSnapshot, FxError> {
    let data = parse_json(body)?;

    if let Some(message) = api_error(&data) {
        warn!(error = %message, "Rates rejected by server");
        return Err(FxError::Api(message));
    }

    let Some(entries) = data.get("rates").and_then(Value::as_object) else {
        error!(body = %body, "API response missing rates property");
        return Err(FxError::malformed());
    };

    let rates: HashMap<String, f64> = entries
        .iter()
        .filter_map(|(code, value)| match value.as_f64() {
            Some(rate) => Some((code.clone(), rate)),
            None => {
                warn!(code = %code, value = %value, "Ignoring non-numeric rate");
                None
            }
        })
        .collect();

    Ok(RatesSnapshot::new(base, rates))
}

/// Parse la réponse de /api/history : [{"date": "YYYY-MM-DD", "rate": n}]
pub fn parse_history_body(pair: &CurrencyPair, body: &str) -> Result<RateHistory, FxError> {
    let data = parse_json(body)?;

    if let Some(message) = api_error(&data) {
        warn!(error = %message, "History rejected by server");
        return Err(FxError::Api(message));
    }

    let Some(items) = data.as_array() else {
        error!(body = %body, "History response is not a list");
        return Err(FxError::malformed());
    };

    let mut skipped = 0;
    let points: Vec<HistoryPoint> = items
        .iter()
        .filter_map(|item| {
            let date = item
                .get("date")
                .and_then(Value::as_str)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            let rate = item.get("rate").and_then(Value::as_f64);

            match (date, rate) {
                (Some(date), Some(rate)) => Some(HistoryPoint { date, rate }),
                _ => {
                    skipped += 1;
                    None
                }
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, total = items.len(), "Skipped malformed history points");
    }

    Ok(RateHistory::new(pair.clone(), points))
}

// ============================================================================
// Tests unitaires
// ============================================================================
