// ============================================================================
// Module : api
// ============================================================================
// Ce module contient le client de l'API de conversion (serveur externe qui
// expose /api/convert, /api/rates et /api/history).
//
// CONCEPT RUST : async_trait
// - Les méthodes async dans un trait objet (dyn RatesApi) nécessitent
//   la macro async_trait (Box<dyn Future> sous le capot)
// - Permet d'injecter un faux client dans les tests du worker
// ============================================================================

use async_trait::async_trait;

use crate::error::FxError;
use crate::models::{ConversionRequest, ConversionResult, CurrencyPair, RateHistory, RatesSnapshot};

pub mod client; // Client HTTP (reqwest)

// Re-export du client principal
pub use client::HttpRatesClient;

/// Les trois lectures dont la page a besoin
#[async_trait]
pub trait RatesApi: Send + Sync {
    /// GET /api/convert?from&to&amount
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, FxError>;

    /// GET /api/rates?base
    async fn rates(&self, base: &str) -> Result<RatesSnapshot, FxError>;

    /// GET /api/history?base&target&days
    async fn history(&self, pair: &CurrencyPair, days: u32) -> Result<RateHistory, FxError>;
}
