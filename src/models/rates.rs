// ============================================================================
// Structures : RatesSnapshot / RateCard
// ============================================================================
// Panneau des taux populaires : un instantané des taux pour une devise de
// base, transformé en au plus 8 cartes.
// ============================================================================

use std::collections::HashMap;

use tracing::warn;

use crate::models::currency::{Currency, CURRENCIES};

/// Nombre maximum de cartes dans le panneau des taux populaires
pub const POPULAR_CARD_COUNT: usize = 8;

/// Message unique affiché quand le chargement des taux échoue
pub const RATES_UNAVAILABLE_MESSAGE: &str = "Unable to load currency rates. Please try again later.";

/// Taux renvoyés par /api/rates pour une devise de base
#[derive(Debug, Clone, PartialEq)]
pub struct RatesSnapshot {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RatesSnapshot {
    pub fn new(base: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base: base.into(),
            rates,
        }
    }

    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

/// Une carte du panneau des taux populaires
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub currency: Currency,
    pub rate: f64,
}

impl RateCard {
    /// Valeur principale : "€0.92"
    pub fn headline(&self) -> String {
        format!("{}{:.2}", self.currency.symbol, self.rate)
    }

    /// Détail : "1 USD = €0.9210"
    pub fn detail(&self, base: &str) -> String {
        format!("1 {} = {}{:.4}", base, self.currency.symbol, self.rate)
    }
}

/// Construit les cartes des taux populaires
///
/// On prend les 8 premières devises de la table (hors base) PUIS on saute
/// celles absentes de l'instantané : une devise manquante donne donc 7
/// cartes, pas une carte de remplacement prise plus loin dans la table.
pub fn build_rate_cards(snapshot: &RatesSnapshot) -> Vec<RateCard> {
    CURRENCIES
        .iter()
        .filter(|c| c.code != snapshot.base)
        .take(POPULAR_CARD_COUNT)
        .filter_map(|currency| match snapshot.rate_for(currency.code) {
            Some(rate) => Some(RateCard {
                currency: *currency,
                rate,
            }),
            None => {
                warn!(base = %snapshot.base, code = %currency.code, "Rate not available, skipping card");
                None
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot(base: &str) -> RatesSnapshot {
        let rates = CURRENCIES
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.to_string(), 1.0 + i as f64))
            .collect();
        RatesSnapshot::new(base, rates)
    }

    #[test]
    fn test_cards_exclude_base_and_keep_table_order() {
        let cards = build_rate_cards(&full_snapshot("USD"));
        let codes: Vec<&str> = cards.iter().map(|c| c.currency.code).collect();

        assert_eq!(
            codes,
            vec!["EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY", "INR"]
        );
    }

    #[test]
    fn test_missing_rate_yields_seven_cards() {
        let mut snapshot = full_snapshot("EUR");
        snapshot.rates.remove("JPY");

        let cards = build_rate_cards(&snapshot);
        let codes: Vec<&str> = cards.iter().map(|c| c.currency.code).collect();

        assert_eq!(codes, vec!["USD", "GBP", "AUD", "CAD", "CHF", "CNY", "INR"]);
    }

    #[test]
    fn test_empty_snapshot_yields_no_cards() {
        let snapshot = RatesSnapshot::new("USD", HashMap::new());
        assert!(build_rate_cards(&snapshot).is_empty());
    }

    #[test]
    fn test_card_formatting() {
        let card = RateCard {
            currency: CURRENCIES[1],
            rate: 0.92104,
        };
        assert_eq!(card.headline(), "€0.92");
        assert_eq!(card.detail("USD"), "1 USD = €0.9210");
    }
}
