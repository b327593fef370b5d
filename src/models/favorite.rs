// ============================================================================
// Structure : Favorite
// ============================================================================
// Paire de devises sauvegardée par l'utilisateur pour la resélectionner vite
//
// FORMAT PERSISTÉ (clé "favorites") :
//   {"version": 1, "favorites": [{"fromCurrency": "USD", "toCurrency": "EUR"}]}
//
// Les anciennes données (tableau JSON nu, sans version) sont relues telles
// quelles puis réécrites au format versionné à la prochaine sauvegarde.
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::conversion::CurrencyPair;

/// Version courante du format persisté
pub const FAVORITES_SCHEMA_VERSION: u32 = 1;

/// Une paire favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")] // from_currency <-> "fromCurrency"
pub struct Favorite {
    pub from_currency: String,
    pub to_currency: String,
}

impl Favorite {
    pub fn new(from_currency: impl Into<String>, to_currency: impl Into<String>) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from_currency.clone(), self.to_currency.clone())
    }

    /// Identité d'un favori = sa paire
    pub fn matches(&self, pair: &CurrencyPair) -> bool {
        self.from_currency == pair.from && self.to_currency == pair.to
    }

    /// Ligne affichée dans la liste : "USD to EUR"
    pub fn display(&self) -> String {
        format!("{} to {}", self.from_currency, self.to_currency)
    }
}

impl From<&CurrencyPair> for Favorite {
    fn from(pair: &CurrencyPair) -> Self {
        Self::new(pair.from.clone(), pair.to.clone())
    }
}

/// Document persisté sous la clé "favorites"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesDocument {
    pub version: u32,
    pub favorites: Vec<Favorite>,
}

impl FavoritesDocument {
    pub fn new(favorites: Vec<Favorite>) -> Self {
        Self {
            version: FAVORITES_SCHEMA_VERSION,
            favorites,
        }
    }
}

/// Formes acceptées à la lecture
///
/// CONCEPT RUST : #[serde(untagged)]
/// - Serde essaie chaque variante dans l'ordre
/// - Permet de relire l'ancien format sans champ de version
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoredFavorites {
    Versioned(FavoritesDocument),
    Legacy(Vec<Favorite>),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_serializes_camel_case() {
        let doc = FavoritesDocument::new(vec![Favorite::new("USD", "EUR")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"version":1,"favorites":[{"fromCurrency":"USD","toCurrency":"EUR"}]}"#
        );
    }

    #[test]
    fn test_legacy_array_is_accepted() {
        let raw = r#"[{"fromCurrency":"GBP","toCurrency":"JPY"}]"#;
        let stored: StoredFavorites = serde_json::from_str(raw).unwrap();
        match stored {
            StoredFavorites::Legacy(list) => assert_eq!(list, vec![Favorite::new("GBP", "JPY")]),
            other => panic!("expected legacy format, got {:?}", other),
        }
    }

    #[test]
    fn test_matches_pair_identity() {
        let favorite = Favorite::new("USD", "EUR");
        assert!(favorite.matches(&CurrencyPair::new("USD", "EUR")));
        assert!(!favorite.matches(&CurrencyPair::new("EUR", "USD")));
        assert_eq!(favorite.display(), "USD to EUR");
    }
}
