// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod currency;   // Table statique des 20 devises
pub mod conversion; // Requête/résultat de conversion
pub mod rates;      // Taux populaires
pub mod history;    // Historique des taux (vue graphique)
pub mod favorite;   // Paires favorites persistées
pub mod theme;      // Thème clair/sombre

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazyfx::models::currency::Currency;
// On peut faire : use lazyfx::models::Currency;
pub use currency::{find_currency, Currency, CURRENCIES};
pub use conversion::{ConversionDisplay, ConversionRequest, ConversionResult, CurrencyPair};
pub use favorite::{Favorite, FavoritesDocument};
pub use history::{HistoryPoint, HistoryWindow, RateHistory};
pub use rates::{build_rate_cards, RateCard, RatesSnapshot};
pub use theme::Theme;
