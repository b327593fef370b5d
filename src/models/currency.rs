// ============================================================================
// Structure : Currency
// ============================================================================
// Table statique des devises affichées par la page de conversion
//
// CONCEPTS RUST :
// 1. &'static str : chaînes embarquées dans le binaire, jamais allouées
// 2. const array : la table est évaluée à la compilation, jamais modifiée
// 3. Iterator::find : recherche linéaire (20 entrées, inutile d'indexer)
// ============================================================================

/// Devise connue de l'application (code ISO, nom, symbole)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Code ISO 4217 à 3 lettres (ex: "USD")
    pub code: &'static str,

    /// Nom affiché (ex: "US Dollar")
    pub name: &'static str,

    /// Symbole affiché devant les montants (ex: "$")
    pub symbol: &'static str,
}

impl Currency {
    const fn new(code: &'static str, name: &'static str, symbol: &'static str) -> Self {
        Self { code, name, symbol }
    }

    /// Libellé d'option dans un sélecteur : "USD - US Dollar"
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Les 20 devises supportées, dans l'ordre d'affichage
///
/// L'ordre compte : les sélecteurs et le panneau des taux populaires
/// le respectent tel quel.
pub const CURRENCIES: [Currency; 20] = [
    Currency::new("USD", "US Dollar", "$"),
    Currency::new("EUR", "Euro", "€"),
    Currency::new("GBP", "British Pound", "£"),
    Currency::new("JPY", "Japanese Yen", "¥"),
    Currency::new("AUD", "Australian Dollar", "A$"),
    Currency::new("CAD", "Canadian Dollar", "C$"),
    Currency::new("CHF", "Swiss Franc", "Fr"),
    Currency::new("CNY", "Chinese Yuan", "¥"),
    Currency::new("INR", "Indian Rupee", "₹"),
    Currency::new("MXN", "Mexican Peso", "$"),
    Currency::new("SGD", "Singapore Dollar", "S$"),
    Currency::new("NZD", "New Zealand Dollar", "NZ$"),
    Currency::new("BRL", "Brazilian Real", "R$"),
    Currency::new("ZAR", "South African Rand", "R"),
    Currency::new("RUB", "Russian Ruble", "₽"),
    Currency::new("HKD", "Hong Kong Dollar", "HK$"),
    Currency::new("SEK", "Swedish Krona", "kr"),
    Currency::new("NOK", "Norwegian Krone", "kr"),
    Currency::new("TRY", "Turkish Lira", "₺"),
    Currency::new("KRW", "South Korean Won", "₩"),
];

/// Cherche une devise par son code ("USD", "EUR", ...)
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// Position d'une devise dans la table statique
pub fn currency_index(code: &str) -> Option<usize> {
    CURRENCIES.iter().position(|c| c.code == code)
}

/// Vérifie qu'un code appartient à la table statique
pub fn is_known_currency(code: &str) -> bool {
    find_currency(code).is_some()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_twenty_unique_codes() {
        assert_eq!(CURRENCIES.len(), 20);
        for (i, currency) in CURRENCIES.iter().enumerate() {
            assert_eq!(currency.code.len(), 3);
            assert_eq!(currency_index(currency.code), Some(i));
        }
    }

    #[test]
    fn test_find_currency() {
        let eur = find_currency("EUR").unwrap();
        assert_eq!(eur.symbol, "€");
        assert_eq!(eur.option_label(), "EUR - Euro");

        assert!(find_currency("XXX").is_none());
        assert!(!is_known_currency("usd"));
    }
}
