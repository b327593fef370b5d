// ============================================================================
// Structures : ConversionRequest / ConversionResult
// ============================================================================
// Une conversion = une requête validée localement + un résultat éphémère
//
// CONCEPTS RUST :
// 1. Validation à la construction : une ConversionRequest existe seulement
//    si le montant est valide (pas d'état "à moitié valide")
// 2. Result<T, FxError> : l'erreur de validation est une valeur comme une autre
// 3. DateTime<Local> : l'heure affichée est celle du terminal
// ============================================================================

use chrono::{DateTime, Local};

use crate::error::FxError;
use crate::models::currency::find_currency;

/// Paire de devises (source, cible)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Retourne la paire inversée (EUR/USD pour USD/EUR)
    pub fn swapped(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone())
    }

    /// Libellé court : "USD → EUR"
    pub fn label(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }
}

/// Requête de conversion validée
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Montant numérique envoyé à l'API
    pub amount: f64,

    /// Montant tel que saisi (réaffiché dans la ligne de résultat)
    pub amount_text: String,

    pub pair: CurrencyPair,
}

impl ConversionRequest {
    /// Valide le formulaire et construit la requête
    ///
    /// Le montant doit être un nombre fini strictement positif.
    /// En cas d'échec, aucune requête n'existe donc aucun appel réseau
    /// ne peut être émis.
    pub fn from_form(amount_text: &str, pair: CurrencyPair) -> Result<Self, FxError> {
        let amount = parse_amount(amount_text)?;
        Ok(Self {
            amount,
            amount_text: amount_text.trim().to_string(),
            pair,
        })
    }
}

/// Parse un montant saisi par l'utilisateur
pub fn parse_amount(text: &str) -> Result<f64, FxError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FxError::invalid_amount());
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(FxError::invalid_amount()),
    }
}

/// Résultat renvoyé par /api/convert
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Montant converti (conversion_result)
    pub result: f64,

    /// Taux appliqué (conversion_rate)
    pub rate: f64,

    /// Moment où la réponse a été reçue
    pub fetched_at: DateTime<Local>,
}

impl ConversionResult {
    pub fn new(result: f64, rate: f64) -> Self {
        Self {
            result,
            rate,
            fetched_at: Local::now(),
        }
    }
}

/// Lignes prêtes à afficher dans le panneau de résultat
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDisplay {
    /// "100 USD = €88.23 EUR"
    pub result_line: String,

    /// "1 USD = €0.8800 EUR"
    pub rate_line: String,

    /// "Last updated: 2025-04-29 14:03:12"
    pub updated_line: String,
}

impl ConversionDisplay {
    /// Formate un résultat : 2 décimales pour le montant, 4 pour le taux
    ///
    /// Le symbole est celui de la devise cible. Une devise inconnue
    /// (ne devrait pas arriver, les sélecteurs viennent de la table)
    /// s'affiche sans symbole.
    pub fn new(request: &ConversionRequest, result: &ConversionResult) -> Self {
        let from = &request.pair.from;
        let to = &request.pair.to;
        let symbol = find_currency(to).map(|c| c.symbol).unwrap_or("");

        Self {
            result_line: format!(
                "{} {} = {}{:.2} {}",
                request.amount_text, from, symbol, result.result, to
            ),
            rate_line: format!("1 {} = {}{:.4} {}", from, symbol, result.rate, to),
            updated_line: format!(
                "Last updated: {}",
                result.fetched_at.format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_rejects_invalid_input() {
        for input in ["", "   ", "abc", "0", "-5", "0.0", "NaN", "inf", "1e999"] {
            assert_eq!(
                parse_amount(input),
                Err(FxError::invalid_amount()),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_amount_accepts_positive_numbers() {
        assert_eq!(parse_amount("100"), Ok(100.0));
        assert_eq!(parse_amount(" 0.5 "), Ok(0.5));
        assert_eq!(parse_amount("1e3"), Ok(1000.0));
    }

    #[test]
    fn test_display_formats_symbol_and_decimals() {
        let request =
            ConversionRequest::from_form("100", CurrencyPair::new("USD", "EUR")).unwrap();
        let result = ConversionResult::new(88.23, 0.88);

        let display = ConversionDisplay::new(&request, &result);
        assert_eq!(display.result_line, "100 USD = €88.23 EUR");
        assert_eq!(display.rate_line, "1 USD = €0.8800 EUR");
        assert!(display.updated_line.starts_with("Last updated: "));
    }

    #[test]
    fn test_display_keeps_amount_as_typed() {
        let request =
            ConversionRequest::from_form(" 12.50 ", CurrencyPair::new("EUR", "JPY")).unwrap();
        let display = ConversionDisplay::new(&request, &ConversionResult::new(2045.5, 163.64));

        assert_eq!(display.result_line, "12.50 EUR = ¥2045.50 JPY");
        assert_eq!(display.rate_line, "1 EUR = ¥163.6400 JPY");
    }

    #[test]
    fn test_pair_swapped() {
        let pair = CurrencyPair::new("USD", "EUR");
        assert_eq!(pair.swapped(), CurrencyPair::new("EUR", "USD"));
        assert_eq!(pair.label(), "USD → EUR");
    }
}
