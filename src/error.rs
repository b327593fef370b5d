// ============================================================================
// Taxonomie des erreurs visibles par l'utilisateur
// ============================================================================
// Les erreurs "ambiantes" (config, terminal, fichiers) passent par anyhow.
// Celles-ci sont celles que la page affiche : chaque variante correspond à
// une origine distincte, mais seul le log permet de distinguer Transport,
// Api et Malformed une fois affichées.
// ============================================================================

use thiserror::Error;

/// Message affiché quand le montant saisi est refusé
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount greater than zero.";

/// Message fixe pour une réponse dont la forme est inattendue
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Invalid API response format";

/// Message fixe pour une réponse HTTP hors 2xx
pub const BAD_STATUS_MESSAGE: &str = "Network response was not ok";

/// Erreur d'une opération de la page de conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// Saisie locale refusée : aucune requête n'est envoyée
    #[error("{0}")]
    Validation(String),

    /// Statut HTTP hors 2xx ou erreur réseau
    #[error("{0}")]
    Transport(String),

    /// Champ `error` présent dans une réponse par ailleurs valide
    #[error("{0}")]
    Api(String),

    /// Champs attendus absents ou mal typés
    #[error("{0}")]
    Malformed(String),
}

impl FxError {
    pub fn invalid_amount() -> Self {
        FxError::Validation(INVALID_AMOUNT_MESSAGE.to_string())
    }

    pub fn bad_status() -> Self {
        FxError::Transport(BAD_STATUS_MESSAGE.to_string())
    }

    pub fn malformed() -> Self {
        FxError::Malformed(MALFORMED_RESPONSE_MESSAGE.to_string())
    }

    /// Catégorie courte pour les champs structurés des logs
    pub fn kind(&self) -> &'static str {
        match self {
            FxError::Validation(_) => "validation",
            FxError::Transport(_) => "transport",
            FxError::Api(_) => "api",
            FxError::Malformed(_) => "malformed",
        }
    }
}
