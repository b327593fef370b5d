// ============================================================================
// LazyFX - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod error;   // Erreurs affichées à l'utilisateur
pub mod models;  // Structures de données (devises, conversions, favoris)
pub mod config;  // Configuration (fichier TOML + environnement)
pub mod storage; // Stockage clé/valeur local (favoris)
pub mod api;     // Client du serveur de conversion
pub mod worker;  // Exécution des requêtes en arrière-plan
pub mod app;     // État de l'application
pub mod ui;      // Interface utilisateur
