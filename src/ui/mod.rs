// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod input;     // Routage des touches vers App
pub mod dashboard; // Rendu de la page de conversion
pub mod chart;     // Graphique de l'historique
pub mod picker;    // Sélecteur de devise
pub mod palette;   // Couleurs du thème actif

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
pub use input::handle_event;
