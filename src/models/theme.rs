// ============================================================================
// Enum : Theme
// ============================================================================
// Thème clair/sombre, représenté par la feuille de style active
// (light-mode.css / dark-mode.css). Jamais persisté : chaque démarrage
// repart de la configuration.
// ============================================================================

use serde::Deserialize;

pub const LIGHT_STYLESHEET: &str = "light-mode.css";
pub const DARK_STYLESHEET: &str = "dark-mode.css";

/// Thème de la page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Déduit le thème d'une référence de feuille de style
    pub fn from_stylesheet(href: &str) -> Self {
        if href.contains("dark-mode") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Feuille de style active pour ce thème
    pub fn stylesheet(&self) -> &'static str {
        match self {
            Theme::Light => LIGHT_STYLESHEET,
            Theme::Dark => DARK_STYLESHEET,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Libellé du bouton : l'action DISPONIBLE, pas l'état courant
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "☾ Dark Mode",
            Theme::Dark => "☀ Light Mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_swaps_stylesheet_and_label() {
        let theme = Theme::default();
        assert_eq!(theme.stylesheet(), "light-mode.css");
        assert_eq!(theme.toggle_label(), "☾ Dark Mode");

        let dark = theme.toggled();
        assert_eq!(dark.stylesheet(), "dark-mode.css");
        assert_eq!(dark.toggle_label(), "☀ Light Mode");
        assert_eq!(dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_from_stylesheet() {
        assert_eq!(Theme::from_stylesheet("/static/css/dark-mode.css"), Theme::Dark);
        assert_eq!(Theme::from_stylesheet("/static/css/light-mode.css"), Theme::Light);
    }
}
