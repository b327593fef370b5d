// ============================================================================
// Configuration : Settings
// ============================================================================
// Ordre de priorité (le dernier gagne) :
//   1. valeurs par défaut
//   2. fichier lazyfx.toml (ou chemin donné par LAZYFX_CONFIG)
//   3. variables d'environnement LAZYFX_*
//
// CONCEPT RUST : #[serde(default)]
// - Les champs absents du fichier prennent la valeur de Default
// - Un fichier partiel est donc valide
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::models::currency::is_known_currency;
use crate::models::history::HistoryWindow;
use crate::models::Theme;
use crate::storage::FileStore;

/// Fichier de configuration lu dans le répertoire courant
pub const DEFAULT_CONFIG_FILE: &str = "lazyfx.toml";

/// Paramètres de l'application
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL du serveur qui expose /api/convert, /api/rates, /api/history
    pub api_base_url: String,

    /// Fichier du stockage clé/valeur (favoris)
    pub storage_path: PathBuf,

    /// Répertoire des logs (rotation quotidienne)
    pub log_dir: PathBuf,

    /// Thème au démarrage (non persisté)
    pub theme: Theme,

    pub default_from: String,
    pub default_to: String,
    pub default_base: String,

    /// Fenêtre initiale de l'historique, en jours (7, 14 ou 30)
    pub history_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".into(),
            storage_path: FileStore::default_path(),
            log_dir: PathBuf::from("./logs"),
            theme: Theme::Light,
            default_from: "USD".into(),
            default_to: "EUR".into(),
            default_base: "USD".into(),
            history_days: HistoryWindow::default().days(),
        }
    }
}

impl Settings {
    /// Charge la configuration : fichier puis environnement
    pub fn load() -> Result<Self> {
        let path = std::env::var("LAZYFX_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut settings = Self::from_file(&path)?;
        settings.apply_env(|key| std::env::var(key).ok());
        settings.sanitize();
        Ok(settings)
    }

    /// Lit un fichier TOML ; fichier absent = valeurs par défaut
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw)
                .with_context(|| format!("Configuration invalide : {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Échec de la lecture de {}", path.display())),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Échec du parsing TOML")
    }

    /// Applique les surcharges d'environnement
    ///
    /// `lookup` est injecté pour que les tests n'aient pas à modifier
    /// l'environnement du processus.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LAZYFX_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("LAZYFX_STORAGE") {
            self.storage_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("LAZYFX_LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("LAZYFX_THEME") {
            match v.to_lowercase().as_str() {
                "dark" => self.theme = Theme::Dark,
                "light" => self.theme = Theme::Light,
                other => warn!(theme = %other, "Unknown LAZYFX_THEME, keeping configured theme"),
            }
        }
    }

    /// Remplace les devises inconnues par les valeurs par défaut
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        for (field, value, fallback) in [
            ("default_from", &mut self.default_from, defaults.default_from),
            ("default_to", &mut self.default_to, defaults.default_to),
            ("default_base", &mut self.default_base, defaults.default_base),
        ] {
            let upper = value.trim().to_uppercase();
            if is_known_currency(&upper) {
                *value = upper;
            } else {
                warn!(field, value = %value, fallback = %fallback, "Unknown currency in settings");
                *value = fallback;
            }
        }

        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
    }

    pub fn history_window(&self) -> HistoryWindow {
        HistoryWindow::from_days(self.history_days)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            api_base_url = "http://rates.local:8080/"
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(settings.api_base_url, "http://rates.local:8080/");
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.default_from, "USD");
        assert_eq!(settings.history_days, 7);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Settings::from_toml("theme = [").is_err());
        assert!(Settings::from_toml(r#"theme = "sepia""#).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut settings = Settings::default();
        settings.apply_env(|key| match key {
            "LAZYFX_API_URL" => Some("http://override:1".to_string()),
            "LAZYFX_THEME" => Some("DARK".to_string()),
            _ => None,
        });

        assert_eq!(settings.api_base_url, "http://override:1");
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_sanitize_falls_back_on_unknown_codes() {
        let mut settings = Settings {
            default_from: "gbp".into(),
            default_to: "XYZ".into(),
            api_base_url: "http://host/".into(),
            ..Settings::default()
        };
        settings.sanitize();

        assert_eq!(settings.default_from, "GBP");
        assert_eq!(settings.default_to, "EUR");
        assert_eq!(settings.api_base_url, "http://host");
    }
}
