// ============================================================================
// Backend : FileStore
// ============================================================================
// Stocke toutes les clés dans un seul fichier JSON :
//   {"favorites": "{\"version\":1,...}"}
//
// Chaque lecture relit le fichier : deux instances sur le même chemin
// voient les écritures l'une de l'autre (comme un rechargement de page).
// L'écriture passe par un fichier temporaire puis un rename, pour ne
// jamais laisser un fichier tronqué.
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::KeyValueStore;

/// Stockage clé/valeur persisté dans un fichier JSON
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Chemin par défaut : ~/.local/share/lazyfx/storage.json sur Linux
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lazyfx")
            .join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // Premier lancement : pas encore de fichier
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Échec de la lecture du stockage {}", self.path.display())
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Stockage corrompu : {}", self.path.display()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Échec de la création du répertoire {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(entries)
            .context("Échec de la sérialisation du stockage")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Échec de l'écriture de {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Échec du remplacement de {}", self.path.display()))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_values_survive_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::new(&path);
        store.set("favorites", "[1]").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("favorites").unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        store.remove("other").unwrap();
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("favorites").is_err());
    }
}
