// ============================================================================
// Module : storage
// ============================================================================
// Stockage clé/valeur local et persistant (l'équivalent du localStorage
// d'un navigateur). Le stockage ne manipule que des chaînes : l'encodage
// JSON des favoris est la responsabilité de FavoritesStore.
//
// CONCEPT RUST : Trait objects
// - Box<dyn KeyValueStore> : le backend est choisi à l'exécution
// - Fichier en production, mémoire dans les tests
// ============================================================================

use std::collections::HashMap;

use anyhow::Result;

pub mod favorites; // Favoris persistés sous la clé "favorites"
pub mod file;      // Backend fichier JSON

pub use favorites::FavoritesStore;
pub use file::FileStore;

/// Stockage clé/valeur de chaînes
///
/// Send : App (qui possède le stockage) doit pouvoir changer de thread.
pub trait KeyValueStore: Send {
    /// Lit une valeur, None si la clé est absente
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Écrit une valeur (remplace l'existante)
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Supprime une clé (absente = pas une erreur)
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stockage en mémoire, perdu à la fermeture
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));

        store.remove("favorites").unwrap();
        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
    }
}
