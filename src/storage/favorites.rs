// ============================================================================
// FavoritesStore : favoris persistés sous la clé "favorites"
// ============================================================================
// Lecture tolérante, écriture stricte :
// - JSON corrompu ou version inconnue -> liste vide + log d'erreur
// - entrées hors de la table des devises -> ignorées + warning
// - l'écriture produit toujours le format versionné
// - écrire sur une valeur illisible échoue, la valeur reste intacte
// ============================================================================

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info, warn};

use crate::models::currency::is_known_currency;
use crate::models::favorite::{
    Favorite, FavoritesDocument, StoredFavorites, FAVORITES_SCHEMA_VERSION,
};
use crate::models::CurrencyPair;

use super::KeyValueStore;

/// Clé fixe des favoris dans le stockage
pub const FAVORITES_KEY: &str = "favorites";

/// Accès aux favoris persistés
pub struct FavoritesStore {
    store: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Charge la liste complète, dans l'ordre de sauvegarde
    ///
    /// Ne renvoie jamais d'erreur : un stockage illisible s'affiche comme
    /// une liste vide, l'erreur part dans le log.
    pub fn load(&self) -> Vec<Favorite> {
        match self.try_load() {
            Ok(favorites) => {
                debug!(count = favorites.len(), "Favorites loaded");
                favorites
            }
            Err(e) => {
                error!(error = ?e, "Unreadable favorites, showing an empty list");
                Vec::new()
            }
        }
    }

    /// Lecture stricte : base des écritures
    ///
    /// Une valeur illisible (JSON corrompu, version inconnue) est une
    /// erreur : réécrire par-dessus effacerait les favoris existants.
    pub fn try_load(&self) -> Result<Vec<Favorite>> {
        match self
            .store
            .get(FAVORITES_KEY)
            .context("Échec de la lecture des favoris")?
        {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Ajoute une paire en fin de liste et persiste
    ///
    /// Les doublons sont autorisés. Les codes doivent appartenir à la table
    /// statique au moment de la sauvegarde.
    pub fn append(&mut self, pair: &CurrencyPair) -> Result<Vec<Favorite>> {
        if !is_known_currency(&pair.from) || !is_known_currency(&pair.to) {
            bail!("Paire inconnue : {}", pair.label());
        }

        let mut favorites = self.try_load()?;
        favorites.push(Favorite::from(pair));
        self.write(&favorites)?;

        info!(pair = %pair.label(), count = favorites.len(), "Favorite saved");
        Ok(favorites)
    }

    /// Supprime toutes les entrées de cette paire et persiste
    pub fn remove(&mut self, pair: &CurrencyPair) -> Result<Vec<Favorite>> {
        let mut favorites = self.try_load()?;
        let before = favorites.len();
        favorites.retain(|f| !f.matches(pair));

        if favorites.len() == before {
            debug!(pair = %pair.label(), "No favorite to remove");
            return Ok(favorites);
        }

        self.write(&favorites)?;
        info!(pair = %pair.label(), removed = before - favorites.len(), "Favorite removed");
        Ok(favorites)
    }

    fn write(&mut self, favorites: &[Favorite]) -> Result<()> {
        let document = FavoritesDocument::new(favorites.to_vec());
        let json = serde_json::to_string(&document).context("Échec de l'encodage des favoris")?;
        self.store
            .set(FAVORITES_KEY, &json)
            .context("Échec de l'écriture des favoris")
    }
}

/// Décode la valeur persistée (format versionné ou tableau historique)
fn decode(raw: &str) -> Result<Vec<Favorite>> {
    let stored: StoredFavorites =
        serde_json::from_str(raw).context("Favoris illisibles (JSON invalide)")?;

    let favorites = match stored {
        StoredFavorites::Versioned(document) => {
            if document.version != FAVORITES_SCHEMA_VERSION {
                bail!("Version de favoris non supportée : {}", document.version);
            }
            document.favorites
        }
        StoredFavorites::Legacy(favorites) => {
            info!(count = favorites.len(), "Reading legacy unversioned favorites");
            favorites
        }
    };

    Ok(favorites
        .into_iter()
        .filter(|f| {
            let known = is_known_currency(&f.from_currency) && is_known_currency(&f.to_currency);
            if !known {
                warn!(favorite = %f.display(), "Dropping favorite with unknown currency");
            }
            known
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    fn memory_favorites(initial: Option<&str>) -> FavoritesStore {
        let mut store = MemoryStore::new();
        if let Some(raw) = initial {
            store.set(FAVORITES_KEY, raw).unwrap();
        }
        FavoritesStore::new(Box::new(store))
    }

    #[test]
    fn test_empty_store_has_no_favorites() {
        assert!(memory_favorites(None).load().is_empty());
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut favorites = memory_favorites(None);
        favorites.append(&CurrencyPair::new("USD", "EUR")).unwrap();
        favorites.append(&CurrencyPair::new("GBP", "JPY")).unwrap();
        favorites.append(&CurrencyPair::new("USD", "EUR")).unwrap();

        let loaded = favorites.load();
        assert_eq!(
            loaded,
            vec![
                Favorite::new("USD", "EUR"),
                Favorite::new("GBP", "JPY"),
                Favorite::new("USD", "EUR"),
            ]
        );
    }

    #[test]
    fn test_append_rejects_unknown_currency() {
        let mut favorites = memory_favorites(None);
        assert!(favorites.append(&CurrencyPair::new("USD", "XXX")).is_err());
        assert!(favorites.load().is_empty());
    }

    #[test]
    fn test_remove_by_pair_identity() {
        let mut favorites = memory_favorites(None);
        favorites.append(&CurrencyPair::new("USD", "EUR")).unwrap();
        favorites.append(&CurrencyPair::new("EUR", "USD")).unwrap();

        let remaining = favorites.remove(&CurrencyPair::new("USD", "EUR")).unwrap();
        assert_eq!(remaining, vec![Favorite::new("EUR", "USD")]);
        assert_eq!(favorites.load(), remaining);
    }

    #[test]
    fn test_legacy_format_is_read_and_upgraded() {
        let mut favorites =
            memory_favorites(Some(r#"[{"fromCurrency":"USD","toCurrency":"EUR"}]"#));
        assert_eq!(favorites.load(), vec![Favorite::new("USD", "EUR")]);

        favorites.append(&CurrencyPair::new("CHF", "INR")).unwrap();
        let raw = favorites.store.get(FAVORITES_KEY).unwrap().unwrap();
        assert!(raw.starts_with(r#"{"version":1,"#));
    }

    #[test]
    fn test_unreadable_values_load_as_empty() {
        assert!(memory_favorites(Some("{not json")).load().is_empty());
        assert!(memory_favorites(Some(r#"{"version":99,"favorites":[]}"#))
            .load()
            .is_empty());
    }

    #[test]
    fn test_failed_save_keeps_unreadable_value() {
        for raw in [
            "{not json",
            r#"{"version":2,"favorites":[{"fromCurrency":"GBP","toCurrency":"JPY"}]}"#,
        ] {
            let mut favorites = memory_favorites(Some(raw));

            assert!(favorites.append(&CurrencyPair::new("USD", "EUR")).is_err());
            assert!(favorites.remove(&CurrencyPair::new("GBP", "JPY")).is_err());

            let stored = favorites.store.get(FAVORITES_KEY).unwrap();
            assert_eq!(stored.as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_unknown_codes_are_dropped_on_load() {
        let raw = r#"{"version":1,"favorites":[
            {"fromCurrency":"USD","toCurrency":"EUR"},
            {"fromCurrency":"DOGE","toCurrency":"EUR"}
        ]}"#;
        assert_eq!(
            memory_favorites(Some(raw)).load(),
            vec![Favorite::new("USD", "EUR")]
        );
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut favorites = FavoritesStore::new(Box::new(FileStore::new(&path)));
        favorites.append(&CurrencyPair::new("USD", "EUR")).unwrap();

        // "Rechargement" : nouvelle instance sur le même fichier
        let reloaded = FavoritesStore::new(Box::new(FileStore::new(&path)));
        assert_eq!(reloaded.load(), vec![Favorite::new("USD", "EUR")]);
    }
}
