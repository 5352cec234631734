use std::path::{Path, PathBuf};

use metflix_types::media::{MediaId, MediaItem};
use tracing::{debug, warn};

use super::error::Error;

/// User-curated list of catalog items, persisted as a single JSON file.
///
/// The file is read once at construction and rewritten wholesale inside
/// every mutating call, so each mutation is a complete
/// read-modify-write within one synchronous turn. A file that fails to
/// parse is discarded and the list starts empty.
#[derive(Debug)]
pub struct Watchlist {
    path: PathBuf,
    entries: Vec<MediaItem>,
}

impl Watchlist {
    pub const DEFAULT_FILE_NAME: &'static str = "watchlist.json";

    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding corrupt watchlist {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("No stored watchlist at {}: {}", path.display(), e);
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.entries.iter().any(|item| item.id() == id)
    }

    /// Append `item` unless an entry with its id is already present.
    /// Returns whether the list changed.
    pub fn add(&mut self, item: MediaItem) -> Result<bool, Error> {
        if self.contains(item.id()) {
            return Ok(false);
        }
        self.entries.push(item);
        self.persist()?;
        Ok(true)
    }

    /// Drop every entry with `id`. Returns whether the list changed.
    pub fn remove(&mut self, id: MediaId) -> Result<bool, Error> {
        let before = self.entries.len();
        self.entries.retain(|item| item.id() != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        debug!("Wrote {} watchlist entries", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metflix_types::media::{Movie, TvShow};

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("metflix-watchlist-{}-{}.json", std::process::id(), name))
    }

    fn movie(id: MediaId) -> MediaItem {
        MediaItem::from(Movie {
            id,
            title: format!("movie-{}", id),
            ..Default::default()
        })
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = scratch_file("missing");
        let list = Watchlist::load(&path);
        assert!(list.is_empty());
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_add_is_idempotent() {
        let path = scratch_file("idempotent");
        let mut list = Watchlist::load(&path);
        assert!(list.add(movie(603)).unwrap());
        assert!(!list.add(movie(603)).unwrap());
        assert_eq!(list.len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_remove() {
        let path = scratch_file("remove");
        let mut list = Watchlist::load(&path);
        list.add(movie(603)).unwrap();
        list.add(movie(604)).unwrap();
        assert!(list.remove(603).unwrap());
        assert!(!list.remove(603).unwrap());
        assert!(!list.contains(603));
        assert_eq!(list.len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_survives_reload() {
        let path = scratch_file("reload");
        let mut list = Watchlist::load(&path);
        list.add(movie(603)).unwrap();
        list.add(MediaItem::from(TvShow {
            id: 1396,
            name: "Breaking Bad".to_string(),
            ..Default::default()
        }))
        .unwrap();

        let reloaded = Watchlist::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(603));
        assert!(reloaded.contains(1396));
        assert_eq!(reloaded.items()[1].title(), "Breaking Bad");
        let _ = std::fs::remove_file(&path);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_corrupt_file_is_discarded() {
        let path = scratch_file("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let list = Watchlist::load(&path);
        assert!(list.is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
