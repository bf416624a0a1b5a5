// =============================================================================
// Favorites store — persisted bookmark list
// =============================================================================
//
// The dashboard's favorites list, persisted as a JSON array of tickers.
// Loaded once at startup; every mutation rewrites the file with an atomic
// tmp + rename so a crash mid-write cannot corrupt it.  Insertion order is
// preserved, which is the order the sidebar renders.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use tracing::{info, warn};

pub struct FavoritesStore {
    path: PathBuf,
    tickers: RwLock<Vec<String>>,
}

impl FavoritesStore {
    /// Open the store at `path`, loading any existing file.  A missing file
    /// means an empty list; a malformed file is logged and treated as empty
    /// rather than taking the service down.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let tickers = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<String>>(&content) {
                Ok(list) => {
                    info!(path = %path.display(), count = list.len(), "favorites loaded");
                    list
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed favorites file, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            path,
            tickers: RwLock::new(tickers),
        }
    }

    /// Current favorites in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.tickers.read().clone()
    }

    /// Add `ticker`; adding an existing favorite is a no-op.
    pub fn add(&self, ticker: &str) -> Result<()> {
        {
            let mut list = self.tickers.write();
            if list.iter().any(|t| t == ticker) {
                return Ok(());
            }
            list.push(ticker.to_string());
        }
        self.save()
    }

    /// Remove `ticker`; removing an unknown favorite is a no-op.
    pub fn remove(&self, ticker: &str) -> Result<()> {
        {
            let mut list = self.tickers.write();
            let before = list.len();
            list.retain(|t| t != ticker);
            if list.len() == before {
                return Ok(());
            }
        }
        self.save()
    }

    /// Toggle membership, returning `true` when the ticker is now a favorite.
    pub fn toggle(&self, ticker: &str) -> Result<bool> {
        let now_favorite = {
            let mut list = self.tickers.write();
            if let Some(pos) = list.iter().position(|t| t == ticker) {
                list.remove(pos);
                false
            } else {
                list.push(ticker.to_string());
                true
            }
        };
        self.save()?;
        Ok(now_favorite)
    }

    /// Persist the list with an atomic write (write `.tmp`, then rename).
    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&*self.tickers.read())
            .context("failed to serialise favorites to JSON")?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp favorites to {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to rename tmp favorites to {}", self.path.display()))?;
        Ok(())
    }
}
