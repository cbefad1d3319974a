use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CAMPAIGNS_FILE, PLANETS_FILE};

/// Directory holding downloaded JSON documents
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "hd2-planets-to-sqlite")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {:?}", cache_dir))?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn planets_path(&self) -> PathBuf {
        self.cache_dir.join(PLANETS_FILE)
    }

    pub fn campaigns_path(&self) -> PathBuf {
        self.cache_dir.join(CAMPAIGNS_FILE)
    }

    /// Check if the planets document has been downloaded
    pub fn has_planets(&self) -> bool {
        self.planets_path().exists()
    }

    pub fn store_planets(&self, json: &str) -> Result<PathBuf> {
        write_document(&self.planets_path(), json)
    }

    pub fn store_campaigns(&self, json: &str) -> Result<PathBuf> {
        write_document(&self.campaigns_path(), json)
    }
}

/// Write via a temp file so an interrupted download never leaves half a document
fn write_document(path: &Path, json: &str) -> Result<PathBuf> {
    let tmp = path.with_extension("json.part");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {:?}", tmp))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move {:?} into place", tmp))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{LocalSource, Source};
    use tempfile::TempDir;

    #[test]
    fn test_store_and_read_back() {
        let dir = TempDir::new().unwrap();
        let cache = CacheManager::new(Some(dir.path().join("cache"))).unwrap();
        assert!(!cache.has_planets());

        cache.store_planets(r#"{"1": {"name": "A"}}"#).unwrap();
        cache.store_campaigns("[]").unwrap();
        assert!(cache.has_planets());

        let source = LocalSource::new(cache.cache_dir());
        assert_eq!(source.fetch_planets().unwrap(), r#"{"1": {"name": "A"}}"#);
        assert_eq!(source.fetch_campaigns().unwrap(), "[]");
        assert!(!cache.cache_dir().join("planets.json.part").exists());
    }
}
