use std::fs;
use std::path::PathBuf;

use crate::config::{CAMPAIGNS_FILE, PLANETS_FILE};
use crate::error::{Error, Result};

/// Where the raw JSON documents come from
pub trait Source {
    fn fetch_planets(&self) -> Result<String>;
    fn fetch_campaigns(&self) -> Result<String>;
    /// Short description for log messages
    fn describe(&self) -> String;
}

/// Previously downloaded documents in a directory
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        fs::read_to_string(&path).map_err(|source| Error::Read { path, source })
    }
}

impl Source for LocalSource {
    fn fetch_planets(&self) -> Result<String> {
        self.read(PLANETS_FILE)
    }

    fn fetch_campaigns(&self) -> Result<String> {
        self.read(CAMPAIGNS_FILE)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.dir)
    }
}
