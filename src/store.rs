use std::path::PathBuf;

use thiserror::Error;

use crate::{Config, Loaded};

/// Failure to read or write persisted configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access configuration at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "json")]
    #[error("malformed configuration at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration store unavailable: {0}")]
    Unavailable(String),
}

/// Where the rule list and flags live between runs.
pub trait RuleStore {
    /// Read the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the configuration cannot be read at all.
    /// Individually malformed rules are reported in [`Loaded::errors`]
    /// instead.
    fn load(&self) -> Result<Loaded, StoreError>;

    /// Persist `config`, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if writing fails.
    fn save(&mut self, config: &Config) -> Result<(), StoreError>;
}

/// A store that keeps the configuration in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: Config,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl RuleStore for MemoryStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        Ok(Loaded {
            config: self.config.clone(),
            errors: Vec::new(),
        })
    }

    fn save(&mut self, config: &Config) -> Result<(), StoreError> {
        self.config = config.clone();
        Ok(())
    }
}

/// A store backed by a JSON document on disk.
///
/// A missing file loads as the default configuration; it is only created on
/// the first [`save`](RuleStore::save).
#[cfg(feature = "json")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(feature = "json")]
impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(feature = "json")]
impl RuleStore for FileStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Loaded::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        Config::from_json(&text).map_err(|e| self.json_error(e))
    }

    fn save(&mut self, config: &Config) -> Result<(), StoreError> {
        let text = config.to_json().map_err(|e| self.json_error(e))?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}
