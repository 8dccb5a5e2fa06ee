//! On-disk locations of the CLI's session state.
//!
//! | Variable        | Effect                                          |
//! |-----------------|-------------------------------------------------|
//! | `DEALDESK_HOME` | Keep every file below this directory instead    |
//!
//! Without it the session lives under the platform config directory and the
//! password-reset email under the platform cache directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dealdesk_client::{FileStorage, SessionStore};

use crate::{Error, Result};

const APP_DIR: &str = "dealdesk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub session: PathBuf,
    pub cookies: PathBuf,
    pub reset: PathBuf,
}

impl Paths {
    pub fn resolve(home: Option<PathBuf>) -> Result<Self> {
        if let Some(home) = home {
            return Ok(Self::under(&home, &home));
        }
        let config = dirs::config_dir()
            .ok_or_else(|| Error::Custom("could not determine a config directory".into()))?
            .join(APP_DIR);
        let cache = dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| config.clone());
        Ok(Self::under(&config, &cache))
    }

    fn under(config: &Path, cache: &Path) -> Self {
        Self {
            session: config.join("session.json"),
            cookies: config.join("cookies.json"),
            reset: cache.join("reset.json"),
        }
    }

    /// Session store backed by these files.
    pub fn session_store(&self) -> Result<SessionStore> {
        Ok(SessionStore::new(
            Arc::new(FileStorage::open(&self.session)?),
            Arc::new(FileStorage::open(&self.cookies)?),
            Arc::new(FileStorage::open(&self.reset)?),
        ))
    }
}
