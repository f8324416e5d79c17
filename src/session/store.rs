//! Persisted assistant/thread identities.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The identities a session reuses across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIdentities {
    pub assistant_id: Option<String>,
    pub thread_id: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl StoredIdentities {
    pub fn new(assistant_id: Option<String>, thread_id: Option<String>) -> Self {
        Self {
            assistant_id,
            thread_id,
            saved_at: Utc::now(),
        }
    }
}

/// Storage abstraction for persisted identities.
pub trait IdentityStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredIdentities>>;
    fn save(&self, identities: &StoredIdentities) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// File-backed identity store using a JSON file.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under `~/.courier/identities.json`.
    pub fn new_default() -> Self {
        Self {
            path: default_courier_dir().join("identities.json"),
        }
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<StoredIdentities>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let identities: StoredIdentities = serde_json::from_str(&raw)?;
        Ok(Some(identities))
    }

    fn save(&self, identities: &StoredIdentities) -> Result<()> {
        Self::ensure_parent(&self.path)?;
        let serialized = serde_json::to_string_pretty(identities)?;
        fs::write(&self.path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory identity store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    inner: Mutex<Option<StoredIdentities>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<StoredIdentities>> {
        Ok(self.inner.lock().expect("store lock poisoned").clone())
    }

    fn save(&self, identities: &StoredIdentities) -> Result<()> {
        *self.inner.lock().expect("store lock poisoned") = Some(identities.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

fn default_courier_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".courier"))
        .unwrap_or_else(|| PathBuf::from(".courier"))
}
