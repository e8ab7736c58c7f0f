//! Durable session storage. The session is mirrored into a key-value store under
//! two fixed, versionless keys: the raw token and the JSON-serialized user
//! record. There is no migration path; a user entry that no longer parses is
//! treated as "no session" and both keys are removed.

use crate::{app_lib::AppError, features::auth::types::UserRecord};
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "resume_ats_token";
pub const USER_KEY: &str = "resume_ats_user";

/// Minimal string key-value store, the equivalent of browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Writes several entries. Stores that can should apply them all or none.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Session restored from storage. Token and user are always present together.
#[derive(Clone, Debug)]
pub struct StoredSession {
    pub token: SecretString,
    pub user: UserRecord,
}

/// Writes both the token and the serialized user record in one store update.
///
/// # Errors
/// Storage failures (quota, permissions) propagate to the caller.
pub fn save_session(
    store: &dyn KeyValueStore,
    token: &SecretString,
    user: &UserRecord,
) -> Result<(), AppError> {
    let raw_user = serde_json::to_string(user)
        .map_err(|err| AppError::Serialization(format!("Failed to encode user: {err}")))?;

    store.set_many(&[(TOKEN_KEY, token.expose_secret()), (USER_KEY, raw_user.as_str())])
}

/// Reads the stored session.
///
/// Returns `None` when either entry is missing or empty. When the user entry is
/// not a valid user record, both entries are cleared before returning `None`.
///
/// # Errors
/// Returns `AppError::Storage` if the store cannot be read or repaired.
pub fn load_session(store: &dyn KeyValueStore) -> Result<Option<StoredSession>, AppError> {
    let token = store.get(TOKEN_KEY)?.filter(|token| !token.is_empty());
    let raw_user = store.get(USER_KEY)?.filter(|raw| !raw.is_empty());

    let (Some(token), Some(raw_user)) = (token, raw_user) else {
        return Ok(None);
    };

    match serde_json::from_str::<UserRecord>(&raw_user) {
        Ok(user) => Ok(Some(StoredSession {
            token: SecretString::from(token),
            user,
        })),
        Err(err) => {
            warn!("Discarding stored session with unreadable user record: {err}");
            clear_session(store)?;
            Ok(None)
        }
    }
}

/// Removes both entries. Idempotent.
///
/// # Errors
/// Returns `AppError::Storage` if the store cannot be written.
pub fn clear_session(store: &dyn KeyValueStore) -> Result<(), AppError> {
    store.remove(TOKEN_KEY)?;
    store.remove(USER_KEY)
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        let mut map = self.lock()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// File-backed store holding a flat JSON object of string entries.
///
/// The file is rewritten on every change with `0600` permissions on Unix. A file
/// that is not a JSON object is treated as empty and replaced on the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    "Ignoring unreadable session store {}: {err}",
                    self.path.display()
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| AppError::Serialization(format!("Failed to encode store: {err}")))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, raw).map_err(|err| {
            AppError::Storage(format!("Failed to write {}: {err}", tmp_path.display()))
        })?;
        restrict_permissions(&tmp_path)?;
        fs::rename(&tmp_path, &self.path).map_err(|err| {
            AppError::Storage(format!("Failed to replace {}: {err}", self.path.display()))
        })?;

        debug!("session store written to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.set_many(&[(key, value)])
    }

    /// One read and one atomic rename for the whole batch.
    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), AppError> {
        let mut entries = self.read_entries()?;
        for (key, value) in batch {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(AppError::Storage(format!(
                    "Failed to remove {}: {err}",
                    self.path.display()
                ))),
            };
        }

        self.write_entries(&entries)
    }
}

fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|err| {
            AppError::Storage(format!(
                "Failed to set permissions on {}: {err}",
                path.display()
            ))
        })?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}
