//! JSON-file token store.
//!
//! Keeps the token in `token.json` under a configurable directory
//! (default: `$XDG_DATA_HOME/finance-dashboard/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "finance-dashboard";

/// File holding the token.
const TOKEN_FILE: &str = "token.json";

/// On-disk layout of [`TOKEN_FILE`].
#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    /// Bearer token.
    access_token: String,
}

/// File-backed token store.
///
/// Writes go to a temporary file that is renamed over `token.json`, so a
/// crash never leaves a half-written token. In-process access is
/// serialized by a [`Mutex`].
#[derive(Debug)]
pub struct FileTokenStore {
    /// Directory containing [`TOKEN_FILE`].
    dir: PathBuf,
    /// Serializes in-process access.
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Returns the default XDG-compliant data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                FinanceError::TokenStorage("could not determine platform data directory".into())
            })
    }

    /// Returns the path of the token file.
    fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Runs `op` while holding the in-process lock.
    fn with_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        op()
    }
}

impl super::TokenStore for FileTokenStore {
    #[inline]
    fn load(&self) -> Result<Option<SecretString>> {
        self.with_lock(|| match fs::read_to_string(self.path()) {
            Ok(contents) => {
                let file: TokenFile = serde_json::from_str(&contents)?;
                Ok(Some(SecretString::from(file.access_token)))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        })
    }

    #[inline]
    fn store(&self, token: &SecretString) -> Result<()> {
        self.with_lock(|| {
            let tmp_path = self.dir.join(format!("{TOKEN_FILE}.tmp"));
            let json = serde_json::to_string_pretty(&TokenFile {
                access_token: token.expose_secret().to_owned(),
            })?;
            fs::write(&tmp_path, json).map_err(storage_io_error)?;
            fs::rename(&tmp_path, self.path()).map_err(storage_io_error)?;
            tracing::debug!(dir = %self.dir.display(), "token stored");
            Ok(())
        })
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|| match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        })
    }
}

/// Wraps an I/O error into a [`FinanceError::TokenStorage`].
fn storage_io_error(err: std::io::Error) -> FinanceError {
    FinanceError::TokenStorage(Box::new(err))
}

/// Wraps a mutex poison error into a [`FinanceError::TokenStorage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> FinanceError {
    FinanceError::TokenStorage(err.to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, TokenStore as _};

    fn temp_store() -> (FileTokenStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf()).unwrap();
        (store, dir)
    }

    #[test]
    fn missing_file_loads_none() {
        let (store, _dir) = temp_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn token_survives_a_new_store_instance() {
        let (store, dir) = temp_store();
        store.store(&SecretString::from("persisted".to_owned())).unwrap();

        let reopened = FileTokenStore::new(dir.path().to_path_buf()).unwrap();
        let session = Session::load(&reopened).unwrap();
        assert_eq!(session.bearer().unwrap(), "Bearer persisted");
    }

    #[test]
    fn clear_removes_file() {
        let (store, dir) = temp_store();
        store.store(&SecretString::from("t".to_owned())).unwrap();
        store.clear().unwrap();
        assert!(!dir.path().join(TOKEN_FILE).exists());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let (store, dir) = temp_store();
        fs::write(dir.path().join(TOKEN_FILE), "not json").unwrap();
        assert!(matches!(store.load(), Err(FinanceError::Serialization(_))));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        if let Ok(dir) = FileTokenStore::default_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
