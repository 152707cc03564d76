//! In-memory token store for tests and short-lived processes.

use std::sync::Mutex;

use secrecy::{ExposeSecret as _, SecretString};

use crate::error::{FinanceError, Result};

/// Thread-safe token store that forgets everything on drop.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    /// Stored token, kept as a secret.
    token: Mutex<Option<SecretString>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Option<SecretString>) -> R>(&self, op: F) -> Result<R> {
        let mut guard = self.token.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut *guard))
    }
}

impl super::TokenStore for InMemoryTokenStore {
    #[inline]
    fn load(&self) -> Result<Option<SecretString>> {
        self.with_lock(|slot| {
            slot.as_ref()
                .map(|token| SecretString::from(token.expose_secret().to_owned()))
        })
    }

    #[inline]
    fn store(&self, token: &SecretString) -> Result<()> {
        self.with_lock(|slot| {
            *slot = Some(SecretString::from(token.expose_secret().to_owned()));
        })
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|slot| *slot = None)
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> FinanceError {
    FinanceError::TokenStorage(err.to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenStore as _;

    #[test]
    fn empty_store_loads_none() {
        let store = InMemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn store_then_load() {
        let store = InMemoryTokenStore::new();
        store.store(&SecretString::from("t".to_owned())).unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "t");
    }

    #[test]
    fn clear_is_idempotent() {
        let store = InMemoryTokenStore::new();
        store.clear().unwrap();
        store.store(&SecretString::from("t".to_owned())).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
