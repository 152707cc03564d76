//! Authenticated session and pluggable token storage.
//!
//! A [`Session`] holds the bearer token used by the client. It is created
//! explicitly, loaded from a [`TokenStore`] at start-up and cleared on
//! logout; nothing in the crate keeps the token in global state.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;

use secrecy::{ExposeSecret as _, SecretString};

use crate::error::{FinanceError, Result};

/// Backend that persists the bearer token between runs.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait TokenStore: core::fmt::Debug + Send + Sync {
    /// Returns the stored token, or `Ok(None)` if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn load(&self) -> Result<Option<SecretString>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn store(&self, token: &SecretString) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn clear(&self) -> Result<()>;
}

/// The bearer token of the logged-in user, if any.
///
/// The token is redacted from `Debug` output.
#[derive(Debug, Default)]
pub struct Session {
    /// Current bearer token.
    token: Option<SecretString>,
}

impl Session {
    /// Creates a session with no token.
    #[inline]
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// Creates a session from an already known token.
    #[inline]
    #[must_use]
    pub fn with_token<T: Into<String>>(token: T) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
        }
    }

    /// Restores the session from a token store.
    ///
    /// An empty store yields an anonymous session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[inline]
    pub fn load<S: TokenStore + ?Sized>(store: &S) -> Result<Self> {
        let token = store.load()?;
        tracing::debug!(authenticated = token.is_some(), "session loaded");
        Ok(Self { token })
    }

    /// Persists `token` and makes it the active token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written; the session is
    /// left unchanged in that case.
    #[inline]
    pub fn log_in<S: TokenStore + ?Sized>(&mut self, store: &S, token: SecretString) -> Result<()> {
        store.store(&token)?;
        self.token = Some(token);
        tracing::debug!("session logged in");
        Ok(())
    }

    /// Drops the active token and removes it from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared. The in-memory
    /// token is dropped regardless.
    #[inline]
    pub fn log_out<S: TokenStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        self.token = None;
        tracing::debug!("session logged out");
        store.clear()
    }

    /// Returns `true` if a token is loaded.
    #[inline]
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builds the `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::MissingToken`] if no token is loaded.
    pub(crate) fn bearer(&self) -> Result<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
            .ok_or(FinanceError::MissingToken)
    }
}
