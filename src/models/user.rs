//! Authentication payloads and the user profile.

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use super::UserId;

/// A registered user as returned by `POST /auth/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Login email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct Credentials {
    /// Login email address.
    pub email: String,
    /// Plain-text password, only exposed while serializing the request.
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

impl Credentials {
    /// Creates login credentials.
    #[inline]
    #[must_use]
    pub fn new<E: Into<String>, P: Into<String>>(email: E, password: P) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub struct SignUp {
    /// Login email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plain-text password, only exposed while serializing the request.
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

impl SignUp {
    /// Creates a sign-up request.
    #[inline]
    #[must_use]
    pub fn new<E: Into<String>, N: Into<String>, P: Into<String>>(
        email: E,
        name: N,
        password: P,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Body of `POST /auth/change_password`.
#[derive(Debug, Serialize)]
pub struct ChangePassword {
    /// Replacement password, only exposed while serializing the request.
    #[serde(serialize_with = "serialize_secret")]
    pub new_password: SecretString,
}

impl ChangePassword {
    /// Creates a password change request.
    #[inline]
    #[must_use]
    pub fn new<P: Into<String>>(new_password: P) -> Self {
        Self {
            new_password: SecretString::from(new_password.into()),
        }
    }
}

/// Body of `POST /auth/change_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEmail {
    /// Replacement login email.
    pub new_email: String,
}

/// Body of `POST /auth/change_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeName {
    /// Replacement display name.
    pub new_name: String,
}

/// Successful login response.
#[derive(Debug, Deserialize)]
pub struct AccessToken {
    /// Bearer token for subsequent requests.
    pub access_token: SecretString,
    /// Token type, `"bearer"` for this backend.
    pub token_type: String,
}

/// Plain `{"detail": "..."}` acknowledgement or error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    /// Human-readable message.
    pub detail: String,
}

/// Writes a secret as a plain string into a request body.
fn serialize_secret<S: Serializer>(
    secret: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
