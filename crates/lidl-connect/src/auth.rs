// Authentication types
//
// The carrier API hands out short-lived bearer tokens via an OAuth2
// password grant. Tokens are cached per grant type and refreshed when
// their expiry timestamp has passed.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Which token grant to request from the token endpoint.
///
/// The API currently issues only bearer tokens; modelling the tag as an
/// enum keeps the grant parameters exhaustively matched at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Standard OAuth2 bearer token (password grant).
    Bearer,
}

/// Account credentials, supplied once at client construction.
///
/// The password stays wrapped in a [`SecretString`] and is only exposed
/// at the point the password grant is sent.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Raw response from `POST /api/token`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: SecretString,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A token held in the client's in-memory cache.
///
/// Never persisted; a restarted process always requests a fresh token.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// A token is usable only while its expiry is strictly in the future.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
