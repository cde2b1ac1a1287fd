use thiserror::Error;

/// Top-level error type for the `lidl-connect` crate.
///
/// Covers every failure mode: token acquisition, HTTP transport, GraphQL
/// envelope errors, response decoding, and the booking workflow. No variant
/// is retried internally -- every failure is fatal to the calling operation.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token endpoint rejected the password grant (wrong credentials,
    /// locked account, or a rejected bearer token on a later request).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── GraphQL ─────────────────────────────────────────────────────
    /// The GraphQL envelope carried one or more `errors` entries,
    /// or the endpoint answered with a non-success HTTP status.
    #[error("GraphQL error: {message}")]
    Graphql { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Domain ──────────────────────────────────────────────────────
    /// No tariff option matched either search key.
    #[error("Tariff not found -- name: {name:?}, id: {id:?}")]
    TariffNotFound {
        name: Option<String>,
        id: Option<String>,
    },

    /// A booking or confirmation mutation reported `success: false`
    /// (or omitted the process id). Carries the full response payload.
    #[error("{operation} failed: {payload}")]
    Booking {
        operation: &'static str,
        payload: serde_json::Value,
    },
}

impl Error {
    /// Returns `true` if this error indicates the credentials or token
    /// were rejected and re-authentication might resolve it.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a tariff lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TariffNotFound { .. })
    }
}
