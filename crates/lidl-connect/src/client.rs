// Account client core
//
// Wraps `reqwest::Client` with token acquisition (password grant with
// expiry caching) and a GraphQL executor that attaches the bearer token
// per request. Domain operations (balance, tariffs, consumption) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{CachedToken, Credentials, TokenResponse, TokenType};
use crate::error::Error;
use crate::graphql::{GraphqlRequest, GraphqlResponse};
use crate::models::Tariff;
use crate::transport::TransportConfig;

/// Production API host.
pub const DEFAULT_HOST: &str = "https://api.lidl-connect.de";

/// OAuth2 client credentials for the password grant. Fixed by the API;
/// they identify the app, not the account.
const CLIENT_ID: &str = "lidl";
const CLIENT_SECRET: &str = "lidl";

const TOKEN_PATH: &str = "/api/token";
const GRAPHQL_PATH: &str = "/api/graphql";

/// Truncate a response body for error messages, backing up to a char
/// boundary so multibyte bodies never split mid-character.
fn preview(body: &str) -> &str {
    const MAX_PREVIEW: usize = 200;
    if body.len() <= MAX_PREVIEW {
        return body;
    }
    let mut end = MAX_PREVIEW;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Stateful client for one carrier account.
///
/// Holds the credentials for the object's lifetime and lazily caches
/// the bearer token, the bookable tariff listing, and resolved tariff
/// ids. All caches are invalidated only by dropping the client.
pub struct ConnectClient {
    http: reqwest::Client,
    host: Url,
    credentials: Credentials,
    /// At most one cached token per grant type.
    tokens: RwLock<HashMap<TokenType, CachedToken>>,
    /// Bookable tariff listing, fetched once per client instance.
    tariffs: RwLock<Option<Arc<Vec<Tariff>>>>,
    /// Memoized name -> tariffoption id lookups.
    tariff_ids: RwLock<HashMap<String, String>>,
}

impl ConnectClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client against the production host with default transport.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_host(Url::parse(DEFAULT_HOST)?, credentials, &TransportConfig::default())
    }

    /// Create a client against an arbitrary host (staging, mock server).
    pub fn with_host(
        host: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, host, credentials))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, host: Url, credentials: Credentials) -> Self {
        Self {
            http,
            host,
            credentials,
            tokens: RwLock::new(HashMap::new()),
            tariffs: RwLock::new(None),
            tariff_ids: RwLock::new(HashMap::new()),
        }
    }

    /// The API host this client talks to.
    pub fn host(&self) -> &Url {
        &self.host
    }

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.host.join(path).map_err(Error::InvalidUrl)
    }

    // ── Token acquisition ────────────────────────────────────────────

    /// The current bearer token value, fetching or refreshing as needed.
    pub async fn access_token(&self) -> Result<SecretString, Error> {
        Ok(self.get_token(TokenType::Bearer).await?.access_token)
    }

    /// Return the cached token for `token_type` while its expiry is
    /// strictly in the future; otherwise request a fresh one.
    pub async fn get_token(&self, token_type: TokenType) -> Result<CachedToken, Error> {
        {
            let cache = self.tokens.read().expect("token lock poisoned");
            if let Some(token) = cache.get(&token_type) {
                if token.is_valid(Utc::now()) {
                    return Ok(token.clone());
                }
            }
        }
        self.request_token(token_type).await
    }

    /// Perform the grant request for `token_type` and overwrite the
    /// cache entry for that type. No retry on failure.
    pub async fn request_token(&self, token_type: TokenType) -> Result<CachedToken, Error> {
        let url = self.api_url(TOKEN_PATH)?;
        debug!("requesting {token_type:?} token from {url}");

        let params = match token_type {
            TokenType::Bearer => [
                ("grant_type", "password"),
                ("client_id", CLIENT_ID),
                ("client_secret", CLIENT_SECRET),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.expose_secret()),
            ],
        };

        let resp = self.http.post(url).form(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Deserialization {
                message: format!("token response: {e}"),
                body: body.clone(),
            }
        })?;

        if let Some(ref kind) = token.token_type {
            debug!("received {kind} token, valid for {}s", token.expires_in);
        }

        let cached = CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(token.expires_in),
        };
        self.tokens
            .write()
            .expect("token lock poisoned")
            .insert(token_type, cached.clone());
        Ok(cached)
    }

    // ── GraphQL executor ─────────────────────────────────────────────

    /// Execute a GraphQL document and decode the `data` mapping into `T`.
    ///
    /// Obtains a fresh/cached bearer token and attaches it as an
    /// `Authorization: Bearer` header. `operation` is required when the
    /// document contains multiple named operations. Any entry in the
    /// envelope's `errors` array fails the call.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        operation: Option<&str>,
        variables: Option<serde_json::Value>,
    ) -> Result<T, Error> {
        let token = self.get_token(TokenType::Bearer).await?;
        let url = self.api_url(GRAPHQL_PATH)?;
        debug!("POST {url} operation={operation:?}");

        let request = GraphqlRequest {
            query,
            operation_name: operation,
            variables,
        };

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.access_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "bearer token rejected (HTTP 401)".into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Graphql {
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let body = resp.text().await?;
        let envelope: GraphqlResponse<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if let Some(message) = envelope.error_message() {
            return Err(Error::Graphql { message });
        }

        envelope.data.ok_or_else(|| Error::Deserialization {
            message: "GraphQL response has no data".into(),
            body,
        })
    }

    // ── Cache plumbing (used by the tariff operations) ───────────────

    pub(crate) fn cached_tariffs(&self) -> Option<Arc<Vec<Tariff>>> {
        self.tariffs.read().expect("tariff lock poisoned").clone()
    }

    pub(crate) fn store_tariffs(&self, listing: Vec<Tariff>) -> Arc<Vec<Tariff>> {
        let listing = Arc::new(listing);
        *self.tariffs.write().expect("tariff lock poisoned") = Some(Arc::clone(&listing));
        listing
    }

    pub(crate) fn cached_tariff_id(&self, name: &str) -> Option<String> {
        self.tariff_ids
            .read()
            .expect("tariff id lock poisoned")
            .get(name)
            .cloned()
    }

    pub(crate) fn store_tariff_id(&self, name: &str, id: &str) {
        self.tariff_ids
            .write()
            .expect("tariff id lock poisoned")
            .insert(name.to_owned(), id.to_owned());
    }
}
