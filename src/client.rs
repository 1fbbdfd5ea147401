//! Client facade
//!
//! [`Client`] owns the shared transport, the token cache and the config.
//! Resource namespaces borrow it; paging iterators hold a cheap clone.

use crate::cache::{Cache, DefaultCache, ACCESS_TOKEN_KEY};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{PageRequest, PagedIter};
use crate::resources::{Aily, Contact, Im};
use crate::template::fill_path;
use crate::types::{JsonValue, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Parameters for a single request
///
/// Same bag as a page request: path params, query, headers and body.
pub type RequestOptions = PageRequest;

// ============================================================================
// API Response
// ============================================================================

/// Standard response body `{ code, msg, data }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Business status code, 0 on success
    #[serde(default)]
    pub code: i64,
    /// Human readable status
    #[serde(default)]
    pub msg: String,
    /// Response payload, pagination fields included
    #[serde(default)]
    pub data: JsonValue,
}

impl ApiResponse {
    /// Build from a raw body; an empty body is a successful empty response
    pub fn from_value(body: JsonValue) -> Result<Self> {
        if body.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(body)
            .map_err(|e| Error::decode(format!("Unexpected response shape: {e}")))
    }

    /// Check whether the platform reported success
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// The payload, or `Error::Api` for a non-zero code
    pub fn into_result(self) -> Result<JsonValue> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::api(self.code, self.msg))
        }
    }

    /// Deserialize the payload into a caller type
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| Error::decode(format!("Invalid response data: {e}")))
    }
}

// ============================================================================
// Client
// ============================================================================

struct ClientInner {
    http: HttpClient,
    config: ClientConfig,
    cache: Arc<dyn Cache>,
}

/// Entry point to the API
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client from a config with the default cache
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::new(config).build()
    }

    /// Start building a client
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The cache holding the access token
    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.inner.cache
    }

    /// Store an access token, taking precedence over the configured one
    pub async fn set_access_token(&self, token: impl Into<String>, ttl: Option<Duration>) {
        self.inner
            .cache
            .set(ACCESS_TOKEN_KEY, token.into(), ttl)
            .await;
    }

    /// The token requests are signed with: cache first, then config
    pub async fn access_token(&self) -> Option<String> {
        match self.inner.cache.get(ACCESS_TOKEN_KEY).await {
            Some(token) => Some(token),
            None => self.inner.config.access_token.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Resource namespaces
    // ------------------------------------------------------------------------

    /// Messaging: chats and messages
    pub fn im(&self) -> Im<'_> {
        Im::new(self)
    }

    /// Contacts: users and departments
    pub fn contact(&self) -> Contact<'_> {
        Contact::new(self)
    }

    /// AI assistant sessions
    pub fn aily(&self) -> Aily<'_> {
        Aily::new(self)
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Issue one request and return the standard response
    ///
    /// Transport and decode errors are logged before being returned.
    pub async fn request(
        &self,
        method: Method,
        path_template: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let body = self.request_raw(method, path_template, options).await?;
        ApiResponse::from_value(body).inspect_err(|err| {
            error!(%method, path = path_template, error = %err, "Malformed response");
        })
    }

    /// Issue one request and return the raw JSON body
    pub async fn request_raw(
        &self,
        method: Method,
        path_template: &str,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        self.send(method, path_template, options)
            .await
            .inspect_err(|err| {
                error!(%method, path = path_template, error = %err, "Request failed");
            })
    }

    /// Iterate over the pages of a list endpoint
    pub fn paginate(&self, method: Method, path_template: &str, request: PageRequest) -> PagedIter {
        let client = self.clone();
        let path_template = path_template.to_string();

        PagedIter::new(
            move |page: PageRequest| {
                let client = client.clone();
                let path_template = path_template.clone();
                async move { client.send(method, &path_template, page).await }
            },
            request,
        )
    }

    /// Build and dispatch without logging
    async fn send(
        &self,
        method: Method,
        path_template: &str,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        let path = fill_path(path_template, &options.path)?;

        let mut config = RequestConfig {
            query: options.query,
            headers: options.headers,
            body: options.body,
            ..RequestConfig::default()
        };

        let has_authorization = config
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("authorization"));
        if !has_authorization {
            if let Some(token) = self.access_token().await {
                config
                    .headers
                    .insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }

        debug!(%method, %path, "Dispatching request");
        self.inner.http.request_json(method, &path, config).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("domain", &self.inner.config.domain)
            .field("app_id", &self.inner.config.app_id)
            .field("http", &self.inner.http)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Client Builder
// ============================================================================

/// Builder for [`Client`]
pub struct ClientBuilder {
    config: ClientConfig,
    http: Option<HttpClientConfig>,
    cache: Option<Arc<dyn Cache>>,
}

impl ClientBuilder {
    /// Start from a config
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: None,
            cache: None,
        }
    }

    /// Use a transport config instead of deriving one from the client config
    #[must_use]
    pub fn http_config(mut self, http: HttpClientConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Use a custom cache
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        self.config.validate()?;
        let http_config = self
            .http
            .unwrap_or_else(|| self.config.to_http_config());
        let http = HttpClient::with_config(http_config)?;
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(DefaultCache::new()));

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
                cache,
            }),
        })
    }
}
