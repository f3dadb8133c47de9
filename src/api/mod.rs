//! # API Module
//!
//! Thin HTTP client for the NewReleases API. Each submodule declares the
//! service trait the commands depend on and implements it for [`Client`]:
//!
//! - [`auth`] - auth key exchange and listing
//! - [`projects`] - tracked project management
//! - [`releases`] - project releases and release notes
//! - [`providers`] - project providers
//! - [`tags`] - tag management
//! - [`integrations`] - notification channels and webhooks
//!
//! Requests are authenticated with the `X-Key` header, except the key
//! exchange which uses the account email and password. Responses are mapped
//! to [`ApiError`] variants by status code so commands can react to
//! "not found" or "unauthorized" without inspecting messages.

pub mod auth;
mod error;
pub mod integrations;
pub mod projects;
pub mod providers;
pub mod releases;
pub mod tags;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url, header};
use serde::de::DeserializeOwned;

use crate::{
    Res,
    config::{Config, ConfigError, DEFAULT_TIMEOUT},
    types::ErrorResponse,
};

pub use auth::{AuthKeysGetter, AuthService};
pub use error::ApiError;
pub use integrations::{IntegrationsService, WebhookKind};
pub use projects::ProjectsService;
pub use providers::ProvidersService;
pub use releases::ReleasesService;
pub use tags::TagsService;

pub const DEFAULT_BASE_URL: &str = "https://api.newreleases.io/";

const AUTH_KEY_HEADER: &str = "X-Key";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    auth_key: Option<String>,
    timeout: Duration,
}

impl Client {
    /// Creates a client. Without an auth key only the key exchange works.
    pub fn new(auth_key: Option<String>, options: ClientOptions) -> Result<Self, ApiError> {
        let raw = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment unless the base ends with a slash
        let normalized = if raw.ends_with('/') {
            raw.clone()
        } else {
            format!("{raw}/")
        };
        let base_url = Url::parse(&normalized).map_err(|_| ApiError::InvalidEndpoint(raw))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("newreleases-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url,
            auth_key,
            timeout: options.timeout,
        })
    }

    /// Creates an authenticated client from the resolved configuration.
    pub fn from_config(config: &Config) -> Res<Self> {
        let auth_key = config
            .auth_key
            .clone()
            .ok_or(ConfigError::AuthKeyNotConfigured)?;

        Ok(Self::new(Some(auth_key), Self::options(config))?)
    }

    /// Creates a client for the key exchange, which needs no auth key.
    pub fn anonymous(config: &Config) -> Result<Self, ApiError> {
        Self::new(None, Self::options(config))
    }

    fn options(config: &Config) -> ClientOptions {
        ClientOptions {
            base_url: config.api_endpoint.clone(),
            timeout: config.timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| ApiError::InvalidEndpoint(format!("{}{}", self.base_url, path)))?;

        tracing::debug!(%method, %url, "api request");

        let mut builder = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json");
        if let Some(key) = &self.auth_key {
            builder = builder.header(AUTH_KEY_HEADER, key);
        }
        Ok(builder)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?;
        Self::json(builder).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path)?;
        Self::send(builder).await.map(|_| ())
    }

    pub(crate) async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;
        check_status(response).await
    }

    pub(crate) async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        Self::send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(ApiError::from_reqwest)
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "api response");

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(ApiError::RateLimited { retry_after })
        }
        _ => {
            let code = status.as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected response")
                        .to_lowercase()
                });
            Err(ApiError::Status { code, message })
        }
    }
}
