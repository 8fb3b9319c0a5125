//! HTTP session for CellarTracker
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `auth`: the login form exchange

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::app::dump::TableSource;
use crate::app::tables::TableRequest;
use crate::constants::cellartracker;
use crate::errors::{AuthError, AuthResult, FetchError, FetchResult};

// Module declarations
pub mod auth;
pub mod config;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;

use auth::AuthHandler;

/// Authenticated session against one CellarTracker base URL
///
/// A value of this type only exists after the login response carried the
/// session cookie.
#[derive(Debug)]
pub struct CellarClient {
    client: Client,
    base_url: Url,
}

impl CellarClient {
    /// Logs in to the default CellarTracker service
    pub async fn connect(username: &str, password: &str) -> AuthResult<Self> {
        Self::connect_with_config(
            cellartracker::BASE_URL,
            username,
            password,
            &ClientConfig::default(),
        )
        .await
    }

    /// Logs in to `base_url` with a custom client configuration
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if:
    /// - The base URL is invalid
    /// - HTTP client creation fails
    /// - The login request fails
    /// - The response lacks the session cookie
    pub async fn connect_with_config(
        base_url: &str,
        username: &str,
        password: &str,
        config: &ClientConfig,
    ) -> AuthResult<Self> {
        let base_url = parse_base_url(base_url).map_err(|e| AuthError::InvalidInput {
            reason: e.to_string(),
        })?;
        let client = config.build_http_client()?;

        AuthHandler::authenticate(&client, &base_url, username, password).await?;

        tracing::info!("Successfully authenticated with {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Fetches one table as text
    ///
    /// # Errors
    ///
    /// Returns `FetchError::BadResponse` when the status is not 200 or the body
    /// is an HTML page, and `FetchError::Http` on transport failure.
    pub async fn fetch_table(&self, table: &TableRequest) -> FetchResult<String> {
        let url = self.query_url(table)?;
        tracing::info!("Fetching table {}", table.name);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let url = response.url().to_string();
        let status = response.status();
        let text = response.text().await?;

        check_table_response(&url, status, &text)?;

        tracing::debug!("Table {} fetched: {} bytes", table.name, text.len());
        Ok(text)
    }

    /// Get the base URL of the session
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn query_url(&self, table: &TableRequest) -> FetchResult<Url> {
        let mut url = self
            .base_url
            .join(cellartracker::QUERY_PATH)
            .map_err(|e| FetchError::InvalidUrl {
                url: self.base_url.to_string(),
                error: e.to_string(),
            })?;
        url.query_pairs_mut().extend_pairs(table.query_pairs());
        Ok(url)
    }
}

#[async_trait]
impl TableSource for CellarClient {
    async fn fetch_table(&self, table: &TableRequest) -> FetchResult<String> {
        CellarClient::fetch_table(self, table).await
    }
}

/// Parse a base URL, making sure relative joins keep its path
pub fn parse_base_url(base_url: &str) -> FetchResult<Url> {
    let with_slash = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&with_slash).map_err(|e| FetchError::InvalidUrl {
        url: base_url.to_string(),
        error: e.to_string(),
    })
}

/// Reject non-200 responses and HTML error pages served as data
fn check_table_response(url: &str, status: StatusCode, body: &str) -> FetchResult<()> {
    if status == StatusCode::OK && !body.contains(cellartracker::HTML_MARKER) {
        return Ok(());
    }

    let snippet: String = body
        .chars()
        .take(cellartracker::ERROR_SNIPPET_CHARS)
        .collect();
    tracing::warn!("Table request {} failed with HTTP {}", url, status.as_u16());

    Err(FetchError::BadResponse {
        url: url.to_string(),
        status: status.as_u16(),
        snippet,
    })
}
