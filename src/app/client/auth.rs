//! CellarTracker login exchange
//!
//! A single form POST to `password.asp`. The server signals success by
//! setting the `User` cookie; the HTTP status is not consulted.

use reqwest::{Client, Response};
use url::Url;

use crate::constants::{auth, cellartracker};
use crate::errors::{AuthError, AuthResult};

/// Handles CellarTracker authentication operations
pub struct AuthHandler;

impl AuthHandler {
    /// Performs the login POST and checks for the session cookie
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LoginFailed` if the response lacks the `User` cookie,
    /// or `AuthError::Http` if the request itself fails.
    pub async fn authenticate(
        client: &Client,
        base_url: &Url,
        username: &str,
        password: &str,
    ) -> AuthResult<()> {
        let login_url = Self::login_url(base_url)?;
        tracing::info!("Logging in to {} as {}", login_url, username);

        let response = client
            .post(login_url)
            .form(&Self::login_form(username, password))
            .send()
            .await
            .map_err(AuthError::Http)?;

        tracing::debug!("Login response status: {}", response.status());

        if !Self::has_session_cookie(&response) {
            tracing::warn!("Login response for {} carried no session cookie", username);
            return Err(AuthError::LoginFailed);
        }

        Ok(())
    }

    fn login_url(base_url: &Url) -> AuthResult<Url> {
        base_url
            .join(cellartracker::LOGIN_PATH)
            .map_err(|e| AuthError::InvalidInput {
                reason: format!("cannot build login URL from {}: {}", base_url, e),
            })
    }

    fn login_form<'a>(username: &'a str, password: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("Referrer", auth::LOGIN_REFERRER),
            ("szUser", username),
            ("szPassword", password),
            ("UseCookie", "true"),
        ]
    }

    fn has_session_cookie(response: &Response) -> bool {
        response
            .cookies()
            .any(|cookie| cookie.name() == auth::SESSION_COOKIE)
    }
}
