//! Application constants for Cellar Dump
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Secret store keys and defaults
pub mod auth {
    /// Default service identifier in the platform secret store
    pub const DEFAULT_SERVICE_NAME: &str = "cellartracker-dump";

    /// Secret key holding the username
    pub const USERNAME_KEY: &str = "username";

    /// Secret key holding the password
    pub const PASSWORD_KEY: &str = "password";

    /// Name of the cookie the server sets on a successful login
    pub const SESSION_COOKIE: &str = "User";

    /// Referrer form field sent with the login POST
    pub const LOGIN_REFERRER: &str = "/default.asp";
}

/// CellarTracker service URLs and endpoints
pub mod cellartracker {
    /// Service base URL
    pub const BASE_URL: &str = "https://www.cellartracker.com";

    /// Login endpoint, relative to the base URL
    pub const LOGIN_PATH: &str = "password.asp";

    /// Table query endpoint, relative to the base URL
    pub const QUERY_PATH: &str = "xlquery.asp";

    /// Default export format
    pub const DEFAULT_FORMAT: &str = "csv";

    /// Marker of an HTML error page served with a 200 status
    pub const HTML_MARKER: &str = "<html>";

    /// Maximum body characters echoed in fetch error messages
    pub const ERROR_SNIPPET_CHARS: usize = 200;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("cellar_dump/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// TCP keep-alive interval
    pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);
}

/// File operation constants
pub mod files {
    /// Extension of every written table file
    pub const TABLE_FILE_EXTENSION: &str = "csv";

    /// Temporary file suffix for atomic writes
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "cellar-dump.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "cellar-dump";

    /// Configuration file name under the user config dir
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use auth::DEFAULT_SERVICE_NAME;
pub use cellartracker::BASE_URL as CELLARTRACKER_BASE_URL;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
