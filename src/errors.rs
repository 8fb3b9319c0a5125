//! Error types for Cellar Dump
//!
//! This module defines the error types for all components of the application.
//! Every error is fatal for the current run: nothing is retried, and the CLI
//! reports the message and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Authentication and credential-store errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No stored credentials for the configured service
    #[error("Not logged in. Run 'cellar_dump login' first")]
    MissingCredentials,

    /// Login POST did not yield the session cookie
    #[error("CellarTracker login failed. Please check your credentials and run 'cellar_dump login' again")]
    LoginFailed,

    /// Interactive input was rejected
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Platform secret store failure
    #[error("Secret store error: {0}")]
    SecretStore(#[from] keyring::Error),

    /// HTTP request failed during authentication
    #[error("HTTP request failed during authentication: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal I/O failed while prompting
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Table fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Server answered with a non-200 status or an HTML error page
    #[error("{url} gave HTTP {status}:\n{snippet}")]
    BadResponse {
        url: String,
        status: u16,
        snippet: String,
    },

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL built from configuration
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Dump run errors
#[derive(Error, Debug)]
pub enum DumpError {
    /// A table could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetched text is not well-formed delimited data
    #[error("Table {table} did not parse as CSV: {source}")]
    Parse {
        table: String,
        #[source]
        source: csv::Error,
    },

    /// Printing rows under `--show` failed
    #[error("Failed to print rows of table {table}: {source}")]
    Show {
        table: String,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist
    #[error("Output directory does not exist: {path}")]
    OutputDirMissing { path: PathBuf },

    /// Writing a table file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Dump error
    #[error(transparent)]
    Dump(#[from] DumpError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(AuthError::MissingCredentials) => "missing-credentials",
            AppError::Auth(_) => "authentication",
            AppError::Fetch(_) | AppError::Dump(DumpError::Fetch(_)) => "fetch",
            AppError::Dump(DumpError::Parse { .. }) => "parse",
            AppError::Dump(_) => "dump",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Dump result type alias
pub type DumpResult<T> = std::result::Result<T, DumpError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
