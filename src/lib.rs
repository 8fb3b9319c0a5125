//! Cellar Dump Library
//!
//! Logs in to CellarTracker and exports its tables as CSV files. Credentials
//! live in the platform secret store; every table is validated as CSV before
//! it is written.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(DEFAULT_SERVICE_NAME, "cellartracker-dump");
        assert_eq!(CELLARTRACKER_BASE_URL, "https://www.cellartracker.com");
        assert!(USER_AGENT.starts_with("cellar_dump/"));
    }

    #[test]
    fn test_error_types() {
        let auth_error = errors::AuthError::LoginFailed;
        let app_error = AppError::Auth(auth_error);

        assert_eq!(app_error.category(), "authentication");
    }
}
