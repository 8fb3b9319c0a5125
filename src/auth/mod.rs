//! Authentication management for CellarTracker credentials
//!
//! This module stores and retrieves the account's username and password in the
//! platform secret store.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cellar_dump::auth::CredentialStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::keyring("cellartracker-dump");
//! let (username, _password) = store.get()?;
//! println!("Logged in as {}", username);
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{
    CredentialStore, KeyringStore, MemoryStore, SecretStore, prompt_credentials,
    read_credentials, setup_credentials,
};
