//! Prelude module for Cellar Dump Library
//!
//! Re-exports the items needed to run a dump from code with a single
//! `use cellar_dump::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cellar_dump::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = CredentialStore::keyring(DEFAULT_SERVICE_NAME);
//!     let (username, password) = store.get()?;
//!     let client = CellarClient::connect(&username, &password).await?;
//!     Dumper::new("./out", false).run(&client, &default_tables()).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Session, table plan and dump runner
pub use crate::app::{
    CellarClient, ClientConfig, DumpSummary, Dumper, TableRequest, TableSource, default_tables,
};

// Credentials
pub use crate::auth::{CredentialStore, MemoryStore, SecretStore};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{CELLARTRACKER_BASE_URL, DEFAULT_SERVICE_NAME};

// Common external crate re-exports for convenience
pub use tokio;
