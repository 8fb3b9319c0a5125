//! Core application logic for Cellar Dump
//!
//! This module contains the HTTP session, the table plan, CSV validation and
//! the dump runner that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cellar_dump::app::{default_tables, CellarClient, Dumper};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CellarClient::connect("alice", "secret").await?;
//! let summary = Dumper::new("./out", false)
//!     .run(&client, &default_tables())
//!     .await?;
//! println!("Wrote {} files", summary.files.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dump;
pub mod tables;
pub mod validate;

// Re-export main public API
pub use client::{CellarClient, ClientConfig};
pub use dump::{DumpObserver, DumpSummary, Dumper, NoopObserver, TableSource, table_path};
pub use tables::{TableRequest, default_tables};
pub use validate::validate_table;
