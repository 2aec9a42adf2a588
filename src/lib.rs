//! schema-lint: Static analyzer for crawled database schema catalogs
//!
//! This library loads a catalog of schemas, tables, columns, keys and
//! indexes, runs a configurable set of linters over it, and collects the
//! resulting lints. Linters that need live data can query the database
//! through a [`connection::Connection`].

pub mod catalog;
pub mod config;
pub mod connection;
pub mod engine;
pub mod output;
pub mod rules;
pub mod util;

// Re-export commonly used types
pub use catalog::{Catalog, Table, TableRef};
pub use config::{Config, LinterConfig};
pub use engine::{LintEngine, LintRun};
pub use rules::{Lint, LintCollector, LinterId, LinterRegistry, Severity};
