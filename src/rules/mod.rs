//! Linter framework
//!
//! Each linter implements the [`Linter`] trait and inspects the catalog one
//! table at a time. Run-scoped accumulation (graphs, grouping maps) lives in
//! the linter's `State`, created by `start` and consumed by `end`, so a
//! linter can never be visited outside of a run.

use thiserror::Error;

use crate::catalog::{Catalog, Column, Table, TableType};
use crate::config::{ConfigError, InclusionRule, LinterConfig};
use crate::connection::Connection;

mod collector;
mod lint;
mod linter_id;
mod severity;

#[cfg(test)]
pub mod test_helpers;

mod catalog_sql;
mod column_types;
mod foreign_key_mismatch;
mod foreign_key_self_reference;
mod foreign_key_with_no_indexes;
mod null_columns_in_index;
mod null_intended_columns;
mod redundant_indexes;
mod table_all_nullable_columns;
mod table_cycle;
mod table_empty;
mod table_sql;
mod table_with_badly_named_columns;
mod table_with_incrementing_columns;
mod table_with_no_indexes;
mod table_with_no_primary_key;
mod table_with_no_remarks;
mod table_with_no_surrogate_primary_key;
mod table_with_primary_key_not_first;
mod table_with_quoted_names;
mod table_with_single_column;
mod useless_surrogate_key;

pub use collector::LintCollector;
pub use lint::{Lint, LintObject, LintSubject, LintValue};
pub use linter_id::LinterId;
pub use severity::Severity;

/// Precondition violations that abort a single linter's run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("{kind} '{name}' is missing from the catalog")]
    MissingObject { kind: &'static str, name: String },

    #[error("linter {0} needs a database connection but none was provided")]
    ConnectionRequired(LinterId),
}

/// Table types visited by linters that don't say otherwise.
pub const BASE_TABLES: &[TableType] = &[TableType::Table];

/// A lint rule with a `configure → start → lint(table)* → end` lifecycle.
pub trait Linter {
    /// Run-scoped accumulator, created by [`Linter::start`].
    type State: Default;

    /// True for linters that query the live database.
    fn uses_connection(&self) -> bool {
        false
    }

    /// Table types passed to [`Linter::lint`].
    fn table_types(&self) -> &'static [TableType] {
        BASE_TABLES
    }

    /// Apply linter-specific properties. A failure excludes this linter
    /// instance from the run.
    fn configure(&mut self, _config: &LinterConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Called once before any table. The default starts from an empty
    /// state.
    fn start(&self, _ctx: &mut LintContext<'_>) -> Result<Self::State, LintError> {
        Ok(Default::default())
    }

    fn lint(
        &self,
        state: &mut Self::State,
        table: &Table,
        ctx: &mut LintContext<'_>,
    ) -> Result<(), LintError>;

    fn end(&self, _state: Self::State, _ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        Ok(())
    }
}

/// Object-safe view of a [`Linter`] that drives the whole lifecycle.
pub trait LinterRun {
    fn needs_connection(&self) -> bool;

    fn apply_config(&mut self, config: &LinterConfig) -> Result<(), ConfigError>;

    /// `start`, then `lint` for every included table of a matching type,
    /// then `end`.
    fn execute(&self, ctx: &mut LintContext<'_>) -> Result<(), LintError>;
}

impl<L: Linter> LinterRun for L {
    fn needs_connection(&self) -> bool {
        self.uses_connection()
    }

    fn apply_config(&mut self, config: &LinterConfig) -> Result<(), ConfigError> {
        self.configure(config)
    }

    fn execute(&self, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let catalog = ctx.catalog;
        let mut state = self.start(ctx)?;
        for table in catalog.tables() {
            if !self.table_types().contains(&table.table_type) || !ctx.includes_table(table) {
                continue;
            }
            self.lint(&mut state, table, ctx)?;
        }
        self.end(state, ctx)
    }
}

/// Everything a linter can see and do during one run.
pub struct LintContext<'a> {
    pub catalog: &'a Catalog,
    connection: Option<&'a dyn Connection>,
    linter_id: LinterId,
    severity: Severity,
    tables: &'a InclusionRule,
    columns: &'a InclusionRule,
    collector: &'a mut LintCollector,
}

impl<'a> LintContext<'a> {
    pub(crate) fn new(
        catalog: &'a Catalog,
        connection: Option<&'a dyn Connection>,
        linter_id: LinterId,
        severity: Severity,
        tables: &'a InclusionRule,
        columns: &'a InclusionRule,
        collector: &'a mut LintCollector,
    ) -> Self {
        Self {
            catalog,
            connection,
            linter_id,
            severity,
            tables,
            columns,
            collector,
        }
    }

    pub fn linter_id(&self) -> LinterId {
        self.linter_id
    }

    /// Severity lints are reported with: the configured override or the
    /// linter's default.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn connection(&self) -> Result<&'a dyn Connection, LintError> {
        self.connection
            .ok_or(LintError::ConnectionRequired(self.linter_id))
    }

    pub fn includes_table(&self, table: &Table) -> bool {
        self.tables.matches(&table.full_name())
    }

    pub fn includes_column(&self, table: &Table, column: &Column) -> bool {
        self.columns
            .matches(&format!("{}.{}", table.full_name(), column.name))
    }

    /// The table's columns that pass the column filter, in table order.
    pub fn columns<'t>(&self, table: &'t Table) -> Vec<&'t Column> {
        table
            .columns
            .iter()
            .filter(|c| self.includes_column(table, c))
            .collect()
    }

    pub fn add_catalog_lint(&mut self, message: impl Into<String>, value: Option<LintValue>) {
        self.push(message.into(), value, LintSubject::Catalog);
    }

    pub fn add_table_lint(
        &mut self,
        table: &Table,
        message: impl Into<String>,
        value: Option<LintValue>,
    ) {
        self.push(
            message.into(),
            value,
            LintSubject::Table {
                table: table.table_ref(),
                object: None,
            },
        );
    }

    pub fn add_object_lint(
        &mut self,
        table: &Table,
        object: LintObject,
        message: impl Into<String>,
        value: Option<LintValue>,
    ) {
        self.push(
            message.into(),
            value,
            LintSubject::Table {
                table: table.table_ref(),
                object: Some(object),
            },
        );
    }

    fn push(&mut self, message: String, value: Option<LintValue>, subject: LintSubject) {
        self.collector.add(Lint {
            linter_id: self.linter_id,
            severity: self.severity,
            message,
            value,
            subject,
        });
    }
}

/// Identity, metadata and factory for a linter.
pub trait LinterProvider: Send + Sync {
    /// Stable linter name, used in lints and configuration.
    fn id(&self) -> LinterId;

    fn default_severity(&self) -> Severity;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Detailed explanation for --explain.
    fn explain(&self) -> &'static str;

    /// A fresh, unconfigured linter instance.
    fn new_linter(&self) -> Box<dyn LinterRun>;
}

/// Registry of all linter providers.
pub struct LinterRegistry {
    providers: Vec<Box<dyn LinterProvider>>,
}

impl LinterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { providers: vec![] }
    }

    /// Register all built-in linters.
    pub fn register_defaults(&mut self) {
        use strum::IntoEnumIterator;
        LinterId::iter().for_each(|id| self.register(Box::new(id)));
    }

    /// Register a single provider.
    pub fn register(&mut self, provider: Box<dyn LinterProvider>) {
        self.providers.push(provider);
    }

    pub fn get(&self, id: LinterId) -> Option<&dyn LinterProvider> {
        self.providers.iter().find(|p| p.id() == id).map(|b| &**b)
    }

    /// Iterate all providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LinterProvider> {
        self.providers.iter().map(|b| &**b)
    }
}

impl Default for LinterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
