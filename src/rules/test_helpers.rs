//! Shared test helpers for linter unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::config::LinterConfig;
use crate::connection::{Connection, SqlError};
use crate::engine;
use crate::rules::{Lint, LintError, LinterId, LinterProvider};

/// Run one linter with default settings and no connection.
pub fn run_linter(id: LinterId, catalog: &Catalog) -> Vec<Lint> {
    run_configured(&LinterConfig::new(id), catalog)
}

/// Run one configured linter with no connection; the run must succeed.
pub fn run_configured(config: &LinterConfig, catalog: &Catalog) -> Vec<Lint> {
    try_run(config, catalog, None).unwrap_or_else(|e| panic!("{} failed: {e}", config.id))
}

/// Run one configured linter against an optional connection.
pub fn try_run(
    config: &LinterConfig,
    catalog: &Catalog,
    connection: Option<&dyn Connection>,
) -> Result<Vec<Lint>, LintError> {
    let mut linter = config.id.new_linter();
    linter
        .apply_config(config)
        .unwrap_or_else(|e| panic!("{} configuration rejected: {e}", config.id));
    let tables = config.table_rule().expect("valid table pattern");
    let columns = config.column_rule().expect("valid column pattern");
    let severity = config
        .severity()
        .unwrap_or_else(|| config.id.default_severity());

    engine::execute(
        linter.as_ref(),
        config.id,
        severity,
        &tables,
        &columns,
        catalog,
        connection,
    )
    .map(|c| c.into_vec())
}

pub fn messages(lints: &[Lint]) -> Vec<&str> {
    lints.iter().map(|l| l.message.as_str()).collect()
}

/// Display names of the tables the lints point at, in lint order.
pub fn tables(lints: &[Lint]) -> Vec<String> {
    lints
        .iter()
        .filter_map(|l| l.subject.table().map(ToString::to_string))
        .collect()
}

/// Canned-response connection that records every query it receives.
#[derive(Default)]
pub struct FakeConnection {
    responses: HashMap<String, Result<Option<String>, String>>,
    queries: RefCell<Vec<String>>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, sql: &str, value: Option<&str>) -> Self {
        self.responses
            .insert(sql.to_string(), Ok(value.map(str::to_string)));
        self
    }

    pub fn fail(mut self, sql: &str, message: &str) -> Self {
        self.responses
            .insert(sql.to_string(), Err(message.to_string()));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl Connection for FakeConnection {
    fn query_scalar(&self, sql: &str) -> Result<Option<String>, SqlError> {
        self.queries.borrow_mut().push(sql.to_string());
        match self.responses.get(sql) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(SqlError::Query(message.clone())),
            None => Ok(None),
        }
    }
}
