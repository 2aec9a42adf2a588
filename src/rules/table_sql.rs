//! table-sql: User-supplied per-table SQL check
//!
//! Runs a configured query once per table. The placeholders `${table}`,
//! `${schema}` and `${tabletype}` are replaced before execution. A
//! non-null first column of the first row becomes the lint value.

use tracing::{debug, warn};

use crate::catalog::Table;
use crate::config::{ConfigError, LinterConfig};
use crate::rules::{LintContext, LintError, LintValue, Linter};
use crate::util::identifier;

pub(super) const DESCRIPTION: &str = "Custom SQL query run against every table";

pub(super) const EXPLAIN: &str = "table-sql: Custom per-table SQL check\n\
         \n\
         What it detects:\n\
         Whatever the configured query detects. The query runs once per\n\
         table and reports a lint when it returns a non-null value.\n\
         \n\
         Configuration:\n\
           [[linter]]\n\
           id = \"table-sql\"\n\
           [linter.config]\n\
           message = \"table has rows without a created date\"\n\
           sql = \"SELECT COUNT(*) FROM ${table} WHERE created IS NULL HAVING COUNT(*) > 0\"\n\
         \n\
         Placeholders: ${table} (quoted schema.table), ${schema} and\n\
         ${tabletype}. Both message and sql are required.\n\
         \n\
         Why it matters:\n\
         Lets teams encode data rules that no built-in linter covers.\n\
         \n\
         Fix:\n\
         Depends on the configured check.";

#[derive(Debug, Default)]
pub(super) struct TableSql {
    message: String,
    sql: String,
}

/// Expand the `${...}` placeholders for one table.
pub(super) fn expand_template(sql: &str, table: &Table) -> String {
    sql.replace("${table}", &identifier::quoted_table_name(table))
        .replace("${schema}", &table.schema)
        .replace("${tabletype}", table.table_type.as_str())
}

impl Linter for TableSql {
    type State = ();

    fn uses_connection(&self) -> bool {
        true
    }

    fn configure(&mut self, config: &LinterConfig) -> Result<(), ConfigError> {
        self.message = config.required_string("message")?.to_string();
        self.sql = config.required_string("sql")?.to_string();
        Ok(())
    }

    fn start(&self, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        ctx.connection()?;
        Ok(())
    }

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let connection = ctx.connection()?;
        let sql = expand_template(&self.sql, table);
        debug!(table = %table.full_name(), sql = %sql, "Running table SQL");

        match connection.query_scalar(&sql) {
            Ok(Some(value)) => {
                ctx.add_table_lint(table, self.message.as_str(), Some(LintValue::Text(value)));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(table = %table.full_name(), "Skipping table, query failed: {e}");
            }
        }
        Ok(())
    }
}
