//! catalog-sql: User-supplied SQL check run once per catalog

use tracing::{debug, warn};

use crate::catalog::Table;
use crate::config::{ConfigError, LinterConfig};
use crate::rules::{LintContext, LintError, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Custom SQL query run once against the database";

pub(super) const EXPLAIN: &str = "catalog-sql: Custom catalog-wide SQL check\n\
         \n\
         What it detects:\n\
         Whatever the configured query detects. The query runs once, before\n\
         any table is visited, and reports a catalog-level lint when it\n\
         returns a non-null value.\n\
         \n\
         Configuration:\n\
           [[linter]]\n\
           id = \"catalog-sql\"\n\
           [linter.config]\n\
           message = \"orders without customers\"\n\
           sql = \"SELECT COUNT(*) FROM orders o LEFT JOIN customers c ON ...\"\n\
         \n\
         Both message and sql are required.\n\
         \n\
         Why it matters:\n\
         Cross-table data rules do not belong to any single table.\n\
         \n\
         Fix:\n\
         Depends on the configured check.";

#[derive(Debug, Default)]
pub(super) struct CatalogSql {
    message: String,
    sql: String,
}

impl Linter for CatalogSql {
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
        let connection = ctx.connection()?;
        debug!(sql = %self.sql, "Running catalog SQL");
        match connection.query_scalar(&self.sql) {
            Ok(Some(value)) => {
                ctx.add_catalog_lint(self.message.as_str(), Some(LintValue::Text(value)));
            }
            Ok(None) => {}
            Err(e) => warn!("Catalog query failed: {e}"),
        }
        Ok(())
    }

    fn lint(&self, _: &mut (), _table: &Table, _ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builder::CatalogBuilder;
    use crate::rules::test_helpers::*;
    use crate::rules::{LintSubject, LinterId};

    fn config() -> LinterConfig {
        LinterConfig::new(LinterId::CatalogSql)
            .with_property("message", "orphaned orders")
            .with_property("sql", "SELECT COUNT(*) FROM orphans")
    }

    fn catalog() -> crate::catalog::Catalog {
        CatalogBuilder::new()
            .table("a", |t| {
                t.column("id", "integer", false);
            })
            .table("b", |t| {
                t.column("id", "integer", false);
            })
            .build()
    }

    #[test]
    fn test_runs_exactly_once() {
        let conn = FakeConnection::new().respond("SELECT COUNT(*) FROM orphans", Some("12"));
        let lints = try_run(&config(), &catalog(), Some(&conn)).expect("run");

        assert_eq!(conn.queries().len(), 1);
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].subject, LintSubject::Catalog);
        assert_eq!(lints[0].value, Some(LintValue::Text("12".into())));
    }

    #[test]
    fn test_null_result_is_silent() {
        let conn = FakeConnection::new();
        assert!(try_run(&config(), &catalog(), Some(&conn)).expect("run").is_empty());
    }

    #[test]
    fn test_query_error_is_not_fatal() {
        let conn = FakeConnection::new().fail("SELECT COUNT(*) FROM orphans", "boom");
        assert!(try_run(&config(), &catalog(), Some(&conn)).expect("run").is_empty());
    }

    #[test]
    fn test_requires_message_and_sql() {
        let mut linter = CatalogSql::default();
        assert!(linter.configure(&LinterConfig::new(LinterId::CatalogSql)).is_err());
        assert!(linter.configure(&config()).is_ok());
    }
}
