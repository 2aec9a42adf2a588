//! table-with-no-primary-key: Tables without a primary key

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Table without a primary key";

pub(super) const EXPLAIN: &str = "table-with-no-primary-key: Missing primary key\n\
         \n\
         What it detects:\n\
         A base table with no primary key constraint.\n\
         \n\
         Why it matters:\n\
         Without a primary key rows cannot be addressed reliably, duplicates\n\
         are possible, and other tables have nothing to reference.\n\
         Replication and many ORMs also require one.\n\
         \n\
         Fix:\n\
         Add a primary key, or a surrogate identity column if no natural\n\
         key exists.";

const MESSAGE: &str = "no primary key";

pub(super) struct TableWithNoPrimaryKey;

impl Linter for TableWithNoPrimaryKey {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if table.primary_key.is_none() {
            ctx.add_table_lint(table, MESSAGE, None);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::builder::CatalogBuilder;
    use crate::rules::test_helpers::*;
    use crate::rules::{LinterId, Severity};

    #[test]
    fn test_missing_pk_is_high() {
        let catalog = CatalogBuilder::new()
            .table("events", |t| {
                t.column("at", "timestamp", false)
                    .index("idx_at", &["at"], false);
            })
            .table("users", |t| {
                t.column("id", "integer", false).pk(&["id"]);
            })
            .build();
        let lints = run_linter(LinterId::TableWithNoPrimaryKey, &catalog);
        assert_eq!(tables(&lints), vec!["public.events"]);
        assert_eq!(lints[0].severity, Severity::High);
    }

    #[test]
    fn test_views_are_ignored() {
        let catalog = CatalogBuilder::new()
            .table("v_users", |t| {
                t.column("id", "integer", false).view();
            })
            .build();
        assert!(run_linter(LinterId::TableWithNoPrimaryKey, &catalog).is_empty());
    }
}
