//! table-with-primary-key-not-first: Primary key columns not leading the table

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Primary key columns are not the first columns of the table";

pub(super) const EXPLAIN: &str = "table-with-primary-key-not-first: Primary key not first\n\
         \n\
         What it detects:\n\
         A table whose leading columns, as many as the primary key has, are\n\
         not all primary key columns.\n\
         \n\
         Why it matters:\n\
         Readers expect the identifying columns first. Tools that list\n\
         columns in table order bury the key otherwise.\n\
         \n\
         Fix:\n\
         Reorder the columns in the table definition so the primary key\n\
         comes first.";

const MESSAGE: &str = "primary key not first";

pub(super) struct TableWithPrimaryKeyNotFirst;

impl Linter for TableWithPrimaryKeyNotFirst {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let Some(pk) = &table.primary_key else {
            return Ok(());
        };
        let mut columns: Vec<_> = table.columns.iter().collect();
        columns.sort_by_key(|c| c.ordinal_position);
        let leading_are_keys = columns
            .iter()
            .take(pk.columns.len())
            .all(|c| table.is_primary_key_column(&c.name));
        if !leading_are_keys {
            ctx.add_table_lint(table, MESSAGE, None);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::builder::CatalogBuilder;
    use crate::rules::LinterId;
    use crate::rules::test_helpers::*;

    #[test]
    fn test_key_after_data_column() {
        let catalog = CatalogBuilder::new()
            .table("late", |t| {
                t.column("name", "varchar", true)
                    .column("id", "integer", false)
                    .pk(&["id"]);
            })
            .table("early", |t| {
                t.column("id", "integer", false)
                    .column("name", "varchar", true)
                    .pk(&["id"]);
            })
            .build();
        let lints = run_linter(LinterId::TableWithPrimaryKeyNotFirst, &catalog);
        assert_eq!(tables(&lints), vec!["public.late"]);
    }

    #[test]
    fn test_composite_key_order_within_prefix_is_free() {
        let catalog = CatalogBuilder::new()
            .table("lines", |t| {
                t.column("line_no", "integer", false)
                    .column("order_id", "integer", false)
                    .column("qty", "integer", true)
                    .pk(&["order_id", "line_no"]);
            })
            .build();
        assert!(run_linter(LinterId::TableWithPrimaryKeyNotFirst, &catalog).is_empty());
    }
}
