//! table-all-nullable-columns: Every data column is nullable

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Every column outside the primary key allows NULL";

pub(super) const EXPLAIN: &str = "table-all-nullable-columns: All data columns nullable\n\
         \n\
         What it detects:\n\
         A table with at least one column outside the primary key, where\n\
         every such column is nullable.\n\
         \n\
         Why it matters:\n\
         A row with every data column NULL carries no information. Tables\n\
         like this usually had NOT NULL constraints forgotten.\n\
         \n\
         Fix:\n\
         Mark the columns that must always hold a value NOT NULL.";

const MESSAGE: &str = "all data columns are nullable";

pub(super) struct TableAllNullableColumns;

impl Linter for TableAllNullableColumns {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let mut data_columns = table
            .columns
            .iter()
            .filter(|c| !table.is_primary_key_column(&c.name))
            .peekable();
        if data_columns.peek().is_none() {
            return Ok(());
        }
        if data_columns.all(|c| c.nullable) {
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
    fn test_only_key_is_not_null() {
        let catalog = CatalogBuilder::new()
            .table("loose", |t| {
                t.column("id", "integer", false)
                    .column("a", "varchar", true)
                    .column("b", "varchar", true)
                    .pk(&["id"]);
            })
            .table("strict", |t| {
                t.column("id", "integer", false)
                    .column("a", "varchar", false)
                    .column("b", "varchar", true)
                    .pk(&["id"]);
            })
            .table("keys_only", |t| {
                t.column("id", "integer", false).pk(&["id"]);
            })
            .build();
        let lints = run_linter(LinterId::TableAllNullableColumns, &catalog);
        assert_eq!(tables(&lints), vec!["public.loose"]);
    }
}
