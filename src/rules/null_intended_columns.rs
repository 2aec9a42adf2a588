//! null-intended-columns: Defaults spelled as the string NULL

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Column whose default value is the literal NULL";

pub(super) const EXPLAIN: &str = "null-intended-columns: NULL default\n\
         \n\
         What it detects:\n\
         A column whose declared default value is the word NULL.\n\
         \n\
         Why it matters:\n\
         Depending on how the DDL was generated, the default may be the\n\
         four-character string 'NULL' rather than a real NULL, and rows get\n\
         that text silently.\n\
         \n\
         Fix:\n\
         Drop the default, or make the column nullable without one.";

const MESSAGE: &str = "column where NULL may be intended";

pub(super) struct NullIntendedColumns;

impl Linter for NullIntendedColumns {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        for column in ctx.columns(table) {
            let null_default = column
                .default_value
                .as_deref()
                .is_some_and(|d| d.trim().eq_ignore_ascii_case("NULL"));
            if null_default {
                ctx.add_object_lint(
                    table,
                    LintObject::Column(column.name.clone()),
                    MESSAGE,
                    Some(LintValue::Text(column.name.clone())),
                );
            }
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
    fn test_null_default_any_case() {
        let catalog = CatalogBuilder::new()
            .table("t", |t| {
                t.column_default("a", "varchar", true, "NULL")
                    .column_default("b", "varchar", true, " null ")
                    .column_default("c", "varchar", true, "'NULL'")
                    .column_default("d", "integer", false, "0")
                    .column("e", "integer", true);
            })
            .build();
        let lints = run_linter(LinterId::NullIntendedColumns, &catalog);
        let columns: Vec<String> = lints.iter().filter_map(|l| l.value_text()).collect();
        assert_eq!(columns, vec!["a", "b"]);
    }
}
