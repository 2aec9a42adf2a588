//! null-columns-in-index: Unique indexes over nullable columns

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Unique index that includes nullable columns";

pub(super) const EXPLAIN: &str = "null-columns-in-index: Nullable columns in unique index\n\
         \n\
         What it detects:\n\
         A unique index where at least one indexed column allows NULL.\n\
         \n\
         Why it matters:\n\
         Most databases treat NULLs as distinct in unique indexes, so rows\n\
         that look like duplicates are accepted as long as one indexed\n\
         column is NULL.\n\
         \n\
         Fix:\n\
         Make the columns NOT NULL, or use NULLS NOT DISTINCT where the\n\
         database supports it.";

const MESSAGE: &str = "unique index with nullable columns";

pub(super) struct NullColumnsInIndex;

impl Linter for NullColumnsInIndex {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        for index in table.indexes.iter().filter(|i| i.unique) {
            let has_nullable = index
                .column_names()
                .into_iter()
                .filter_map(|name| table.get_column(name))
                .any(|c| c.nullable);
            if has_nullable {
                ctx.add_object_lint(
                    table,
                    LintObject::Index(index.name.clone()),
                    MESSAGE,
                    Some(LintValue::Text(index.name.clone())),
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
    fn test_only_unique_indexes_checked() {
        let catalog = CatalogBuilder::new()
            .table("people", |t| {
                t.column("id", "integer", false)
                    .column("email", "varchar", true)
                    .column("nick", "varchar", true)
                    .column("ssn", "varchar", false)
                    .index("uq_email", &["email"], true)
                    .index("idx_nick", &["nick"], false)
                    .index("uq_ssn", &["ssn"], true);
            })
            .build();
        let lints = run_linter(LinterId::NullColumnsInIndex, &catalog);
        let names: Vec<String> = lints.iter().filter_map(|l| l.value_text()).collect();
        assert_eq!(names, vec!["uq_email"]);
    }
}
