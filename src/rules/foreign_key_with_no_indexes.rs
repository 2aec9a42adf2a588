//! foreign-key-with-no-indexes: Foreign key without covering index
//!
//! Detects foreign keys whose referencing columns are not the leading
//! columns of any index on the table.

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};
use crate::util::prefix;

pub(super) const DESCRIPTION: &str = "Foreign key without covering index on referencing columns";

pub(super) const EXPLAIN: &str = "foreign-key-with-no-indexes: Foreign key without covering index\n\
         \n\
         What it detects:\n\
         A foreign key where the referencing table has no index whose\n\
         leading columns match the foreign key columns in order.\n\
         \n\
         Why it matters:\n\
         When a row is deleted or updated in the referenced (parent) table,\n\
         the database has to find the child rows that still point at it.\n\
         Without an index on the foreign key columns that lookup scans the\n\
         whole child table, once per affected parent row.\n\
         \n\
         Prefix matching:\n\
         Foreign key columns (a, b) are covered by index (a, b) or\n\
         (a, b, c) but NOT by (b, a) or (a). Column order matters.\n\
         \n\
         Tables with fewer than two indexes are not checked.\n\
         \n\
         Fix:\n\
         Create an index on the foreign key columns, in constraint order.";

const MESSAGE: &str = "foreign key with no index";

pub(super) struct ForeignKeyWithNoIndexes;

impl Linter for ForeignKeyWithNoIndexes {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if table.indexes.len() <= 1 {
            return Ok(());
        }

        let indexes: Vec<Vec<&str>> = table.indexes.iter().map(|i| i.column_names()).collect();
        for fk in &table.foreign_keys {
            let columns = fk.column_names();
            if let Some(missing) = columns.iter().find(|c| table.get_column(c).is_none()) {
                return Err(LintError::MissingObject {
                    kind: "column",
                    name: format!("{}.{}", table.full_name(), missing),
                });
            }

            let covered = indexes
                .iter()
                .any(|index| prefix::starts_with(index, &columns));
            if !covered {
                ctx.add_object_lint(
                    table,
                    LintObject::ForeignKey(fk.name.clone()),
                    MESSAGE,
                    Some(LintValue::Text(fk.name.clone())),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::catalog::builder::CatalogBuilder;
    use crate::config::LinterConfig;
    use crate::rules::test_helpers::*;
    use crate::rules::{LintError, LinterId};

    fn child_with_indexes(indexes: &[(&str, &[&str])]) -> Catalog {
        CatalogBuilder::new()
            .table("parent", |t| {
                t.column("id", "integer", false)
                    .column("code", "integer", false)
                    .pk(&["id", "code"]);
            })
            .table("child", |t| {
                t.column("id", "integer", false)
                    .column("pid", "integer", false)
                    .column("pcode", "integer", false)
                    .pk(&["id"])
                    .fk("fk_parent", &["pid", "pcode"], "parent", &["id", "code"]);
                for (name, cols) in indexes {
                    t.index(name, cols, false);
                }
            })
            .build()
    }

    #[test]
    fn test_fk_no_index_fires() {
        let catalog = child_with_indexes(&[("idx_id", &["id"]), ("idx_pcode", &["pcode"])]);
        let lints = run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog);
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].message, "foreign key with no index");
        assert_eq!(tables(&lints), vec!["public.child"]);
    }

    #[test]
    fn test_exact_index_covers() {
        let catalog = child_with_indexes(&[("idx_id", &["id"]), ("idx_fk", &["pid", "pcode"])]);
        assert!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).is_empty());
    }

    #[test]
    fn test_longer_index_covers() {
        let catalog = child_with_indexes(&[
            ("idx_id", &["id"]),
            ("idx_fk_more", &["pid", "pcode", "id"]),
        ]);
        assert!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).is_empty());
    }

    #[test]
    fn test_wrong_order_does_not_cover() {
        let catalog = child_with_indexes(&[("idx_id", &["id"]), ("idx_rev", &["pcode", "pid"])]);
        assert_eq!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).len(), 1);
    }

    #[test]
    fn test_partial_prefix_does_not_cover() {
        let catalog = child_with_indexes(&[("idx_id", &["id"]), ("idx_pid", &["pid"])]);
        assert_eq!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).len(), 1);
    }

    #[test]
    fn test_single_index_short_circuits() {
        let catalog = child_with_indexes(&[("idx_id", &["id"])]);
        assert!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).is_empty());
        let catalog = child_with_indexes(&[]);
        assert!(run_linter(LinterId::ForeignKeyWithNoIndexes, &catalog).is_empty());
    }

    #[test]
    fn test_missing_fk_column_fails_linter() {
        let catalog = CatalogBuilder::new()
            .table("child", |t| {
                t.column("id", "integer", false)
                    .index("idx_a", &["id"], false)
                    .index("idx_b", &["id"], true)
                    .fk("fk_ghost", &["ghost"], "parent", &["id"]);
            })
            .build();
        let err = try_run(
            &LinterConfig::new(LinterId::ForeignKeyWithNoIndexes),
            &catalog,
            None,
        )
        .unwrap_err();
        assert!(
            matches!(err, LintError::MissingObject { kind: "column", .. }),
            "got: {err}"
        );
    }
}
