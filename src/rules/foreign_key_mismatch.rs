//! foreign-key-mismatch: Foreign key column type differs from the key it references

use crate::catalog::{Column, Table};
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};

pub(super) const DESCRIPTION: &str =
    "Foreign key column data type or size differs from the referenced column";

pub(super) const EXPLAIN: &str = "foreign-key-mismatch: Foreign key data type mismatch\n\
         \n\
         What it detects:\n\
         A foreign key where a referencing column and the column it points\n\
         at have different SQL types, or the same type with a different\n\
         size, for example INTEGER(5) referencing INTEGER(10).\n\
         \n\
         Why it matters:\n\
         Mismatched types force implicit conversions on every join and\n\
         constraint check, can stop the database from using indexes, and\n\
         let the referencing side hold values the referenced side cannot.\n\
         \n\
         Pairs where either column's type is unknown are skipped. Each\n\
         foreign key is reported at most once.\n\
         \n\
         Fix:\n\
         Declare the referencing column with exactly the referenced column's\n\
         type and size.";

const MESSAGE: &str = "foreign key data type different from primary key";

pub(super) struct ForeignKeyMismatch;

impl Linter for ForeignKeyMismatch {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let catalog = ctx.catalog;
        for fk in &table.foreign_keys {
            let mismatched = fk.references().into_iter().any(|reference| {
                // Columns outside the crawled catalog cannot be assessed.
                match (
                    catalog.column(&reference.foreign_key_column),
                    catalog.column(&reference.primary_key_column),
                ) {
                    (Some(fk_column), Some(pk_column)) => types_differ(fk_column, pk_column),
                    _ => false,
                }
            });
            if mismatched {
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

fn types_differ(fk_column: &Column, pk_column: &Column) -> bool {
    match (&fk_column.data_type, &pk_column.data_type) {
        (Some(fk_type), Some(pk_type)) => {
            fk_type.sql_type != pk_type.sql_type || fk_column.size != pk_column.size
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::catalog::builder::CatalogBuilder;
    use crate::rules::test_helpers::*;
    use crate::rules::{LinterId, Severity};

    fn parent_child(child_type: &str, child_size: u32) -> Catalog {
        CatalogBuilder::new()
            .table("parent", |t| {
                t.sized_column("id", "integer", 10, false).pk(&["id"]);
            })
            .table("child", |t| {
                t.sized_column("id", "integer", 10, false)
                    .sized_column("pid", child_type, child_size, false)
                    .pk(&["id"])
                    .fk("fk1", &["pid"], "parent", &["id"]);
            })
            .build()
    }

    #[test]
    fn test_size_mismatch_is_high() {
        let lints = run_linter(LinterId::ForeignKeyMismatch, &parent_child("integer", 5));
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].severity, Severity::High);
        assert_eq!(tables(&lints), vec!["public.child"]);
    }

    #[test]
    fn test_type_mismatch() {
        let lints = run_linter(LinterId::ForeignKeyMismatch, &parent_child("varchar", 10));
        assert_eq!(lints.len(), 1);
    }

    #[test]
    fn test_identical_types_are_fine() {
        let lints = run_linter(LinterId::ForeignKeyMismatch, &parent_child("integer", 10));
        assert!(lints.is_empty());
    }

    #[test]
    fn test_type_names_mapping_to_same_sql_type_match() {
        // int4 and integer are both INTEGER
        let lints = run_linter(LinterId::ForeignKeyMismatch, &parent_child("int4", 10));
        assert!(lints.is_empty());
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let catalog = CatalogBuilder::new()
            .table("parent", |t| {
                t.sized_column("id", "integer", 10, false).pk(&["id"]);
            })
            .table("child", |t| {
                t.untyped_column("pid", false)
                    .fk("fk1", &["pid"], "parent", &["id"]);
            })
            .build();
        assert!(run_linter(LinterId::ForeignKeyMismatch, &catalog).is_empty());
    }

    #[test]
    fn test_reported_once_per_key() {
        let catalog = CatalogBuilder::new()
            .table("parent", |t| {
                t.sized_column("a", "integer", 10, false)
                    .sized_column("b", "integer", 10, false)
                    .pk(&["a", "b"]);
            })
            .table("child", |t| {
                t.sized_column("x", "bigint", 19, false)
                    .sized_column("y", "bigint", 19, false)
                    .fk("fk_both", &["x", "y"], "parent", &["a", "b"]);
            })
            .build();
        assert_eq!(run_linter(LinterId::ForeignKeyMismatch, &catalog).len(), 1);
    }

    #[test]
    fn test_reference_outside_catalog_is_skipped() {
        let catalog = CatalogBuilder::new()
            .table("child", |t| {
                t.sized_column("pid", "integer", 5, false)
                    .fk("fk_remote", &["pid"], "not_crawled", &["id"]);
            })
            .build();
        assert!(run_linter(LinterId::ForeignKeyMismatch, &catalog).is_empty());
    }
}
