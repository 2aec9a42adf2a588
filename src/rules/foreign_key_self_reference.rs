//! foreign-key-self-reference: A foreign key column that references itself

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Foreign key whose column references that same column";

pub(super) const EXPLAIN: &str = "foreign-key-self-reference: Foreign key references itself\n\
         \n\
         What it detects:\n\
         A foreign key in which a referencing column and the referenced\n\
         column are the same column of the same table, for example\n\
         employees.id REFERENCES employees(id).\n\
         \n\
         Why it matters:\n\
         Such a constraint can never fail and never expresses a\n\
         relationship. It is almost always a mistake in a generated or\n\
         hand-written DDL script where a different column was intended,\n\
         such as employees.manager_id.\n\
         \n\
         A table referencing a different column of itself (a hierarchy) is\n\
         not reported here.\n\
         \n\
         Fix:\n\
         Point the foreign key at the intended column, or drop it.";

const MESSAGE: &str = "foreign key self-references primary key";

pub(super) struct ForeignKeySelfReference;

impl Linter for ForeignKeySelfReference {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        for fk in &table.foreign_keys {
            let self_referencing = fk
                .column_references
                .iter()
                .any(|r| r.foreign_key_column == r.primary_key_column);
            if self_referencing {
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
    use crate::catalog::builder::CatalogBuilder;
    use crate::rules::test_helpers::*;
    use crate::rules::{LinterId, Severity};

    #[test]
    fn test_same_column_is_critical() {
        let catalog = CatalogBuilder::new()
            .table("employees", |t| {
                t.column("id", "integer", false)
                    .pk(&["id"])
                    .fk("fk_self", &["id"], "employees", &["id"]);
            })
            .build();
        let lints = run_linter(LinterId::ForeignKeySelfReference, &catalog);
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].severity, Severity::Critical);
    }

    #[test]
    fn test_hierarchy_is_not_self_reference() {
        let catalog = CatalogBuilder::new()
            .table("employees", |t| {
                t.column("id", "integer", false)
                    .column("manager_id", "integer", true)
                    .pk(&["id"])
                    .fk("fk_manager", &["manager_id"], "employees", &["id"]);
            })
            .build();
        assert!(run_linter(LinterId::ForeignKeySelfReference, &catalog).is_empty());
    }

    #[test]
    fn test_independent_of_mismatch_linter() {
        // Same column, so types trivially agree: only the self-reference fires.
        let catalog = CatalogBuilder::new()
            .table("t", |t| {
                t.sized_column("id", "integer", 10, false)
                    .pk(&["id"])
                    .fk("fk_self", &["id"], "t", &["id"]);
            })
            .build();
        assert_eq!(run_linter(LinterId::ForeignKeySelfReference, &catalog).len(), 1);
        assert!(run_linter(LinterId::ForeignKeyMismatch, &catalog).is_empty());
    }
}
