//! column-types: Columns with the same name but different data types
//!
//! Collects the data type of every column across all visited tables and,
//! once all tables are seen, reports each column name that was declared
//! with more than one type.

use std::collections::BTreeSet;

use crate::catalog::{ColumnDataType, Table};
use crate::rules::{LintContext, LintError, LintValue, Linter};
use crate::util::Multimap;

pub(super) const DESCRIPTION: &str = "Same column name declared with different data types";

pub(super) const EXPLAIN: &str = "column-types: Inconsistent column types\n\
         \n\
         What it detects:\n\
         A column name that appears in several tables with different data\n\
         types, for example customer_id INTEGER in orders but\n\
         customer_id VARCHAR in invoices.\n\
         \n\
         Why it matters:\n\
         Columns sharing a name usually hold the same kind of value. When\n\
         their types drift, joins need conversions and values that fit in\n\
         one table do not fit in another.\n\
         \n\
         Report:\n\
         One catalog-level lint per column name, listing the conflicting\n\
         type names. Columns with an unknown type are ignored.\n\
         \n\
         Fix:\n\
         Use one data type for the column everywhere it appears.";

pub(super) struct ColumnTypes;

impl Linter for ColumnTypes {
    type State = Multimap<String, ColumnDataType>;

    fn lint(
        &self,
        types: &mut Self::State,
        table: &Table,
        ctx: &mut LintContext<'_>,
    ) -> Result<(), LintError> {
        for column in ctx.columns(table) {
            if let Some(data_type) = &column.data_type {
                types.add(column.name.to_lowercase(), data_type.clone());
            }
        }
        Ok(())
    }

    fn end(&self, types: Self::State, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        for (column, data_types) in &types {
            let distinct: BTreeSet<&str> = data_types.iter().map(|t| t.name.as_str()).collect();
            if distinct.len() > 1 {
                ctx.add_catalog_lint(
                    format!("column with same name but different data types for {column}"),
                    Some(LintValue::List(
                        distinct.into_iter().map(str::to_string).collect(),
                    )),
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
    use crate::rules::{LintSubject, LintValue, LinterId};

    #[test]
    fn test_conflicting_types_across_tables() {
        let catalog = CatalogBuilder::new()
            .table("orders", |t| {
                t.column("id", "integer", false)
                    .column("customer_id", "integer", false);
            })
            .table("invoices", |t| {
                t.column("id", "integer", false)
                    .column("customer_id", "varchar", false);
            })
            .build();

        let lints = run_linter(LinterId::ColumnTypes, &catalog);
        assert_eq!(lints.len(), 1);
        assert_eq!(
            lints[0].message,
            "column with same name but different data types for customer_id"
        );
        assert_eq!(lints[0].subject, LintSubject::Catalog);
        assert_eq!(
            lints[0].value,
            Some(LintValue::List(vec!["integer".into(), "varchar".into()]))
        );
    }

    #[test]
    fn test_one_type_many_tables_is_silent() {
        let mut builder = CatalogBuilder::new();
        for name in ["a", "b", "c", "d"] {
            builder = builder.table(name, |t| {
                t.column("created_at", "timestamp", false);
            });
        }
        assert!(run_linter(LinterId::ColumnTypes, &builder.build()).is_empty());
    }

    #[test]
    fn test_conflict_within_three_tables_reported_once() {
        let catalog = CatalogBuilder::new()
            .table("a", |t| {
                t.column("code", "integer", false);
            })
            .table("b", |t| {
                t.column("code", "varchar", false);
            })
            .table("c", |t| {
                t.column("code", "integer", false);
            })
            .build();
        assert_eq!(run_linter(LinterId::ColumnTypes, &catalog).len(), 1);
    }

    #[test]
    fn test_unknown_types_are_ignored() {
        let catalog = CatalogBuilder::new()
            .table("a", |t| {
                t.column("code", "integer", false);
            })
            .table("b", |t| {
                t.untyped_column("code", false);
            })
            .build();
        assert!(run_linter(LinterId::ColumnTypes, &catalog).is_empty());
    }
}
