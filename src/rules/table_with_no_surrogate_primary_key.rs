//! table-with-no-surrogate-primary-key: Composite primary keys

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Primary key made of more than one column";

pub(super) const EXPLAIN: &str = "table-with-no-surrogate-primary-key: Composite primary key\n\
         \n\
         What it detects:\n\
         A primary key spanning two or more columns.\n\
         \n\
         Why it matters:\n\
         Every table referencing this one must carry all of the key columns,\n\
         and a change to any natural key value ripples through every\n\
         referencing row.\n\
         \n\
         Fix:\n\
         Add a single-column surrogate key and keep the natural key as a\n\
         unique constraint.";

const MESSAGE: &str = "no surrogate primary key";

pub(super) struct TableWithNoSurrogatePrimaryKey;

impl Linter for TableWithNoSurrogatePrimaryKey {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if let Some(pk) = &table.primary_key
            && pk.columns.len() > 1
        {
            ctx.add_table_lint(table, MESSAGE, Some(LintValue::List(pk.columns.clone())));
        }
        Ok(())
    }
}
