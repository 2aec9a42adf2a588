//! table-with-single-column: Tables with exactly one column

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Table with only one column";

pub(super) const EXPLAIN: &str = "table-with-single-column: Single-column table\n\
         \n\
         What it detects:\n\
         A base table that has exactly one column.\n\
         \n\
         Why it matters:\n\
         A one-column table is usually an unfinished design or a lookup list\n\
         that belongs in a check constraint or enum type.\n\
         \n\
         Fix:\n\
         Add the columns the table is meant to hold, or replace it with a\n\
         constraint on the referencing column.";

const MESSAGE: &str = "single column";

pub(super) struct TableWithSingleColumn;

impl Linter for TableWithSingleColumn {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if table.columns.len() == 1 {
            ctx.add_table_lint(table, MESSAGE, None);
        }
        Ok(())
    }
}
