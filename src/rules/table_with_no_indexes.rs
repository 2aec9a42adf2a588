//! table-with-no-indexes: Tables with neither a primary key nor an index

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Table with no primary key and no indexes";

pub(super) const EXPLAIN: &str = "table-with-no-indexes: Table without indexes\n\
         \n\
         What it detects:\n\
         A table that has no primary key and no indexes at all.\n\
         \n\
         Why it matters:\n\
         Every lookup on such a table is a full scan, and nothing stops\n\
         duplicate rows from accumulating.\n\
         \n\
         Fix:\n\
         Add a primary key, or index the columns the table is queried by.";

const MESSAGE: &str = "no indexes";

pub(super) struct TableWithNoIndexes;

impl Linter for TableWithNoIndexes {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if table.primary_key.is_none() && table.indexes.is_empty() {
            ctx.add_table_lint(table, MESSAGE, None);
        }
        Ok(())
    }
}
