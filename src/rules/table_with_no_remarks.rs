//! table-with-no-remarks: Undocumented tables

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};

pub(super) const DESCRIPTION: &str = "Table without remarks";

pub(super) const EXPLAIN: &str = "table-with-no-remarks: Table without remarks\n\
         \n\
         What it detects:\n\
         A table whose remarks (COMMENT ON TABLE) are missing or blank.\n\
         \n\
         Why it matters:\n\
         Remarks are the only documentation that travels with the schema.\n\
         \n\
         Fix:\n\
         COMMENT ON TABLE <table> IS '<what one row represents>';";

const MESSAGE: &str = "should have remarks";

pub(super) struct TableWithNoRemarks;

impl Linter for TableWithNoRemarks {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if !table.has_remarks() {
            ctx.add_table_lint(table, MESSAGE, None);
        }
        Ok(())
    }
}
