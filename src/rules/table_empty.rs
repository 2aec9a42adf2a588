//! table-empty: Tables with no rows

use tracing::warn;

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, Linter};
use crate::util::identifier;

pub(super) const DESCRIPTION: &str = "Table that contains no rows";

pub(super) const EXPLAIN: &str = "table-empty: Empty table\n\
         \n\
         What it detects:\n\
         A table for which SELECT COUNT(*) returns zero. Needs a database\n\
         connection; skipped otherwise.\n\
         \n\
         Why it matters:\n\
         Empty tables in a live database are often leftovers from features\n\
         that were removed or never shipped.\n\
         \n\
         Fix:\n\
         Drop the table if it is unused, or exclude it with\n\
         table-exclusion-pattern.";

const MESSAGE: &str = "empty table";

pub(super) struct TableEmpty;

impl Linter for TableEmpty {
    type State = ();

    fn uses_connection(&self) -> bool {
        true
    }

    fn start(&self, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        ctx.connection()?;
        Ok(())
    }

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}",
            identifier::quoted_table_name(table)
        );
        match ctx.connection()?.query_scalar(&sql) {
            Ok(Some(count)) if count.trim() == "0" => ctx.add_table_lint(table, MESSAGE, None),
            Ok(_) => {}
            Err(e) => warn!(table = %table.full_name(), "Could not count rows: {e}"),
        }
        Ok(())
    }
}
