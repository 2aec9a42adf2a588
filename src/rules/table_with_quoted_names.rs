//! table-with-quoted-names: Names that only work when quoted

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};
use crate::util::identifier;

pub(super) const DESCRIPTION: &str = "Table or column name with spaces, symbols, or a reserved word";

pub(super) const EXPLAIN: &str = "table-with-quoted-names: Names that need quoting\n\
         \n\
         What it detects:\n\
         A table or column name that contains spaces or characters other\n\
         than letters, digits and underscore, starts with a digit, or is an\n\
         SQL reserved word such as ORDER or USER.\n\
         \n\
         Why it matters:\n\
         Every query touching the object must quote the name exactly, in\n\
         the right case. Forgetting the quotes produces confusing syntax\n\
         errors.\n\
         \n\
         Fix:\n\
         Rename to a plain identifier, for example order_items instead of\n\
         \"Order Items\".";

const MESSAGE: &str = "spaces in name, or reserved word";

pub(super) struct TableWithQuotedNames;

impl Linter for TableWithQuotedNames {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if identifier::needs_quoting(&table.name) {
            ctx.add_table_lint(table, MESSAGE, Some(LintValue::Text(table.name.clone())));
        }
        for column in ctx.columns(table) {
            if identifier::needs_quoting(&column.name) {
                ctx.add_object_lint(
                    table,
                    LintObject::Column(column.name.clone()),
                    MESSAGE,
                    Some(LintValue::Text(column.name.clone())),
                );
            }
        }
        Ok(())
    }
}
