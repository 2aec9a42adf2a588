//! useless-surrogate-key: Surrogate key next to a full-row unique index

use std::collections::BTreeSet;

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintValue, Linter};

pub(super) const DESCRIPTION: &str =
    "Single-column primary key alongside a unique index on all other columns";

pub(super) const EXPLAIN: &str = "useless-surrogate-key: Useless surrogate key\n\
         \n\
         What it detects:\n\
         A table with a one-column primary key and a unique index covering\n\
         every other column of the table, typical of link tables such as\n\
         user_roles(id, user_id, role_id).\n\
         \n\
         Why it matters:\n\
         The unique index already identifies each row. The surrogate column\n\
         costs storage and a second index without adding anything.\n\
         \n\
         Fix:\n\
         Drop the surrogate column and promote the unique index to the\n\
         primary key.";

const MESSAGE: &str = "useless surrogate key";

pub(super) struct UselessSurrogateKey;

impl Linter for UselessSurrogateKey {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let Some(pk) = &table.primary_key else {
            return Ok(());
        };
        let [key] = pk.columns.as_slice() else {
            return Ok(());
        };

        let others: BTreeSet<&str> = table
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| *name != key.as_str())
            .collect();
        if others.is_empty() {
            return Ok(());
        }

        let covered = table
            .indexes
            .iter()
            .filter(|i| i.unique)
            .any(|i| i.column_names().into_iter().collect::<BTreeSet<_>>() == others);
        if covered {
            ctx.add_table_lint(table, MESSAGE, Some(LintValue::Text(key.clone())));
        }
        Ok(())
    }
}
