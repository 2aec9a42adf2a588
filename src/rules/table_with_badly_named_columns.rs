//! table-with-badly-named-columns: Column names matching a configured pattern

use regex::Regex;

use crate::catalog::Table;
use crate::config::{self, ConfigError, LinterConfig};
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};

pub(super) const DESCRIPTION: &str = "Column name matches the configured bad-column-names pattern";

pub(super) const EXPLAIN: &str = "table-with-badly-named-columns: Badly named columns\n\
         \n\
         What it detects:\n\
         Columns whose name fully matches the regular expression given in\n\
         the bad-column-names property. Without that property the linter\n\
         reports nothing.\n\
         \n\
         Configuration:\n\
           [[linter]]\n\
           id = \"table-with-badly-named-columns\"\n\
           [linter.config]\n\
           bad-column-names = \"(?i)(tmp|temp|foo|bar)_.*\"\n\
         \n\
         Why it matters:\n\
         Naming conventions only hold when something checks them.\n\
         \n\
         Fix:\n\
         Rename the column.";

const MESSAGE: &str = "badly named column";

#[derive(Debug, Default)]
pub(super) struct TableWithBadlyNamedColumns {
    bad_names: Option<Regex>,
}

impl Linter for TableWithBadlyNamedColumns {
    type State = ();

    fn configure(&mut self, config: &LinterConfig) -> Result<(), ConfigError> {
        self.bad_names = config
            .get_string("bad-column-names")
            .filter(|p| !p.trim().is_empty())
            .map(config::full_match)
            .transpose()?;
        Ok(())
    }

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let Some(bad_names) = &self.bad_names else {
            return Ok(());
        };
        for column in ctx.columns(table) {
            if bad_names.is_match(&column.name) {
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
