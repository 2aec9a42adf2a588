//! redundant-indexes: Indexes that repeat another index's leading columns
//!
//! Compares every pair of indexes on a table. When one index's column list
//! is a prefix of (or equal to) another's, the longer one is reported.

use std::collections::BTreeSet;

use crate::catalog::Table;
use crate::rules::{LintContext, LintError, LintObject, LintValue, Linter};
use crate::util::prefix;

pub(super) const DESCRIPTION: &str = "Index whose columns extend another index on the same table";

pub(super) const EXPLAIN: &str = "redundant-indexes: Redundant indexes\n\
         \n\
         What it detects:\n\
         Two indexes on the same table where the column list of one is a\n\
         leading prefix of the other, in index order. For indexes (a) and\n\
         (a, b), the index on (a, b) is reported. Two indexes with exactly\n\
         the same columns are reported once, on the second.\n\
         \n\
         Why it matters:\n\
         Every index is maintained on every insert, update and delete.\n\
         Overlapping indexes double that cost and use disk and cache for\n\
         little query benefit.\n\
         \n\
         Prefix matching:\n\
         Column order matters: (a, b) overlaps (a, b, c) but not (b, a).\n\
         \n\
         Fix:\n\
         Drop one of the overlapping indexes, or merge them into one.";

const MESSAGE: &str = "redundant index";

pub(super) struct RedundantIndexes;

impl Linter for RedundantIndexes {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        for position in redundant_positions(table) {
            let index = &table.indexes[position];
            ctx.add_object_lint(
                table,
                LintObject::Index(index.name.clone()),
                MESSAGE,
                Some(LintValue::Text(index.name.clone())),
            );
        }
        Ok(())
    }
}

/// Positions of redundant indexes in `table.indexes`, ascending.
fn redundant_positions(table: &Table) -> BTreeSet<usize> {
    let mut redundant = BTreeSet::new();
    if table.indexes.len() <= 1 {
        return redundant;
    }

    let columns: Vec<Vec<&str>> = table.indexes.iter().map(|i| i.column_names()).collect();
    for (i, shorter) in columns.iter().enumerate() {
        for (j, longer) in columns.iter().enumerate() {
            if i == j || !prefix::starts_with(longer, shorter) {
                continue;
            }
            // Identical lists match both ways; keep the first, flag the later one.
            if longer.len() == shorter.len() && j < i {
                continue;
            }
            redundant.insert(j);
        }
    }
    redundant
}
