//! table-with-incrementing-columns: Numbered column series
//!
//! Finds groups of columns that differ only by a trailing number, such as
//! `phone1`, `phone2`, `phone3`. A column named exactly like the group's
//! base (`phone`) joins the group as number 0.

use std::collections::BTreeMap;

use crate::catalog::{Column, Table};
use crate::rules::{LintContext, LintError, LintValue, Linter};
use crate::util::Multimap;

pub(super) const DESCRIPTION: &str = "Columns that form a numbered series, like item1, item2";

pub(super) const EXPLAIN: &str = "table-with-incrementing-columns: Incrementing columns\n\
         \n\
         What it detects:\n\
         Two or more columns in one table whose names share a base and end\n\
         in a number, for example address1, address2, address3.\n\
         \n\
         Why it matters:\n\
         Numbered columns are a repeating group. Adding a fourth address\n\
         means a schema change, and queries have to check every column.\n\
         \n\
         Report:\n\
         One lint per group naming its columns. A second lint is added when\n\
         the numbers have gaps (item1, item3), and another when the columns\n\
         do not all share the same data type and size.\n\
         \n\
         Fix:\n\
         Move the repeating values into a child table with one row per\n\
         value.";

const MESSAGE: &str = "incrementing columns";
const NOT_CONSECUTIVE: &str = "incrementing columns are not consecutive";
const DIFFERENT_TYPES: &str = "incrementing columns don't have the same data-type";

pub(super) struct TableWithIncrementingColumns;

impl TableWithIncrementingColumns {
    /// Columns grouped by name base, each with its trailing number.
    fn groups<'t>(&self, columns: &[&'t Column]) -> Multimap<String, (i64, &'t Column)> {
        let mut groups = Multimap::new();
        if columns.len() <= 1 {
            return groups;
        }

        let names: Vec<String> = columns.iter().map(|c| normalize(&c.name)).collect();
        let mut split: Vec<Option<(String, i64)>> = Vec::with_capacity(names.len());
        let mut base_counts: BTreeMap<String, usize> = BTreeMap::new();
        for name in &names {
            let parts = split_number(name);
            if let Some((base, _)) = &parts {
                *base_counts.entry(base.clone()).or_default() += 1;
            }
            split.push(parts);
        }
        for name in &names {
            if let Some(count) = base_counts.get_mut(name) {
                *count += 1;
            }
        }

        for ((column, name), parts) in columns.iter().zip(&names).zip(split) {
            if base_counts.get(name).is_some_and(|&n| n >= 2) {
                groups.add(name.clone(), (0, *column));
            }
            if let Some((base, number)) = parts
                && base_counts.get(&base).is_some_and(|&n| n >= 2)
            {
                groups.add(base, (number, *column));
            }
        }
        groups
    }
}

/// Split `item12` into `("item", 12)`. The base must keep at least one
/// non-digit character. Digits that overflow still mark the name as
/// numbered, with number -1.
fn split_number(name: &str) -> Option<(String, i64)> {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if base.is_empty() || base.len() == name.len() {
        return None;
    }
    let number = name[base.len()..].parse::<i64>().unwrap_or(-1);
    Some((base.to_string(), number))
}

/// Lower-case the name and drop everything except letters, digits, `_`
/// and `.`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Linter for TableWithIncrementingColumns {
    type State = ();

    fn lint(&self, _: &mut (), table: &Table, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        let columns = ctx.columns(table);
        for (_, group) in &self.groups(&columns) {
            let mut names: Vec<String> = group.iter().map(|(_, c)| c.name.clone()).collect();
            names.sort();
            let value = Some(LintValue::List(names));

            ctx.add_table_lint(table, MESSAGE, value.clone());

            let min = group.iter().map(|(n, _)| *n).min().unwrap_or_default();
            let max = group.iter().map(|(n, _)| *n).max().unwrap_or_default();
            let span = i128::from(max) - i128::from(min) + 1;
            if span != group.len() as i128 {
                ctx.add_table_lint(table, NOT_CONSECUTIVE, value.clone());
            }

            let (_, first) = group[0];
            let same_type = group
                .iter()
                .all(|(_, c)| c.data_type == first.data_type && c.size == first.size);
            if !same_type {
                ctx.add_table_lint(table, DIFFERENT_TYPES, value);
            }
        }
        Ok(())
    }
}
