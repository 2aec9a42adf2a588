//! table-cycle: Cycles in table relationships
//!
//! Builds a graph of foreign key relationships across every visited table
//! and reports, once for the whole catalog, whether it contains a cycle.

use crate::catalog::{Table, TableRef};
use crate::rules::{LintContext, LintError, LintValue, Linter};
use crate::util::DirectedGraph;

pub(super) const DESCRIPTION: &str = "Cycles in foreign key relationships between tables";

pub(super) const EXPLAIN: &str = "table-cycle: Cycles in table relationships\n\
         \n\
         What it detects:\n\
         A chain of foreign keys that leads back to where it started, for\n\
         example orders -> invoices -> orders, or a table with a foreign key\n\
         to itself.\n\
         \n\
         Why it matters:\n\
         Cyclic references make it impossible to load, copy or delete data\n\
         table by table in dependency order. At least one of the foreign\n\
         keys has to be deferred, disabled or made nullable to insert the\n\
         first row.\n\
         \n\
         Report:\n\
         One catalog-level lint. The lint only says that a cycle exists;\n\
         it does not name the tables involved.\n\
         \n\
         Fix:\n\
         Break the cycle with a link table, or drop one of the foreign keys\n\
         and enforce the relationship elsewhere.";

const MESSAGE: &str = "cycles in table relationships";

pub(super) struct TableCycle;

impl Linter for TableCycle {
    type State = DirectedGraph<TableRef>;

    fn lint(
        &self,
        graph: &mut Self::State,
        table: &Table,
        _ctx: &mut LintContext<'_>,
    ) -> Result<(), LintError> {
        graph.add_vertex(table.table_ref());
        for fk in &table.foreign_keys {
            for reference in &fk.column_references {
                graph.add_edge(
                    reference.primary_key_column.table.clone(),
                    reference.foreign_key_column.table.clone(),
                );
            }
        }
        Ok(())
    }

    fn end(&self, graph: Self::State, ctx: &mut LintContext<'_>) -> Result<(), LintError> {
        if graph.contains_cycle() {
            ctx.add_catalog_lint(MESSAGE, Some(LintValue::Bool(true)));
        }
        Ok(())
    }
}
