//! Demotes secondary cells some modems report for every neighbour.
//!
//! When the whole list is made of primary and modem-reported secondary
//! cells, the secondary flag carries no information. Only an NR cell with
//! a known network in a subscription without a primary can then plausibly
//! be a real secondary (NSA leg).

use super::{per_subscription, PipelineContext, Postprocessor};
use crate::model::{Cell, Connection};

#[derive(Debug, Default)]
pub struct InvalidSecondaryPostprocessor;

impl Postprocessor for InvalidSecondaryPostprocessor {
    fn name(&self) -> &'static str {
        "invalid_secondary"
    }

    fn process(&self, cells: Vec<Cell>, _ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let reported_secondary = |c: &Cell| matches!(c.connection(), Connection::Secondary { is_guess: false });
        let suspicious = cells.iter().any(reported_secondary)
            && cells.iter().all(|c| c.is_primary() || reported_secondary(c));
        if !suspicious {
            return cells;
        }

        per_subscription(cells, |_, group| {
            let has_primary = group.iter().any(Cell::is_primary);
            group
                .into_iter()
                .map(|cell| {
                    let plausible_nsa = matches!(&cell, Cell::Nr(nr) if nr.network.is_some());
                    if reported_secondary(&cell) && (has_primary || !plausible_nsa) {
                        cell.with_connection(Connection::None)
                    } else {
                        cell
                    }
                })
                .collect()
        })
    }
}
