//! Promotes a cell to primary when the modem marked none.

use super::{PipelineContext, Postprocessor};
use crate::model::{Cell, Connection};

#[derive(Debug, Default)]
pub struct PrimaryCellPostprocessor;

impl Postprocessor for PrimaryCellPostprocessor {
    fn name(&self) -> &'static str {
        "primary_cell"
    }

    fn process(&self, mut cells: Vec<Cell>, _ctx: &PipelineContext<'_>) -> Vec<Cell> {
        if cells.iter().any(Cell::is_primary) {
            return cells;
        }

        if let Some(index) = cells.iter().position(is_complete) {
            let cell = cells.remove(index).with_connection(Connection::primary());
            cells.insert(0, cell);
        }
        cells
    }
}

/// Neighbours never carry their full identity, so a cell that does is the
/// serving one.
fn is_complete(cell: &Cell) -> bool {
    match cell {
        Cell::Cdma(c) => c.bid.is_some() && c.nid.is_some(),
        Cell::Gsm(c) => c.cid.is_some() && c.lac.is_some(),
        Cell::Lte(c) => c.eci.is_some() && c.tac.is_some() && c.pci.is_some(),
        Cell::Nr(c) => c.nci.is_some() && c.tac.is_some() && c.pci.is_some(),
        Cell::Tdscdma(c) => c.ci.is_some() && c.lac.is_some() && c.cpid.is_some(),
        Cell::Wcdma(c) => c.ci.is_some() && c.lac.is_some() && c.psc.is_some(),
    }
}
