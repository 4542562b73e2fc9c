//! Completes serving cell signal from the signal-strength API.

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;

#[derive(Debug, Default)]
pub struct SignalStrengthPostprocessor;

impl Postprocessor for SignalStrengthPostprocessor {
    fn name(&self) -> &'static str {
        "signal_strength"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        cells
            .into_iter()
            .map(|cell| {
                if !cell.is_primary() {
                    return cell;
                }
                match ctx.snapshot.paired_cell(cell.subscription_id()) {
                    Some(paired) => merge_signal(cell, &paired),
                    None => cell,
                }
            })
            .collect()
    }
}

/// Backfills the signal of `cell` when `paired` is the same cell.
fn merge_signal(cell: Cell, paired: &Cell) -> Cell {
    if cell.full_identity() != paired.full_identity() {
        return cell;
    }
    match (cell, paired) {
        (Cell::Cdma(mut c), Cell::Cdma(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Cdma(c)
        }
        (Cell::Gsm(mut c), Cell::Gsm(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Gsm(c)
        }
        (Cell::Wcdma(mut c), Cell::Wcdma(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Wcdma(c)
        }
        (Cell::Lte(mut c), Cell::Lte(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Lte(c)
        }
        (Cell::Tdscdma(mut c), Cell::Tdscdma(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Tdscdma(c)
        }
        (Cell::Nr(mut c), Cell::Nr(p)) => {
            c.signal = c.signal.merge(&p.signal);
            Cell::Nr(c)
        }
        (cell, _) => cell,
    }
}
