//! Serving LTE bandwidth from the service state.
//!
//! Once any serving LTE cell reports its bandwidth the device is known to
//! do so, and the coarser service-state value is no longer used.

use tracing::trace;

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;
use crate::storage::StorageKey;

#[derive(Debug, Default)]
pub struct CellBandwidthPostprocessor;

impl Postprocessor for CellBandwidthPostprocessor {
    fn name(&self) -> &'static str {
        "cell_bandwidth"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let key = StorageKey::ReportsLteBandwidthDirectly;
        let direct = cells
            .iter()
            .any(|c| matches!(c, Cell::Lte(lte) if lte.connection.is_primary() && lte.bandwidth.is_some()));
        if direct && !ctx.storage.get_bool(key) {
            trace!("Device reports LTE bandwidth directly");
            ctx.storage.set_bool(key, true);
        }
        if ctx.storage.get_bool(key) {
            return cells;
        }

        cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Lte(mut lte) if lte.connection.is_primary() && lte.bandwidth.is_none() => {
                    lte.bandwidth = ctx.snapshot.cell_bandwidths(lte.subscription_id).first().copied();
                    Cell::Lte(lte)
                }
                other => other,
            })
            .collect()
    }
}
