//! Samsung modems report LTE timing advance 0 until they have a real
//! value. TA is suppressed until a positive value has been seen once for
//! the subscription.

use tracing::trace;

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;
use crate::storage::StorageKey;

#[derive(Debug, Default)]
pub struct TimingAdvancePostprocessor;

impl Postprocessor for TimingAdvancePostprocessor {
    fn name(&self) -> &'static str {
        "timing_advance"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let key = StorageKey::ReportsLteTimingAdvance;
        cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Lte(mut lte) => {
                    let ta = lte.signal.timing_advance;
                    // The device does not transmit to neighbours
                    let neighbour = lte.connection.is_none() && ta.is_some();
                    let valid = ctx.storage.get_bool_for(key, lte.subscription_id);
                    let positive = ta.is_some_and(|ta| ta > 0);

                    if !valid && positive {
                        trace!(sub = lte.subscription_id, "Valid LTE timing advance detected");
                        ctx.storage.set_bool_for(key, lte.subscription_id, true);
                    }
                    if neighbour || (!valid && !positive) {
                        lte.signal.timing_advance = None;
                    }
                    Cell::Lte(lte)
                }
                other => other,
            })
            .collect()
    }
}
