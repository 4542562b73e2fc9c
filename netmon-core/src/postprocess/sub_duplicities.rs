//! Removal of cells duplicated across subscriptions.
//!
//! Before subscription-bound cell queries existed, every SIM handle of a
//! dual SIM phone returned the same list: all cells of SIM 1 followed by
//! all cells of SIM 2, each block led by its serving cell. The block that
//! belongs to a subscription is found by the serving cell whose network is
//! the subscription's operator.

use tracing::trace;

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;

#[derive(Debug, Default)]
pub struct SubDuplicitiesPostprocessor;

impl Postprocessor for SubDuplicitiesPostprocessor {
    fn name(&self) -> &'static str {
        "sub_duplicities"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let subscriptions = ctx.snapshot.active_subscriptions();
        if subscriptions.len() <= 1 || ctx.subscriptions_reliable() {
            return cells;
        }

        let mut result = Vec::with_capacity(cells.len());
        for (rank, &sub) in subscriptions.iter().enumerate() {
            let operator = ctx.snapshot.network_operator(sub);
            let own: Vec<&Cell> = cells.iter().filter(|c| c.subscription_id() == sub).collect();
            let primaries: Vec<usize> = own
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_primary())
                .map(|(i, _)| i)
                .collect();
            let matching: Vec<usize> = primaries
                .iter()
                .copied()
                .filter(|&i| own[i].network() == operator.as_ref())
                .collect();

            let start = match matching.as_slice() {
                [only] => Some(*only),
                [] => None,
                _ => matching.get(rank).copied(),
            };
            let Some(start) = start else {
                trace!(sub, "No serving cell of the subscription operator");
                continue;
            };
            let end = primaries
                .iter()
                .copied()
                .find(|&i| i > start)
                .unwrap_or(own.len());

            trace!(sub, start, end, "Subscription slice");
            result.extend(own[start..end].iter().map(|c| (*c).clone()));
        }
        result
    }
}
