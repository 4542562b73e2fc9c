//! Multi-operator core network correction.
//!
//! On a shared RAN the broadcast PLMN belongs to the host operator, so the
//! serving cell may carry a network the device is not actually registered
//! with. LTE modems are known to report the host PLMN; other technologies
//! are only fixed when no network is known at all.

use netmon_common::Network;

use super::{PipelineContext, Postprocessor};
use crate::model::{Cell, RegistrationHint};

#[derive(Debug, Default)]
pub struct MocnPostprocessor;

impl Postprocessor for MocnPostprocessor {
    fn name(&self) -> &'static str {
        "mocn"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        cells
            .into_iter()
            .map(|cell| {
                if !cell.is_primary() {
                    return cell;
                }

                let sub = cell.subscription_id();
                let hints = ctx.snapshot.registration_hints(sub);
                let suggested = if hints.is_empty() {
                    ctx.snapshot.network_operator(sub)
                } else {
                    suggest_from_hints(&cell, &hints)
                };

                let replaceable = matches!(cell, Cell::Lte(_)) || cell.network().is_none();
                match suggested {
                    Some(network) if replaceable && cell.network() != Some(&network) => {
                        cell.with_network(Some(network))
                    }
                    _ => cell,
                }
            })
            .collect()
    }
}

/// The only registration hint from the cell's country. CDMA cells often
/// lack a network entirely and get no suggestion from hints.
fn suggest_from_hints(cell: &Cell, hints: &[RegistrationHint]) -> Option<Network> {
    let mcc = cell.network()?.mcc();
    let mut same_country = hints.iter().filter(|h| h.network.mcc() == mcc);
    match (same_country.next(), same_country.next()) {
        (Some(hint), None) => Some(hint.network.clone()),
        _ => None,
    }
}
