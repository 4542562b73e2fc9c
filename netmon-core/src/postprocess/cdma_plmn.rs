//! CDMA cells carry no PLMN. When the device is registered on another
//! technology of the same operator as well (typically LTE), both serving
//! cells share the subscription and its network can be copied over.

use std::collections::HashMap;

use netmon_common::{Network, SubscriptionId};

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;

#[derive(Debug, Default)]
pub struct CdmaPlmnPostprocessor;

impl Postprocessor for CdmaPlmnPostprocessor {
    fn name(&self) -> &'static str {
        "cdma_plmn"
    }

    fn process(&self, cells: Vec<Cell>, _ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let mut serving: HashMap<SubscriptionId, Vec<Network>> = HashMap::new();
        for cell in cells.iter().filter(|c| c.is_primary()) {
            if let Some(network) = cell.network() {
                let networks = serving.entry(cell.subscription_id()).or_default();
                if !networks.contains(network) {
                    networks.push(network.clone());
                }
            }
        }

        cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Cdma(mut cdma) if cdma.network.is_none() => {
                    if let Some([network]) = serving.get(&cdma.subscription_id).map(Vec::as_slice) {
                        cdma.network = Some(network.clone());
                    }
                    Cell::Cdma(cdma)
                }
                other => other,
            })
            .collect()
    }
}
