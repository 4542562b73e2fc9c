//! PLMN inference for cells reported without a network.
//!
//! Neighbours rarely carry MCC/MNC. A neighbour on the same channel (or,
//! for GSM, in the same location area) as a cell with a known network very
//! likely belongs to that network too.

use netmon_common::{Network, SubscriptionId, Technology};

use super::{PipelineContext, Postprocessor};
use crate::band::BandTableGsm;
use crate::model::{Band, Cell, CellGsm, Connection};

#[derive(Debug, Default)]
pub struct PlmnPostprocessor;

/// Network of one cell together with what it can be matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlmnHint {
    sub: SubscriptionId,
    network: Network,
    technology: Technology,
    connection: Connection,
    /// Channel number; GSM neighbours hop channels so they match on `area`.
    channel: Option<u32>,
    area: Option<u32>,
}

impl PlmnHint {
    fn of(cell: &Cell) -> Option<Self> {
        let network = cell.network()?.clone();
        let (channel, area) = match cell {
            Cell::Cdma(_) => return None,
            Cell::Gsm(gsm) => (None, gsm.lac),
            other => (other.channel_number(), None),
        };
        Some(Self {
            sub: cell.subscription_id(),
            network,
            technology: cell.technology(),
            connection: cell.connection().clone(),
            channel,
            area,
        })
    }
}

impl Postprocessor for PlmnPostprocessor {
    fn name(&self) -> &'static str {
        "plmn"
    }

    fn process(&self, cells: Vec<Cell>, _ctx: &PipelineContext<'_>) -> Vec<Cell> {
        let mut hints: Vec<PlmnHint> = Vec::new();
        for hint in cells.iter().filter_map(PlmnHint::of) {
            if !hints.contains(&hint) {
                hints.push(hint);
            }
        }

        let only = single_network(hints.iter());

        cells
            .into_iter()
            .map(|cell| {
                if cell.network().is_some() {
                    return cell;
                }
                match cell {
                    Cell::Cdma(_) => cell,
                    Cell::Gsm(gsm) => Cell::Gsm(assign_gsm(gsm, &hints, only)),
                    other => match find_by_channel(&other, &hints).or(only) {
                        Some(network) => other.with_network(Some(network.clone())),
                        None => other,
                    },
                }
            })
            .collect()
    }
}

fn assign_gsm(cell: CellGsm, hints: &[PlmnHint], only: Option<&Network>) -> CellGsm {
    let gsm: Vec<&PlmnHint> = hints.iter().filter(|h| h.technology == Technology::Gsm).collect();
    let own: Vec<&PlmnHint> = gsm.iter().copied().filter(|h| h.sub == cell.subscription_id).collect();

    let same_area = |h: &&PlmnHint| h.area.is_some() && h.area == cell.lac;
    let found = if own.is_empty() {
        // No serving GSM cell of its own, e.g. the second SIM of a dual SIM phone
        single_network(gsm.iter().copied().filter(same_area))
    } else {
        single_network(own.iter().copied()).or_else(|| own.iter().copied().find(same_area).map(|h| &h.network))
    };

    match found.or(only) {
        Some(network) => with_gsm_network(cell, network),
        None => cell,
    }
}

/// GSM band names depend on the country, so the band is looked up again.
fn with_gsm_network(cell: CellGsm, network: &Network) -> CellGsm {
    let band = cell
        .band
        .as_ref()
        .map(|band| BandTableGsm::map(band.channel_number(), Some(network.mcc())));
    CellGsm {
        network: Some(network.clone()),
        band,
        ..cell
    }
}

fn find_by_channel<'h>(cell: &Cell, hints: &'h [PlmnHint]) -> Option<&'h Network> {
    let own: Vec<&PlmnHint> = hints
        .iter()
        .filter(|h| h.technology == cell.technology() && h.sub == cell.subscription_id())
        .collect();
    single_network(own.iter().copied()).or_else(|| {
        let channel = cell.channel_number();
        own.iter().find(|h| h.channel == channel).map(|h| &h.network)
    })
}

/// The network all `hints` agree on, if there is exactly one.
fn single_network<'h>(mut hints: impl Iterator<Item = &'h PlmnHint>) -> Option<&'h Network> {
    let first = &hints.next()?.network;
    hints.all(|h| &h.network == first).then_some(first)
}
