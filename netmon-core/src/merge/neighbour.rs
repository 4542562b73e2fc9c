//! Neighbour cell merging.

use super::{pick_better_rssi, take_first, SourceMerger};
use crate::model::{Cell, CellGsm, CellWcdma, GSM_RSSI_RANGE, UMTS_RSSI_RANGE};

/// Merges non-serving cells of the legacy neighbour API with the modern
/// list. Only GSM and WCDMA can be paired; the legacy API knows nothing
/// else worth keeping.
#[derive(Debug, Default)]
pub struct NeighbourMerger;

impl SourceMerger for NeighbourMerger {
    fn merge(&self, legacy: Vec<Cell>, modern: Vec<Cell>, _display_on: bool) -> Vec<Cell> {
        if legacy.is_empty() {
            return modern;
        }
        if modern.is_empty() {
            return legacy;
        }

        let mut pool = legacy;
        let mut merged: Vec<Cell> = modern
            .into_iter()
            .map(|new| match new {
                Cell::Gsm(new) => match take_first(&mut pool, |old| matches!(old, Cell::Gsm(o) if o.cid == new.cid)) {
                    Some(Cell::Gsm(old)) => Cell::Gsm(merge_gsm(new, old)),
                    _ => Cell::Gsm(new),
                },
                Cell::Wcdma(new) => match take_first(&mut pool, |old| matches!(old, Cell::Wcdma(o) if o.psc == new.psc)) {
                    Some(Cell::Wcdma(old)) => Cell::Wcdma(merge_wcdma(new, old)),
                    _ => Cell::Wcdma(new),
                },
                other => other,
            })
            .collect();

        merged.extend(pool);
        merged
    }
}

fn merge_gsm(new: CellGsm, old: CellGsm) -> CellGsm {
    let rssi = pick_better_rssi(new.signal.rssi, old.signal.rssi, *GSM_RSSI_RANGE.start());
    if rssi == new.signal.rssi {
        return new;
    }

    let mut signal = new.signal;
    signal.rssi = rssi;
    CellGsm {
        lac: old.lac.or(new.lac),
        signal,
        ..new
    }
}

fn merge_wcdma(new: CellWcdma, old: CellWcdma) -> CellWcdma {
    let mut signal = new.signal;
    signal.rssi = pick_better_rssi(new.signal.rssi, old.signal.rssi, *UMTS_RSSI_RANGE.start());
    CellWcdma { signal, ..new }
}
