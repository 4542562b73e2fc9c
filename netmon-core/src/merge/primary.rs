//! Serving cell merging.

use super::{pick_better_rssi, take_first, SourceMerger};
use crate::model::{
    Cell, CellCdma, CellGsm, CellLte, CellWcdma, GSM_RSSI_RANGE, UMTS_RSSI_RANGE,
    WCDMA_PSC_RANGE,
};

/// Merges serving cells reported by the legacy single-cell API with those
/// of the modern multi-cell API.
///
/// The legacy API is ignored while the screen is off because it stops
/// refreshing, and when the modern API reports several serving cells since
/// the legacy data is then usually mixed across SIMs.
#[derive(Debug, Default)]
pub struct PrimaryMerger;

impl SourceMerger for PrimaryMerger {
    fn merge(&self, legacy: Vec<Cell>, modern: Vec<Cell>, display_on: bool) -> Vec<Cell> {
        if modern.is_empty() {
            return legacy;
        }
        if !display_on || modern.len() > 1 {
            return modern;
        }

        let mut pool = legacy;
        let mut merged: Vec<Cell> = modern
            .into_iter()
            .map(|new| match new {
                Cell::Cdma(new) => match take_first(&mut pool, |old| matches!(old, Cell::Cdma(o) if o.bid == new.bid)) {
                    Some(Cell::Cdma(old)) => Cell::Cdma(merge_cdma(new, old)),
                    _ => Cell::Cdma(new),
                },
                Cell::Gsm(new) => match take_first(&mut pool, |old| matches!(old, Cell::Gsm(o) if o.cid == new.cid)) {
                    Some(Cell::Gsm(old)) => Cell::Gsm(merge_gsm(new, old)),
                    _ => Cell::Gsm(new),
                },
                Cell::Wcdma(new) => match take_first(&mut pool, |old| matches!(old, Cell::Wcdma(o) if o.cid() == new.cid())) {
                    Some(Cell::Wcdma(old)) => Cell::Wcdma(merge_wcdma(new, old)),
                    _ => Cell::Wcdma(new),
                },
                Cell::Lte(new) => match take_first(&mut pool, |old| matches!(old, Cell::Lte(o) if o.cid() == new.cid())) {
                    Some(Cell::Lte(old)) => Cell::Lte(merge_lte(new, old)),
                    _ => Cell::Lte(new),
                },
                // The legacy API never reports TD-SCDMA or NR
                other => other,
            })
            .collect();

        merged.extend(pool);
        merged
    }
}

fn merge_cdma(new: CellCdma, old: CellCdma) -> CellCdma {
    CellCdma {
        network: new.network.or(old.network),
        lat: new.lat.or(old.lat),
        lon: new.lon.or(old.lon),
        ..new
    }
}

fn merge_gsm(new: CellGsm, old: CellGsm) -> CellGsm {
    let mut signal = new.signal;
    signal.rssi = pick_better_rssi(new.signal.rssi, old.signal.rssi, *GSM_RSSI_RANGE.start());
    signal.ber = new.signal.ber.or(old.signal.ber);

    CellGsm {
        network: new.network.or(old.network),
        lac: new.lac.or(old.lac),
        signal,
        ..new
    }
}

/// The legacy API reports a more reliable PSC and LAC, except PSC 0 which
/// some devices use as "unknown".
fn merge_wcdma(new: CellWcdma, old: CellWcdma) -> CellWcdma {
    let psc = match old.psc {
        Some(psc) if psc > *WCDMA_PSC_RANGE.start() => Some(psc),
        _ => new.psc.or(old.psc),
    };

    let mut signal = new.signal;
    signal.rssi = pick_better_rssi(new.signal.rssi, old.signal.rssi, *UMTS_RSSI_RANGE.start());
    signal.rscp = new.signal.rscp.or(old.signal.rscp);
    signal.ecio = new.signal.ecio.or(old.signal.ecio);
    signal.ber = new.signal.ber.or(old.signal.ber);

    CellWcdma {
        network: new.network.or(old.network),
        lac: old.lac.or(new.lac),
        psc,
        signal,
        ..new
    }
}

fn merge_lte(new: CellLte, old: CellLte) -> CellLte {
    CellLte {
        network: new.network.or(old.network),
        tac: new.tac.or(old.tac),
        signal: new.signal.merge(&old.signal),
        ..new
    }
}
