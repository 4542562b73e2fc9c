//! Removal of phantom cells.
//!
//! Several modems emit placeholder records built from default values. They
//! are recognised by their exact combination of sentinels.

use netmon_common::DeviceProfile;

use super::{PipelineContext, Postprocessor};
use crate::model::{Band, Cell, CellGsm, CellLte, CellNr, CellWcdma};

#[derive(Debug, Default)]
pub struct InvalidCellsPostprocessor;

impl Postprocessor for InvalidCellsPostprocessor {
    fn name(&self) -> &'static str {
        "invalid_cells"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        cells
            .into_iter()
            .filter(|cell| !is_invalid(cell, ctx.device))
            .collect()
    }
}

fn is_invalid(cell: &Cell, device: &DeviceProfile) -> bool {
    match cell {
        Cell::Lte(lte) => is_placeholder_lte(lte) || (device.is_samsung() && is_samsung_ghost_lte(lte)),
        Cell::Gsm(gsm) => is_placeholder_gsm(gsm),
        Cell::Nr(nr) => device.is_mediatek() && is_mediatek_placeholder_nr(nr),
        Cell::Wcdma(wcdma) => is_placeholder_wcdma(wcdma),
        Cell::Cdma(_) | Cell::Tdscdma(_) => false,
    }
}

fn is_placeholder_lte(cell: &CellLte) -> bool {
    cell.pci == Some(0)
        && cell.signal.rssi == Some(-51)
        && cell.signal.rsrp.is_none()
        && cell.signal.rsrq.is_none()
}

fn is_placeholder_gsm(cell: &CellGsm) -> bool {
    cell.bsic == Some(0)
        && cell.band.as_ref().map(Band::channel_number) == Some(0)
        && cell.signal.rssi.is_none()
        && cell.cid.is_none()
}

/// Samsung echoes a band 1 neighbour with RSRP but no RSRQ that does not
/// exist.
fn is_samsung_ghost_lte(cell: &CellLte) -> bool {
    cell.band.as_ref().and_then(Band::number) == Some(1)
        && !cell.connection.is_primary()
        && cell.signal.rsrp.is_some()
        && cell.signal.rsrq.is_none()
}

fn is_mediatek_placeholder_nr(cell: &CellNr) -> bool {
    cell.nci.is_none()
        && cell.signal.ss_rsrp == Some(-44)
        && cell.signal.ss_rsrq == Some(-3)
        && cell.signal.csi_rsrp == Some(-44)
        && cell.signal.csi_rsrq == Some(-3)
}

fn is_placeholder_wcdma(cell: &CellWcdma) -> bool {
    cell.cid().is_none() && cell.psc == Some(0) && cell.signal.rssi == Some(-113)
}
