//! Tensor based Pixels report GSM neighbours as LTE cells: no band, the
//! BSIC in the PCI field and the RSSI in the RSRP field.

use super::{PipelineContext, Postprocessor};
use crate::model::{Cell, CellGsm, CellLte, Connection, SignalGsm, GSM_BSIC_RANGE};

#[derive(Debug, Default)]
pub struct PixelTensorPostprocessor;

impl Postprocessor for PixelTensorPostprocessor {
    fn name(&self) -> &'static str {
        "pixel_tensor"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        if !ctx.device.is_pixel_tensor() {
            return cells;
        }

        cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Lte(lte) if is_disguised_gsm(&lte) => Cell::Gsm(to_gsm(lte)),
                other => other,
            })
            .collect()
    }
}

fn is_disguised_gsm(cell: &CellLte) -> bool {
    cell.connection.is_none()
        && cell.band.is_none()
        && cell.pci.is_some()
        && cell.signal.rsrp.is_some()
        && cell.signal.rssi.is_none()
        && cell.signal.rsrq.is_none()
}

fn to_gsm(cell: CellLte) -> CellGsm {
    CellGsm {
        network: cell.network,
        cid: None,
        lac: None,
        bsic: cell.pci.filter(|pci| GSM_BSIC_RANGE.contains(pci)),
        band: None,
        signal: SignalGsm::new(cell.signal.rsrp.map(|rsrp| rsrp as i32), None, None),
        connection: Connection::None,
        subscription_id: cell.subscription_id,
        timestamp: cell.timestamp,
    }
}
