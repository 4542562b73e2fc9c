//! Samsung firmware fills neighbour signal fields with its own "unknown"
//! constants instead of the platform ones. Values that are plausible for a
//! neighbour are kept and the rest is dropped.

use super::{PipelineContext, Postprocessor};
use crate::model::Cell;

#[derive(Debug, Default)]
pub struct SamsungInvalidValuesPostprocessor;

impl Postprocessor for SamsungInvalidValuesPostprocessor {
    fn name(&self) -> &'static str {
        "samsung_invalid_values"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        if !ctx.device.is_samsung() {
            return cells;
        }

        cells
            .into_iter()
            .map(|cell| {
                if !cell.connection().is_none() {
                    return cell;
                }
                match cell {
                    Cell::Gsm(mut gsm) => {
                        gsm.signal.rssi = gsm.signal.rssi.filter(|v| *v != -51);
                        gsm.signal.ta = gsm.signal.ta.filter(|v| *v > 0);
                        gsm.signal.ber = gsm.signal.ber.filter(|v| *v > 0);
                        Cell::Gsm(gsm)
                    }
                    Cell::Lte(mut lte) => {
                        lte.signal.rssi = lte.signal.rssi.filter(|v| *v != -51);
                        lte.signal.timing_advance = lte.signal.timing_advance.filter(|v| *v > 0);
                        Cell::Lte(lte)
                    }
                    Cell::Wcdma(mut wcdma) => {
                        wcdma.signal.rssi = wcdma.signal.rssi.filter(|v| *v != -51);
                        wcdma.signal.ber = wcdma.signal.ber.filter(|v| *v > 0);
                        wcdma.signal.ecno = wcdma.signal.ecno.filter(|v| *v != 0);
                        Cell::Wcdma(wcdma)
                    }
                    other => other,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellGsm, CellLte, CellWcdma, Connection, SignalGsm, SignalLte, SignalWcdma};
    use crate::postprocess::test_support::Fixture;
    use netmon_common::DeviceProfile;

    fn samsung() -> Fixture {
        Fixture::new(DeviceProfile::new("samsung", 30))
    }

    #[test]
    fn test_neighbour_sentinels_dropped() {
        let gsm = Cell::Gsm(CellGsm {
            signal: SignalGsm::new(Some(-51), Some(0), Some(0)),
            ..Default::default()
        });
        let lte = Cell::Lte(CellLte {
            signal: SignalLte {
                rssi: Some(-51),
                rsrp: Some(-100.0),
                timing_advance: Some(0),
                ..Default::default()
            },
            ..Default::default()
        });
        let wcdma = Cell::Wcdma(CellWcdma {
            signal: SignalWcdma {
                rssi: Some(-80),
                ecno: Some(0),
                ber: Some(3),
                ..Default::default()
            },
            ..Default::default()
        });

        let out = SamsungInvalidValuesPostprocessor.process(vec![gsm, lte, wcdma], &samsung().ctx());

        let Cell::Gsm(gsm) = &out[0] else { panic!("expected GSM") };
        assert_eq!(gsm.signal, SignalGsm::default());
        let Cell::Lte(lte) = &out[1] else { panic!("expected LTE") };
        assert_eq!(lte.signal.rssi, None);
        assert_eq!(lte.signal.timing_advance, None);
        assert_eq!(lte.signal.rsrp, Some(-100.0));
        let Cell::Wcdma(wcdma) = &out[2] else { panic!("expected WCDMA") };
        assert_eq!(wcdma.signal.rssi, Some(-80));
        assert_eq!(wcdma.signal.ecno, None);
        assert_eq!(wcdma.signal.ber, Some(3));
    }

    #[test]
    fn test_serving_cells_and_other_vendors_untouched() {
        let serving = Cell::Lte(CellLte {
            signal: SignalLte {
                rssi: Some(-51),
                timing_advance: Some(0),
                ..Default::default()
            },
            connection: Connection::primary(),
            ..Default::default()
        });
        let out = SamsungInvalidValuesPostprocessor.process(vec![serving.clone()], &samsung().ctx());
        assert_eq!(out, vec![serving]);

        let neighbour = Cell::Gsm(CellGsm {
            signal: SignalGsm::new(Some(-51), None, None),
            ..Default::default()
        });
        let generic = Fixture::generic();
        let out = SamsungInvalidValuesPostprocessor.process(vec![neighbour.clone()], &generic.ctx());
        assert_eq!(out, vec![neighbour]);
    }
}
