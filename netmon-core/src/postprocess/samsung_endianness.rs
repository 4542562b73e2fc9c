//! Samsung firmware from OS level 31 glues the two bytes of the serving
//! cell's LAC / TAC in the wrong order, e.g. 5220 (0x1464) instead of
//! 25620 (0x6414). The legacy location API still reports the right value,
//! which proves the swap whenever both APIs describe the same cell. Once
//! proven, the fix is remembered for the build.

use netmon_common::config::SAMSUNG_ENDIANNESS_MIN_OS_LEVEL;
use tracing::trace;

use super::{PipelineContext, Postprocessor};
use crate::model::{Cell, CellSkeleton, AREA_CODE_RANGE};
use crate::storage::StorageKey;

#[derive(Debug, Default)]
pub struct SamsungEndiannessPostprocessor;

impl Postprocessor for SamsungEndiannessPostprocessor {
    fn name(&self) -> &'static str {
        "samsung_endianness"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        if !ctx.device.is_samsung() || ctx.device.os_level < SAMSUNG_ENDIANNESS_MIN_OS_LEVEL {
            return cells;
        }

        let key = StorageKey::LocationAreaEndiannessIncorrect;
        cells
            .into_iter()
            .map(|cell| {
                if !cell.is_primary() {
                    return cell;
                }
                let skeleton = ctx.snapshot.cell_skeleton(cell.subscription_id());
                if ctx.storage.get_bool(key) {
                    // Already repaired
                    if skeleton.is_some_and(|s| is_same_cell(&cell, &s)) {
                        return cell;
                    }
                    return flip_area(cell);
                }

                if skeleton.is_some_and(|s| is_flipped_counterpart(&cell, &s)) {
                    trace!(sub = cell.subscription_id(), "Endianness flip detected");
                    ctx.storage.set_bool(key, true);
                    flip_area(cell)
                } else {
                    cell
                }
            })
            .collect()
    }
}

/// Swaps the two low bytes of a 16-bit value.
pub fn flip_endianness(n: u32) -> u32 {
    ((n & 0xFF) << 8) + ((n >> 8) & 0xFF)
}

/// True when `a` and `b` differ and each one's low byte is the other's
/// high byte.
pub fn has_flipped_endianness(a: Option<u32>, b: Option<u32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if a != b => a & 0xFF == (b >> 8) & 0xFF && b & 0xFF == (a >> 8) & 0xFF,
        _ => false,
    }
}

fn identity(cell: &Cell) -> Option<(Option<u32>, Option<u32>)> {
    match cell {
        Cell::Gsm(c) => Some((c.cid, c.lac)),
        Cell::Lte(c) => Some((c.eci, c.tac)),
        Cell::Tdscdma(c) => Some((c.ci, c.lac)),
        Cell::Wcdma(c) => Some((c.ci, c.lac)),
        Cell::Cdma(_) | Cell::Nr(_) => None,
    }
}

fn is_flipped_counterpart(cell: &Cell, skeleton: &CellSkeleton) -> bool {
    identity(cell).is_some_and(|(cid, area)| cid == skeleton.cid && has_flipped_endianness(area, skeleton.area))
}

fn is_same_cell(cell: &Cell, skeleton: &CellSkeleton) -> bool {
    identity(cell).is_some_and(|(cid, area)| cid.is_some() && cid == skeleton.cid && area == skeleton.area)
}

fn flip(area: Option<u32>) -> Option<u32> {
    area.map(flip_endianness).filter(|a| AREA_CODE_RANGE.contains(a))
}

fn flip_area(cell: Cell) -> Cell {
    match cell {
        Cell::Gsm(mut c) => {
            c.lac = flip(c.lac);
            Cell::Gsm(c)
        }
        Cell::Lte(mut c) => {
            c.tac = flip(c.tac);
            Cell::Lte(c)
        }
        Cell::Tdscdma(mut c) => {
            c.lac = flip(c.lac);
            Cell::Tdscdma(c)
        }
        Cell::Wcdma(mut c) => {
            c.lac = flip(c.lac);
            Cell::Wcdma(c)
        }
        other => other,
    }
}
