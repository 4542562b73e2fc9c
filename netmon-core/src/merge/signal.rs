//! Folding NR cells of the signal-strength API into the cell list.
//!
//! In NSA mode many modems report the NR leg only through the signal API,
//! or report it through both APIs with identity in one and signal in the
//! other.

use tracing::trace;

use crate::model::{Cell, CellNr, Connection, SignalNr};

#[derive(Debug, Default)]
pub struct SignalMerger;

impl SignalMerger {
    /// Adds NR cells from `signal_api` whose subscription has no serving NR
    /// cell in `cells`, merging them into an existing NR cell when the
    /// pairing is unambiguous.
    pub fn merge(&self, cells: Vec<Cell>, signal_api: &[Cell]) -> Vec<Cell> {
        let signal_nr: Vec<&CellNr> = signal_api
            .iter()
            .filter_map(|c| match c {
                Cell::Nr(nr) => Some(nr),
                _ => None,
            })
            .collect();

        let nr_indices: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Cell::Nr(_)))
            .map(|(i, _)| i)
            .collect();

        let non_present: Vec<&CellNr> = signal_nr
            .iter()
            .copied()
            .filter(|signal| {
                !nr_indices.iter().any(|&i| {
                    cells[i].subscription_id() == signal.subscription_id && cells[i].is_primary()
                })
            })
            .collect();

        if non_present.is_empty() {
            return cells;
        }

        let mut cells = cells;
        match (nr_indices.as_slice(), signal_nr.as_slice()) {
            ([index], [signal]) => {
                trace!(index, "Merging lone NR cell with signal API");
                merge_at(&mut cells, *index, signal);
                cells
            }
            ([_, _, ..], [signal]) => {
                let same_sub = nr_indices
                    .iter()
                    .copied()
                    .find(|&i| cells[i].subscription_id() == signal.subscription_id);
                match same_sub {
                    Some(index) => merge_at(&mut cells, index, signal),
                    None => cells.extend(non_present.into_iter().cloned().map(Cell::Nr)),
                }
                cells
            }
            _ => {
                let added: Vec<Cell> = non_present
                    .into_iter()
                    .map(|nr| {
                        let mut nr = nr.clone();
                        if nr.network.is_none() {
                            nr.network = cells
                                .iter()
                                .find_map(|c| match c {
                                    Cell::Lte(lte) if lte.subscription_id == nr.subscription_id => {
                                        Some(lte.network.clone())
                                    }
                                    _ => None,
                                })
                                .flatten();
                        }
                        Cell::Nr(nr)
                    })
                    .collect();
                cells.extend(added);
                cells
            }
        }
    }
}

fn merge_at(cells: &mut [Cell], index: usize, signal: &CellNr) {
    if let Cell::Nr(nr) = &mut cells[index] {
        *nr = merge_nr(nr, signal);
    }
}

fn merge_nr(cell: &CellNr, other: &CellNr) -> CellNr {
    let connection = [&cell.connection, &other.connection]
        .into_iter()
        .find(|c| c.is_primary())
        .or_else(|| [&cell.connection, &other.connection].into_iter().find(|c| c.is_secondary()))
        .cloned()
        .unwrap_or(Connection::None);

    CellNr {
        network: cell.network.clone().or_else(|| other.network.clone()),
        nci: cell.nci.or(other.nci),
        tac: cell.tac.or(other.tac),
        pci: cell.pci.or(other.pci),
        band: cell.band.clone().or_else(|| other.band.clone()),
        signal: min_signal(&cell.signal, &other.signal),
        connection,
        ..cell.clone()
    }
}

/// Each metric is the minimum of the present values. SINR 0 is a common
/// placeholder and only wins when nothing else is reported.
fn min_signal(a: &SignalNr, b: &SignalNr) -> SignalNr {
    SignalNr {
        csi_rsrp: pick_min(a.csi_rsrp, b.csi_rsrp, None),
        csi_rsrq: pick_min(a.csi_rsrq, b.csi_rsrq, None),
        csi_sinr: pick_min(a.csi_sinr, b.csi_sinr, Some(0)),
        ss_rsrp: pick_min(a.ss_rsrp, b.ss_rsrp, None),
        ss_rsrq: pick_min(a.ss_rsrq, b.ss_rsrq, None),
        ss_sinr: pick_min(a.ss_sinr, b.ss_sinr, Some(0)),
    }
}

fn pick_min(a: Option<i32>, b: Option<i32>, ignorable: Option<i32>) -> Option<i32> {
    let present = || a.into_iter().chain(b);
    present()
        .filter(|v| Some(*v) != ignorable)
        .min()
        .or_else(|| present().min())
}
