//! Merging of cell lists coming from different platform sources
//!
//! The legacy single-cell and neighbour APIs report fewer fields but are
//! sometimes more accurate than the modern multi-cell API. [`CellMerger`]
//! combines both per subscription, [`SignalMerger`] folds in cells derived
//! from the signal-strength API and [`RegistrationMerger`] appends serving
//! cells known only from network registration info.

pub mod neighbour;
pub mod primary;
pub mod registration;
pub mod signal;

use netmon_common::SubscriptionId;
use tracing::debug;

use crate::model::Cell;

pub use neighbour::NeighbourMerger;
pub use primary::PrimaryMerger;
pub use registration::RegistrationMerger;
pub use signal::SignalMerger;

/// Merges two lists of cells of the same role into one without duplicates.
///
/// The result holds at least `max(legacy.len(), modern.len())` and at most
/// `legacy.len() + modern.len()` cells.
pub trait SourceMerger {
    fn merge(&self, legacy: Vec<Cell>, modern: Vec<Cell>, display_on: bool) -> Vec<Cell>;
}

/// Picks the better of two RSSI readings, favouring the weaker one unless it
/// equals `sentinel`, which some devices report constantly.
pub fn pick_better_rssi(new: Option<i32>, old: Option<i32>, sentinel: i32) -> Option<i32> {
    if new == old {
        return new;
    }
    let min = match (new, old) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    if min == Some(sentinel) {
        match (new, old) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    } else {
        min
    }
}

/// Removes and returns the first cell of `pool` accepted by `matches`.
pub(crate) fn take_first(pool: &mut Vec<Cell>, matches: impl Fn(&Cell) -> bool) -> Option<Cell> {
    let index = pool.iter().position(matches)?;
    Some(pool.remove(index))
}

/// Combines legacy and modern cells subscription by subscription.
#[derive(Debug, Default)]
pub struct CellMerger {
    primary: PrimaryMerger,
    neighbour: NeighbourMerger,
}

impl CellMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges both sources. Subscriptions are emitted in the order of
    /// `subscriptions`, followed by any other subscription found in the
    /// inputs in first-seen order.
    pub fn merge(
        &self,
        legacy: &[Cell],
        modern: &[Cell],
        display_on: bool,
        subscriptions: &[SubscriptionId],
    ) -> Vec<Cell> {
        let mut order: Vec<SubscriptionId> = subscriptions.to_vec();
        for cell in legacy.iter().chain(modern) {
            let sub = cell.subscription_id();
            if !order.contains(&sub) {
                order.push(sub);
            }
        }

        let mut merged = Vec::with_capacity(legacy.len().max(modern.len()));
        for sub in order {
            // A single source keeps its own order
            let legacy_own = legacy.iter().filter(|c| c.subscription_id() == sub);
            let modern_own = modern.iter().filter(|c| c.subscription_id() == sub);
            if legacy_own.clone().next().is_none() {
                merged.extend(modern_own.cloned());
                continue;
            }
            if modern_own.clone().next().is_none() {
                merged.extend(legacy_own.cloned());
                continue;
            }

            let (legacy_primary, legacy_other) = split_by_role(legacy, sub);
            let (modern_primary, modern_other) = split_by_role(modern, sub);

            merged.extend(self.primary.merge(legacy_primary, modern_primary, display_on));
            merged.extend(self.neighbour.merge(legacy_other, modern_other, display_on));
        }

        debug!(
            legacy = legacy.len(),
            modern = modern.len(),
            merged = merged.len(),
            "Merged cell sources"
        );
        merged
    }
}

/// Cells of `sub`, split into primary and everything else.
fn split_by_role(cells: &[Cell], sub: SubscriptionId) -> (Vec<Cell>, Vec<Cell>) {
    cells
        .iter()
        .filter(|c| c.subscription_id() == sub)
        .cloned()
        .partition(Cell::is_primary)
}
