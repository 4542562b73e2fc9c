//! Channel number to band lookup tables
//!
//! One table per technology. Tables are ordered static data; lookups never
//! fail and return a descriptor carrying only the channel number when no
//! range contains it.
//!
//! Tables follow 3GPP TS 45.005 (GSM), TS 25.101 (WCDMA), TS 36.101 (LTE)
//! and TS 38.101-1 (NR).

pub mod gsm;
pub mod lte;
pub mod network_type;
pub mod nr;
pub mod tdscdma;
pub mod wcdma;

use std::ops::RangeInclusive;

pub use gsm::BandTableGsm;
pub use lte::BandTableLte;
pub use network_type::{NetworkTechnology, NetworkTypeTable};
pub use nr::BandTableNr;
pub use tdscdma::BandTableTdscdma;
pub use wcdma::BandTableWcdma;

/// One row of a band table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandEntry {
    /// Downlink channel numbers belonging to the band
    pub channels: RangeInclusive<u32>,
    /// Common band name, usually the approximate frequency in MHz
    pub name: &'static str,
    /// 3GPP band number. GSM uses the frequency instead.
    pub number: Option<u32>,
}

impl BandEntry {
    pub(crate) const fn new(channels: RangeInclusive<u32>, name: &'static str, number: u32) -> Self {
        Self {
            channels,
            name,
            number: Some(number),
        }
    }

    pub fn contains(&self, channel: u32) -> bool {
        self.channels.contains(&channel)
    }
}

/// First entry of `table` containing `channel`.
fn first_match(table: &'static [BandEntry], channel: u32) -> Option<&'static BandEntry> {
    table.iter().find(|entry| entry.contains(channel))
}

/// Last entry of `table` containing `channel`.
fn last_match(table: &'static [BandEntry], channel: u32) -> Option<&'static BandEntry> {
    table.iter().rev().find(|entry| entry.contains(channel))
}
