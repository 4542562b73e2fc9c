//! Physical channel configuration reported by the modem.
//!
//! The platform only exposes these as `toString()` dumps such as
//! `{mConnectionStatus=PrimaryServing,mCellBandwidthDownlinkKhz=10000,...}`,
//! so they are parsed field by field. Unknown or out-of-range values are
//! left empty.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::cell::{LTE_BANDWIDTH_RANGE, LTE_PCI_RANGE};
use super::connection::Connection;
use crate::pattern::{first_capture, LazyRegex};

/// Valid downlink EARFCN, 18 bits.
pub const LTE_EARFCN_RANGE: RangeInclusive<u32> = 0..=262_143;

static CONNECTION: LazyRegex = LazyLock::new(|| Regex::new(r"mConnectionStatus=([^,}]*)"));
static BANDWIDTH: LazyRegex = LazyLock::new(|| Regex::new(r"mCellBandwidthDownlinkKhz=([0-9]{4,10})"));
static CHANNEL: LazyRegex = LazyLock::new(|| Regex::new(r"mChannelNumber=([0-9]{1,10})"));
static PCI: LazyRegex = LazyLock::new(|| Regex::new(r"mPhysicalCellId=([0-9]{1,10})"));

/// One physical channel the modem is currently using.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalChannelConfig {
    /// Role of the channel
    pub connection: Connection,
    /// Downlink bandwidth, kHz
    pub bandwidth: Option<u32>,
    /// Downlink EARFCN
    pub channel_number: Option<u32>,
    /// Physical cell id
    pub pci: Option<u32>,
}

fn number_in(text: &str, re: &LazyRegex, range: RangeInclusive<u32>) -> Option<u32> {
    first_capture(re, text)?
        .parse::<u64>()
        .ok()
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| range.contains(v))
}

impl PhysicalChannelConfig {
    /// Parses the platform's textual dump of a physical channel config.
    pub fn parse(text: &str) -> Self {
        let connection = match first_capture(&CONNECTION, text) {
            Some("PrimaryServing") => Connection::primary(),
            Some("SecondaryServing") => Connection::secondary(false),
            _ => Connection::None,
        };

        Self {
            connection,
            bandwidth: number_in(text, &BANDWIDTH, LTE_BANDWIDTH_RANGE),
            channel_number: number_in(text, &CHANNEL, LTE_EARFCN_RANGE),
            pci: number_in(text, &PCI, LTE_PCI_RANGE),
        }
    }
}
