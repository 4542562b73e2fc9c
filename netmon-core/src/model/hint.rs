//! Auxiliary per-subscription data the platform reports next to cell lists.

use netmon_common::Network;
use serde::{Deserialize, Serialize};

/// PLMN the modem registered on, together with the cell it registered through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationHint {
    pub network: Network,
    /// Channel number of the registered cell. GSM leaves it empty.
    #[serde(default)]
    pub channel_number: Option<u32>,
    /// Full cell id of the registered cell.
    #[serde(default)]
    pub cid: Option<u64>,
}

/// Serving cell identity as reported by the legacy single-cell API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSkeleton {
    /// Longest cell id available
    pub cid: Option<u32>,
    /// Location or tracking area code, 16 bits at most
    pub area: Option<u32>,
}
