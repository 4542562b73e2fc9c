//! 5G non-standalone attach state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an LTE anchor offering NR did not attach the device to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The carrier restricts dual connectivity with NR for this device or PLMN.
    Restricted,
    /// NR is allowed but the device did not attach (weak signal, disabled by vendor, ...).
    NotRestricted,
    /// The two cases above cannot be told apart.
    Unknown,
}

/// NR leg of an EN-DC connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum NsaConnection {
    Connected,
    #[default]
    Disconnected,
    Rejected(RejectionReason),
}

impl fmt::Display for NsaConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NsaConnection::Connected => write!(f, "connected"),
            NsaConnection::Disconnected => write!(f, "disconnected"),
            NsaConnection::Rejected(reason) => write!(f, "rejected ({reason:?})"),
        }
    }
}

/// Derived NSA state of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NrNsaState {
    /// Serving LTE cell advertises EN-DC support.
    pub en_dc_available: bool,
    /// Serving LTE cell signals that NR is deployed.
    pub nr_available: bool,
    pub connection: NsaConnection,
}
