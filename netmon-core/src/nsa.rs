//! NR non-standalone (EN-DC) state detection.
//!
//! The platform exposes the NSA state only through the textual dump of its
//! service state. Vendors disagree on the field names:
//!
//! - `nrState=CONNECTED`: AOSP, Android 10 and 11
//! - `nsaState=5`: Huawei, Android 9
//! - `EnDc=true` together with `5G Allocated=true`: LG, Android 9
//!
//! From Android 12 on `nrState` is masked as `****`. In that case the
//! availability flags are combined with the current cell list: a serving
//! LTE cell plus a secondary NR cell means NR is attached.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::model::{Cell, NrNsaState, NsaConnection, RejectionReason};
use crate::pattern::LazyRegex;

static STRING: LazyRegex = LazyLock::new(|| Regex::new(r"^ ?=? ?([a-zA-Z*_]*)"));
static NUMBER: LazyRegex = LazyLock::new(|| Regex::new(r"^ ?=? ?([0-9]*)"));
static BOOLEAN: LazyRegex = LazyLock::new(|| Regex::new(r"^ ?=? ?(true|false)"));

/// Huawei `nsaState` value for an attached NR leg.
const NSA_STATE_CONNECTED: u32 = 5;

/// Huawei `nsaState` values announcing NR without an attached leg.
const NSA_STATE_AVAILABLE: std::ops::RangeInclusive<u32> = 2..=4;

/// Derives [`NrNsaState`] from a service state dump.
#[derive(Debug, Default, Clone, Copy)]
pub struct NrNsaStateParser;

impl NrNsaStateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `diagnostics` for one subscription. `cells` are the reconciled
    /// cells of the same subscription, consulted when the dump is masked.
    pub fn parse(&self, diagnostics: &str, cells: &[Cell]) -> NrNsaState {
        let nr_state: Vec<String> = field(diagnostics, "nrState", &STRING)
            .map(str::to_uppercase)
            .collect();
        let nsa_state: Vec<u32> = field(diagnostics, "nsaState", &NUMBER)
            .filter_map(|v| v.parse().ok())
            .collect();

        let nsa_connected = nsa_state.contains(&NSA_STATE_CONNECTED);
        let nsa_available = nsa_state.iter().any(|v| NSA_STATE_AVAILABLE.contains(v));
        let en_dc = flag(diagnostics, "EnDc");
        let allocated = flag(diagnostics, "5G Allocated");

        let dc_nr_restricted = flag(diagnostics, "isDcNrRestricted");
        let nr_available = flag(diagnostics, "isNrAvailable");
        let en_dc_available = flag(diagnostics, "isEnDcAvailable");

        let has_state = |s: &str| nr_state.iter().any(|v| v == s);

        let connection = if en_dc && allocated {
            NsaConnection::Connected
        } else if nsa_connected {
            NsaConnection::Connected
        } else if has_state("CONNECTED") {
            NsaConnection::Connected
        } else if has_state("NOT_RESTRICTED") {
            NsaConnection::Rejected(RejectionReason::NotRestricted)
        } else if has_state("RESTRICTED") || dc_nr_restricted {
            NsaConnection::Rejected(RejectionReason::Restricted)
        } else if has_state("NONE") {
            NsaConnection::Disconnected
        } else if nr_available && has_secondary_nr(cells) {
            // Masked nrState
            NsaConnection::Connected
        } else if nr_available && dc_nr_restricted {
            NsaConnection::Rejected(RejectionReason::Restricted)
        } else if nr_available {
            NsaConnection::Rejected(RejectionReason::NotRestricted)
        } else if en_dc_available {
            NsaConnection::Rejected(RejectionReason::Unknown)
        } else {
            NsaConnection::Disconnected
        };

        let state = NrNsaState {
            en_dc_available: en_dc || en_dc_available || nsa_connected,
            nr_available: nr_available || nsa_connected || nsa_available,
            connection,
        };
        trace!(?state, "NSA state parsed");
        state
    }
}

/// Non-blank values that follow each occurrence of `name` in `source`.
fn field<'s>(source: &'s str, name: &'s str, re: &'s LazyRegex) -> impl Iterator<Item = &'s str> {
    let re = re.as_ref().ok();
    source.split(name).skip(1).filter_map(move |fragment| {
        let value = re?.captures(fragment)?.get(1)?.as_str();
        (!value.trim().is_empty()).then_some(value)
    })
}

/// True if any occurrence of the boolean field `name` is `true`.
fn flag(source: &str, name: &str) -> bool {
    field(source, name, &BOOLEAN).any(|v| v == "true")
}

pub(crate) fn has_secondary_nr(cells: &[Cell]) -> bool {
    let serving_lte = cells.iter().any(|c| matches!(c, Cell::Lte(lte) if lte.connection.is_primary()));
    let secondary_nr = cells.iter().any(|c| matches!(c, Cell::Nr(nr) if nr.connection.is_secondary()));
    serving_lte && secondary_nr
}
