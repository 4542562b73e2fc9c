//! Per-subscription telephony state queried by postprocessors.
//!
//! Cell lists alone are often not enough to repair a cell. Stages look up
//! the registered operator, the physical channel configuration and similar
//! data through [`TelephonySnapshot`]. [`SnapshotData`] is a recorded
//! snapshot that can be loaded from YAML.

use std::collections::HashMap;

use netmon_common::{Network, SubscriptionId};
use serde::{Deserialize, Serialize};

use crate::model::{Cell, CellSkeleton, PhysicalChannelConfig, RegistrationHint};

/// Read access to what the platform reports next to cell lists.
pub trait TelephonySnapshot {
    /// Subscriptions in slot order.
    fn active_subscriptions(&self) -> Vec<SubscriptionId>;
    /// Operator the subscription is registered with.
    fn network_operator(&self, sub: SubscriptionId) -> Option<Network>;
    /// Registrations reported by the service state.
    fn registration_hints(&self, sub: SubscriptionId) -> Vec<RegistrationHint>;
    fn physical_channel_configs(&self, sub: SubscriptionId) -> Vec<PhysicalChannelConfig>;
    /// Channel bandwidths in kHz, serving cell first.
    fn cell_bandwidths(&self, sub: SubscriptionId) -> Vec<u32>;
    /// Serving cell as seen by the legacy location API.
    fn cell_skeleton(&self, sub: SubscriptionId) -> Option<CellSkeleton>;
    /// Serving cell as derived from the signal API.
    fn paired_cell(&self, sub: SubscriptionId) -> Option<Cell>;
    /// Raw service-state / display-info dump used for NSA detection.
    fn diagnostics(&self, sub: SubscriptionId) -> Option<String>;
    /// Network type code the platform reports for the subscription.
    fn network_type(&self, sub: SubscriptionId) -> Option<i32>;
}

/// Recorded snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotData {
    pub subscriptions: Vec<SubscriptionId>,
    pub network_operators: HashMap<SubscriptionId, Network>,
    pub registration_hints: HashMap<SubscriptionId, Vec<RegistrationHint>>,
    pub physical_channel_configs: HashMap<SubscriptionId, Vec<PhysicalChannelConfig>>,
    pub cell_bandwidths: HashMap<SubscriptionId, Vec<u32>>,
    pub cell_skeletons: HashMap<SubscriptionId, CellSkeleton>,
    pub paired_cells: HashMap<SubscriptionId, Cell>,
    pub diagnostics: HashMap<SubscriptionId, String>,
    pub network_types: HashMap<SubscriptionId, i32>,
}

impl SnapshotData {
    /// Snapshot with the given subscriptions and nothing else.
    pub fn with_subscriptions(subscriptions: &[SubscriptionId]) -> Self {
        Self {
            subscriptions: subscriptions.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_operator(mut self, sub: SubscriptionId, network: Network) -> Self {
        self.network_operators.insert(sub, network);
        self
    }
}

impl TelephonySnapshot for SnapshotData {
    fn active_subscriptions(&self) -> Vec<SubscriptionId> {
        self.subscriptions.clone()
    }

    fn network_operator(&self, sub: SubscriptionId) -> Option<Network> {
        self.network_operators.get(&sub).cloned()
    }

    fn registration_hints(&self, sub: SubscriptionId) -> Vec<RegistrationHint> {
        self.registration_hints.get(&sub).cloned().unwrap_or_default()
    }

    fn physical_channel_configs(&self, sub: SubscriptionId) -> Vec<PhysicalChannelConfig> {
        self.physical_channel_configs.get(&sub).cloned().unwrap_or_default()
    }

    fn cell_bandwidths(&self, sub: SubscriptionId) -> Vec<u32> {
        self.cell_bandwidths.get(&sub).cloned().unwrap_or_default()
    }

    fn cell_skeleton(&self, sub: SubscriptionId) -> Option<CellSkeleton> {
        self.cell_skeletons.get(&sub).copied()
    }

    fn paired_cell(&self, sub: SubscriptionId) -> Option<Cell> {
        self.paired_cells.get(&sub).cloned()
    }

    fn diagnostics(&self, sub: SubscriptionId) -> Option<String> {
        self.diagnostics.get(&sub).cloned()
    }

    fn network_type(&self, sub: SubscriptionId) -> Option<i32> {
        self.network_types.get(&sub).copied()
    }
}
