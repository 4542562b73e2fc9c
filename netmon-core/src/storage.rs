//! Persistent flags learned by postprocessors.
//!
//! Some firmware quirks can only be detected occasionally (a swapped area
//! code is only provable while the legacy API agrees with the modern one).
//! Once seen, the fact is remembered so later runs can apply the fix
//! unconditionally. Keys embed the build fingerprint, which resets every
//! flag after a firmware update.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use netmon_common::SubscriptionId;

/// Flags the pipeline persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// A serving LTE cell reported its own bandwidth, so service-state
    /// bandwidths are not needed.
    ReportsLteBandwidthDirectly,
    /// The firmware swaps the two bytes of LAC / TAC.
    LocationAreaEndiannessIncorrect,
    /// The modem reports real LTE timing advance values (per subscription).
    ReportsLteTimingAdvance,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::ReportsLteBandwidthDirectly => "reports_lte_bandwidth_directly",
            StorageKey::LocationAreaEndiannessIncorrect => "location_area_endianness_incorrect",
            StorageKey::ReportsLteTimingAdvance => "reports_lte_timing_advance",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean key-value store scoped to one device build.
///
/// Implementations must be usable from several threads; setters take
/// `&self`.
pub trait Storage: Send + Sync {
    fn get_bool(&self, key: StorageKey) -> bool;
    fn set_bool(&self, key: StorageKey, value: bool);
    fn get_bool_for(&self, key: StorageKey, sub: SubscriptionId) -> bool;
    fn set_bool_for(&self, key: StorageKey, sub: SubscriptionId, value: bool);
}

/// In-process storage.
#[derive(Debug)]
pub struct InMemoryStorage {
    fingerprint: String,
    flags: Mutex<HashMap<String, bool>>,
}

impl InMemoryStorage {
    pub fn new(fingerprint: &str) -> Self {
        Self {
            fingerprint: fingerprint.to_string(),
            flags: Mutex::new(HashMap::new()),
        }
    }

    fn key(&self, key: StorageKey) -> String {
        format!("{}:{}", self.fingerprint, key)
    }

    fn sub_key(&self, key: StorageKey, sub: SubscriptionId) -> String {
        format!("{}:{}:{}", self.fingerprint, key, sub)
    }

    /// Locks the map, taking over a poisoned lock.
    fn flags(&self) -> MutexGuard<'_, HashMap<String, bool>> {
        self.flags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored flags.
    pub fn len(&self) -> usize {
        self.flags().len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags().is_empty()
    }
}

impl Storage for InMemoryStorage {
    fn get_bool(&self, key: StorageKey) -> bool {
        self.flags().get(&self.key(key)).copied().unwrap_or(false)
    }

    fn set_bool(&self, key: StorageKey, value: bool) {
        self.flags().insert(self.key(key), value);
    }

    fn get_bool_for(&self, key: StorageKey, sub: SubscriptionId) -> bool {
        self.flags().get(&self.sub_key(key, sub)).copied().unwrap_or(false)
    }

    fn set_bool_for(&self, key: StorageKey, sub: SubscriptionId, value: bool) {
        self.flags().insert(self.sub_key(key, sub), value);
    }
}

/// Storage that forgets everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorage;

impl Storage for NoopStorage {
    fn get_bool(&self, _key: StorageKey) -> bool {
        false
    }

    fn set_bool(&self, _key: StorageKey, _value: bool) {}

    fn get_bool_for(&self, _key: StorageKey, _sub: SubscriptionId) -> bool {
        false
    }

    fn set_bool_for(&self, _key: StorageKey, _sub: SubscriptionId, _value: bool) {}
}
