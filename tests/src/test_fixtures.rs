//! Test fixtures and configuration helpers
//!
//! Device profiles observed in the field and builders for the cells they
//! report.

use std::sync::Arc;

use netmon_common::{DeviceProfile, Network, NetmonConfig, PipelineConfig, SubscriptionId};
use netmon_core::band::{BandTableGsm, BandTableLte};
use netmon_core::model::{CellGsm, CellLte, CellNr, Connection, SignalGsm, SignalLte};
use netmon_core::{Cell, InMemoryStorage, Reconciler};

/// T-Mobile CZ
pub fn tmobile_cz() -> Network {
    network(230, 1)
}

/// Vodafone CZ
pub fn vodafone_cz() -> Network {
    network(230, 3)
}

/// Panics on invalid codes, fixtures only use valid ones.
pub fn network(mcc: u16, mnc: u16) -> Network {
    Network::new(mcc, mnc).unwrap_or_else(|| panic!("invalid PLMN {mcc}-{mnc}"))
}

/// Pixel 5, Android 12
pub fn pixel_5() -> DeviceProfile {
    DeviceProfile::new("Google", 31).with_product("redfin")
}

/// Pixel 7 Pro, Tensor G2
pub fn pixel_7_pro() -> DeviceProfile {
    DeviceProfile::new("Google", 33).with_product("cheetah")
}

/// Galaxy S21 on Android 12 or later
pub fn galaxy_s21(os_level: u32) -> DeviceProfile {
    DeviceProfile::new("samsung", os_level).with_product("o1sxeea")
}

/// LG dual SIM phone from before per-subscription cell queries
pub fn legacy_dual_sim() -> DeviceProfile {
    DeviceProfile::new("LGE", 28).with_product("judyln")
}

/// Configuration for `device` with everything else at defaults
pub fn config_for(device: DeviceProfile) -> NetmonConfig {
    NetmonConfig {
        device,
        ..Default::default()
    }
}

/// Reconciler over fresh in-memory storage, returned alongside for inspection
pub fn reconciler_for(device: DeviceProfile, pipeline: PipelineConfig) -> (Reconciler, Arc<InMemoryStorage>) {
    let storage = Arc::new(InMemoryStorage::new(&device.build_fingerprint));
    let reconciler = Reconciler::new(storage.clone(), device, pipeline);
    (reconciler, storage)
}

/// Serving LTE cell
pub fn lte_serving(sub: SubscriptionId, network: Network, eci: u32, tac: u32, pci: u32, earfcn: u32) -> Cell {
    Cell::Lte(CellLte {
        network: Some(network),
        eci: Some(eci),
        tac: Some(tac),
        pci: Some(pci),
        band: Some(BandTableLte::map(earfcn)),
        signal: SignalLte {
            rssi: Some(-71),
            rsrp: Some(-98.0),
            rsrq: Some(-9.0),
            ..Default::default()
        },
        connection: Connection::primary(),
        subscription_id: sub,
        ..Default::default()
    })
}

/// LTE neighbour as reported by the modern API
pub fn lte_neighbour(sub: SubscriptionId, network: Option<Network>, pci: u32, earfcn: u32) -> Cell {
    Cell::Lte(CellLte {
        network,
        pci: Some(pci),
        band: Some(BandTableLte::map(earfcn)),
        signal: SignalLte {
            rsrp: Some(-110.0),
            rsrq: Some(-14.0),
            ..Default::default()
        },
        subscription_id: sub,
        ..Default::default()
    })
}

/// NR leg of an EN-DC connection, without identity
pub fn nr_secondary(sub: SubscriptionId) -> Cell {
    Cell::Nr(CellNr {
        connection: Connection::secondary(false),
        subscription_id: sub,
        ..Default::default()
    })
}

/// Serving GSM cell
pub fn gsm_serving(sub: SubscriptionId, network: Option<Network>, cid: u32, lac: Option<u32>, rssi: i32) -> Cell {
    let mcc = network.as_ref().map(|n| n.mcc().to_string());
    Cell::Gsm(CellGsm {
        network,
        cid: Some(cid),
        lac,
        bsic: Some(21),
        band: Some(BandTableGsm::map(46, mcc.as_deref())),
        signal: SignalGsm::new(Some(rssi), None, None),
        connection: Connection::primary(),
        subscription_id: sub,
        ..Default::default()
    })
}

/// The list every SIM handle of a legacy dual SIM phone returns: the cells
/// of SIM 1 followed by the cells of SIM 2, each block led by its serving
/// cell. Both copies carry the handle's own subscription id.
pub fn duplicated_dual_sim_list(first: Network, second: Network) -> Vec<Cell> {
    let block = |sub: SubscriptionId| {
        vec![
            lte_serving(sub, first.clone(), 26_123_267, 15_100, 101, 1_650),
            lte_neighbour(sub, Some(first.clone()), 102, 1_650),
            lte_serving(sub, second.clone(), 27_000_001, 15_200, 201, 6_300),
            lte_neighbour(sub, Some(second.clone()), 202, 6_300),
            lte_neighbour(sub, Some(second.clone()), 203, 6_300),
        ]
    };
    let mut cells = block(1);
    cells.extend(block(2));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devices() {
        assert!(galaxy_s21(31).is_samsung());
        assert!(pixel_7_pro().is_pixel_tensor());
        assert!(!pixel_5().is_pixel_tensor());
        assert_eq!(legacy_dual_sim().os_level, 28);
    }

    #[test]
    fn test_config_for_round_trip() {
        let config = config_for(galaxy_s21(31));
        let yaml = config.to_yaml().unwrap();
        assert_eq!(NetmonConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_duplicated_list_shape() {
        let cells = duplicated_dual_sim_list(vodafone_cz(), vodafone_cz());
        assert_eq!(cells.len(), 10);
        assert_eq!(cells.iter().filter(|c| c.is_primary()).count(), 4);
    }
}
