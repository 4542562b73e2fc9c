//! Network type detection.
//!
//! The platform's own network type never reports carrier aggregation,
//! dual carrier HSPA+ or an attached NR leg reliably. Several weaker
//! signals are tried first, strongest first; the platform code is the
//! last resort.

use std::sync::LazyLock;

use netmon_common::SubscriptionId;
use regex::Regex;
use tracing::trace;

use crate::band::{NetworkTechnology, NetworkTypeTable};
use crate::model::{Band, BandLte, Cell, NrNsaState, NsaConnection};
use crate::nsa::has_secondary_nr;
use crate::pattern::LazyRegex;
use crate::snapshot::TelephonySnapshot;

/// `IsUsingCarrierAggregation=true` (Android 8) and `mIsUsingCarrierAggregation = true` (later).
static CARRIER_AGGREGATION: LazyRegex = LazyLock::new(|| Regex::new(r"IsUsingCarrierAggregation ?= ?true"));

/// Huawei reports `accessNetworkTechnology=LTE-CA`, LG `AdvanceMode1`.
const VENDOR_CA_MARKERS: [&str; 2] = ["accessNetworkTechnology=LTE-CA", "AdvanceMode1"];

/// Carrier aggregation flags are only meaningful while camped on LTE.
const LTE_CELL_IDENTITY: &str = "cellIdentity=CellIdentityLte";

#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkTypeDetector;

impl NetworkTypeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Network type of `sub`. `cells` are the reconciled cells, `nsa` the
    /// NSA state parsed from the same snapshot, if any.
    pub fn detect(
        &self,
        sub: SubscriptionId,
        cells: &[Cell],
        snapshot: &dyn TelephonySnapshot,
        nsa: Option<&NrNsaState>,
    ) -> NetworkTechnology {
        let own: Vec<Cell> = cells.iter().filter(|c| c.subscription_id() == sub).cloned().collect();

        let detected = detect_hspa_dc(&own)
            .or_else(|| detect_service_state(snapshot.diagnostics(sub).as_deref(), nsa))
            .or_else(|| detect_physical_channels(snapshot, sub))
            .or_else(|| detect_cell_info(&own));
        if let Some(technology) = detected {
            trace!(sub, %technology, "Network type detected");
            return technology;
        }

        snapshot
            .network_type(sub)
            .map(NetworkTypeTable::get)
            .unwrap_or(NetworkTechnology::Unknown)
    }
}

/// A WCDMA neighbour in the serving band on another UARFCN means a second
/// carrier.
fn detect_hspa_dc(cells: &[Cell]) -> Option<NetworkTechnology> {
    let wcdma = cells.iter().filter_map(|c| match c {
        Cell::Wcdma(w) => w.band.as_ref().map(|band| (w.connection.is_primary(), band)),
        _ => None,
    });
    let (primary, other): (Vec<_>, Vec<_>) = wcdma.partition(|(is_primary, _)| *is_primary);

    let dual = other.iter().any(|(_, secondary)| {
        primary.iter().any(|(_, serving)| {
            serving.number() == secondary.number() && serving.channel_number() != secondary.channel_number()
        })
    });
    dual.then_some(NetworkTechnology::HspaDc)
}

fn detect_service_state(diagnostics: Option<&str>, nsa: Option<&NrNsaState>) -> Option<NetworkTechnology> {
    let lte_ca = diagnostics.is_some_and(is_using_carrier_aggregation);
    let nr = nsa.is_some_and(|state| state.connection == NsaConnection::Connected);
    combine(lte_ca, nr)
}

fn is_using_carrier_aggregation(diagnostics: &str) -> bool {
    let flagged = CARRIER_AGGREGATION.as_ref().is_ok_and(|re| re.is_match(diagnostics))
        || VENDOR_CA_MARKERS.iter().any(|m| diagnostics.contains(m));
    flagged && diagnostics.contains(LTE_CELL_IDENTITY)
}

fn detect_physical_channels(snapshot: &dyn TelephonySnapshot, sub: SubscriptionId) -> Option<NetworkTechnology> {
    let configs = snapshot.physical_channel_configs(sub);
    let aggregated = configs.len() > 1 && configs.iter().any(|c| c.connection.is_secondary());
    aggregated.then_some(NetworkTechnology::LteCa)
}

fn detect_cell_info(cells: &[Cell]) -> Option<NetworkTechnology> {
    combine(is_lte_ca_from_cells(cells), has_secondary_nr(cells))
}

/// LTE cells in a band other than the serving ones. Old platforms map an
/// invalid EARFCN to no band at all, which counts only when it is the sole
/// extra band.
fn is_lte_ca_from_cells(cells: &[Cell]) -> bool {
    let mut serving: Vec<&BandLte> = Vec::new();
    let mut others: Vec<Option<&BandLte>> = Vec::new();
    for cell in cells {
        let Cell::Lte(lte) = cell else { continue };
        if lte.connection.is_primary() {
            if let Some(band) = &lte.band {
                if !serving.contains(&band) {
                    serving.push(band);
                }
            }
        } else if !others.contains(&lte.band.as_ref()) {
            others.push(lte.band.as_ref());
        }
    }
    if serving.is_empty() {
        return false;
    }

    others.retain(|other| {
        let number = other.and_then(Band::number);
        !serving.iter().any(|band| band.number() == number)
    });
    let unknown = others.iter().any(Option::is_none);
    (unknown && others.len() == 1) || (!unknown && !others.is_empty())
}

fn combine(lte_ca: bool, nr: bool) -> Option<NetworkTechnology> {
    match (lte_ca, nr) {
        (true, true) => Some(NetworkTechnology::LteCaNr),
        (false, true) => Some(NetworkTechnology::LteNr),
        (true, false) => Some(NetworkTechnology::LteCa),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::{BandTableLte, BandTableWcdma};
    use crate::model::{CellLte, CellNr, CellWcdma, Connection, PhysicalChannelConfig};
    use crate::snapshot::SnapshotData;

    fn lte(earfcn: Option<u32>, connection: Connection) -> Cell {
        Cell::Lte(CellLte {
            band: earfcn.map(BandTableLte::map),
            connection,
            subscription_id: 1,
            ..Default::default()
        })
    }

    fn wcdma(uarfcn: u32, connection: Connection) -> Cell {
        Cell::Wcdma(CellWcdma {
            band: Some(BandTableWcdma::map(uarfcn)),
            connection,
            subscription_id: 1,
            ..Default::default()
        })
    }

    fn nr_secondary() -> Cell {
        Cell::Nr(CellNr {
            connection: Connection::secondary(false),
            subscription_id: 1,
            ..Default::default()
        })
    }

    fn detect(cells: &[Cell], snapshot: &SnapshotData, nsa: Option<&NrNsaState>) -> NetworkTechnology {
        NetworkTypeDetector::new().detect(1, cells, snapshot, nsa)
    }

    #[test]
    fn test_hspa_dc() {
        let snapshot = SnapshotData::with_subscriptions(&[1]);
        let cells = vec![wcdma(10_700, Connection::primary()), wcdma(10_725, Connection::None)];
        assert_eq!(detect(&cells, &snapshot, None), NetworkTechnology::HspaDc);

        let single = vec![wcdma(10_700, Connection::primary()), wcdma(10_700, Connection::None)];
        assert_ne!(detect(&single, &snapshot, None), NetworkTechnology::HspaDc);
    }

    #[test]
    fn test_service_state_ca_and_nr() {
        let mut snapshot = SnapshotData::with_subscriptions(&[1]);
        snapshot.diagnostics.insert(
            1,
            "{mIsUsingCarrierAggregation = true, cellIdentity=CellIdentityLte:{ mPci=101 }}".to_string(),
        );
        let connected = NrNsaState {
            en_dc_available: true,
            nr_available: true,
            connection: NsaConnection::Connected,
        };

        assert_eq!(detect(&[], &snapshot, None), NetworkTechnology::LteCa);
        assert_eq!(detect(&[], &snapshot, Some(&connected)), NetworkTechnology::LteCaNr);

        let plain = SnapshotData::with_subscriptions(&[1]);
        assert_eq!(detect(&[], &plain, Some(&connected)), NetworkTechnology::LteNr);
    }

    #[test]
    fn test_ca_flag_needs_lte_identity() {
        assert!(is_using_carrier_aggregation("AdvanceMode1 cellIdentity=CellIdentityLte:{}"));
        assert!(!is_using_carrier_aggregation("mIsUsingCarrierAggregation=true cellIdentity=CellIdentityWcdma:{}"));
    }

    #[test]
    fn test_physical_channels() {
        let mut snapshot = SnapshotData::with_subscriptions(&[1]);
        snapshot.physical_channel_configs.insert(
            1,
            vec![
                PhysicalChannelConfig {
                    connection: Connection::primary(),
                    bandwidth: Some(20_000),
                    channel_number: None,
                    pci: Some(101),
                },
                PhysicalChannelConfig {
                    connection: Connection::secondary(false),
                    bandwidth: Some(10_000),
                    channel_number: None,
                    pci: Some(201),
                },
            ],
        );
        assert_eq!(detect(&[], &snapshot, None), NetworkTechnology::LteCa);
    }

    #[test]
    fn test_cell_info() {
        let snapshot = SnapshotData::with_subscriptions(&[1]);

        // Band 3 serving, band 20 neighbour
        let ca = vec![lte(Some(1_650), Connection::primary()), lte(Some(6_300), Connection::None)];
        assert_eq!(detect(&ca, &snapshot, None), NetworkTechnology::LteCa);

        let same_band = vec![lte(Some(1_650), Connection::primary()), lte(Some(1_849), Connection::None)];
        assert_eq!(detect(&same_band, &snapshot, None), NetworkTechnology::Unknown);

        let mut endc = ca.clone();
        endc.push(nr_secondary());
        assert_eq!(detect(&endc, &snapshot, None), NetworkTechnology::LteCaNr);
    }

    #[test]
    fn test_unknown_band_counts_alone() {
        let snapshot = SnapshotData::with_subscriptions(&[1]);
        let cells = vec![lte(Some(1_650), Connection::primary()), lte(None, Connection::None)];
        assert_eq!(detect(&cells, &snapshot, None), NetworkTechnology::LteCa);

        let mixed = vec![
            lte(Some(1_650), Connection::primary()),
            lte(None, Connection::None),
            lte(Some(6_300), Connection::None),
        ];
        assert_eq!(detect(&mixed, &snapshot, None), NetworkTechnology::Unknown);
    }

    #[test]
    fn test_platform_fallback() {
        let mut snapshot = SnapshotData::with_subscriptions(&[1, 2]);
        snapshot.network_types.insert(1, 15);
        let cells = vec![lte(Some(1_650), Connection::primary())];

        assert_eq!(detect(&cells, &snapshot, None), NetworkTechnology::HspaPlus);
        assert_eq!(
            NetworkTypeDetector::new().detect(2, &cells, &snapshot, None),
            NetworkTechnology::Unknown
        );
    }

    #[test]
    fn test_other_subscription_ignored() {
        let snapshot = SnapshotData::with_subscriptions(&[1, 2]);
        let cells = vec![
            lte(Some(1_650), Connection::primary()),
            lte(Some(6_300), Connection::None).with_subscription_id(2),
        ];
        assert_eq!(detect(&cells, &snapshot, None), NetworkTechnology::Unknown);
    }
}
