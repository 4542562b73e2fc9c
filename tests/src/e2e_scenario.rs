//! End-to-End Scenario Tests for netmon
//!
//! Each scenario feeds a recorded acquisition round through the full
//! reconciler (merge, postprocessing, NSA detection) and checks the result
//! a user of the device would expect to see.

use std::collections::BTreeMap;

use netmon_common::{AcquisitionError, NetmonConfig, PipelineConfig};
use netmon_core::model::{CellLte, CellSkeleton, NsaConnection, SignalLte};
use netmon_core::{Cell, NetworkTechnology, ReconcileInput, Reconciler, SnapshotData, Storage, StorageKey};

use crate::test_fixtures::*;
use crate::test_utils::*;

const PIXEL_5_NOT_RESTRICTED: &str = "{mChannelNumber=6200, mCellBandwidths=[10000], \
    NetworkRegistrationInfo{ domain=CS nrState=**** rRplmn= isUsingCarrierAggregation=false}, \
    NetworkRegistrationInfo{ domain=PS isDcNrRestricted = false isNrAvailable = true \
    isEnDcAvailable = true LteVopsSupportInfo nrState=**** rRplmn=23001 isUsingCarrierAggregation=false}}";

fn dual_sim_input(first: netmon_common::Network, second: netmon_common::Network) -> ReconcileInput {
    ReconcileInput {
        modern: duplicated_dual_sim_list(first.clone(), second.clone()),
        snapshot: SnapshotData::with_subscriptions(&[1, 2])
            .with_operator(1, first)
            .with_operator(2, second),
        ..Default::default()
    }
}

/// E2E Test: legacy dual SIM phone, both SIMs on the same operator
///
/// Every SIM handle returns the cells of both SIMs. After reconciliation
/// each subscription keeps exactly its own block.
#[test]
fn test_e2e_dual_sim_same_operator() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(legacy_dual_sim(), PipelineConfig::default());
    let input = dual_sim_input(vodafone_cz(), vodafone_cz());

    tracing::info!(cells = input.modern.len(), "Duplicated dual SIM list");
    let cells = reconciler.reconcile(&input);

    let counts = count_by_subscription(&cells);
    tracing::info!(?counts, "Cells per subscription");
    assert_eq!(counts, BTreeMap::from([(1, 2), (2, 3)]));
    assert_eq!(cells[0], input.modern[0]);
    assert_eq!(cells[2], input.modern[7]);
}

#[test]
fn test_e2e_dual_sim_different_operators() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(legacy_dual_sim(), PipelineConfig::default());
    let cells = reconciler.reconcile(&dual_sim_input(tmobile_cz(), vodafone_cz()));

    assert_eq!(count_by_subscription(&cells), BTreeMap::from([(1, 2), (2, 3)]));
    assert_eq!(primary_of(&cells, 1).and_then(Cell::network), Some(&tmobile_cz()));
    assert_eq!(primary_of(&cells, 2).and_then(Cell::network), Some(&vodafone_cz()));
}

/// Running the reconciler over its own output changes nothing.
#[test]
fn test_e2e_dual_sim_idempotent() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(legacy_dual_sim(), PipelineConfig::default());
    let input = dual_sim_input(vodafone_cz(), vodafone_cz());

    let once = reconciler.reconcile(&input);
    let again = ReconcileInput {
        modern: once.clone(),
        ..input
    };
    assert_eq!(reconciler.reconcile(&again), once);
}

#[test]
fn test_e2e_dual_sim_reliable_override() {
    init_test_logging();
    let pipeline = PipelineConfig {
        subscriptions_reliable: Some(true),
        ..Default::default()
    };
    let (reconciler, _) = reconciler_for(legacy_dual_sim(), pipeline);
    let cells = reconciler.reconcile(&dual_sim_input(vodafone_cz(), vodafone_cz()));

    assert_eq!(count_by_subscription(&cells), BTreeMap::from([(1, 5), (2, 5)]));
}

#[test]
fn test_e2e_disabled_stage() {
    init_test_logging();
    let pipeline = PipelineConfig {
        disabled_stages: vec!["sub_duplicities".to_string()],
        ..Default::default()
    };
    let (reconciler, _) = reconciler_for(legacy_dual_sim(), pipeline);
    assert!(!reconciler.pipeline().stage_names().contains(&"sub_duplicities"));

    let cells = reconciler.reconcile(&dual_sim_input(vodafone_cz(), vodafone_cz()));
    assert_eq!(cells.len(), 10);
}

/// The legacy API knows the LAC the modern API left out.
#[test]
fn test_e2e_legacy_and_modern_merge() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_5(), PipelineConfig::default());
    let input = ReconcileInput {
        legacy: vec![gsm_serving(1, Some(tmobile_cz()), 4_234, Some(1_231), -81)],
        modern: vec![gsm_serving(1, Some(tmobile_cz()), 4_234, None, -85)],
        snapshot: SnapshotData::with_subscriptions(&[1]).with_operator(1, tmobile_cz()),
        ..Default::default()
    };

    let cells = reconciler.reconcile(&input);

    assert_eq!(cells.len(), 1);
    let Cell::Gsm(gsm) = &cells[0] else { panic!("expected GSM") };
    assert_eq!(gsm.lac, Some(1_231));
    assert_eq!(gsm.signal.rssi, Some(-85));
}

#[test]
fn test_e2e_failed_source() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_5(), PipelineConfig::default());
    let serving = lte_serving(1, tmobile_cz(), 28_384_444, 24_530, 96, 6_200);
    let input = ReconcileInput::from_sources(
        Err(AcquisitionError::ModemError),
        Ok(vec![serving.clone()]),
        true,
        SnapshotData::with_subscriptions(&[1]),
    );

    assert_eq!(reconciler.reconcile(&input), vec![serving]);
}

/// Galaxy S21 swaps the LAC / TAC bytes. The first round proves it against
/// the legacy skeleton, later rounds rely on the stored flag.
#[test]
fn test_e2e_samsung_endianness_across_rounds() {
    init_test_logging();
    let (reconciler, storage) = reconciler_for(galaxy_s21(31), PipelineConfig::default());

    let mut snapshot = SnapshotData::with_subscriptions(&[1]).with_operator(1, vodafone_cz());
    snapshot.cell_skeletons.insert(
        1,
        CellSkeleton {
            cid: Some(26_123_267),
            area: Some(25_620),
        },
    );
    let first = ReconcileInput {
        modern: vec![lte_serving(1, vodafone_cz(), 26_123_267, 5_220, 101, 1_650)],
        snapshot,
        ..Default::default()
    };
    tracing::info!("Round 1: skeleton available");
    let cells = reconciler.reconcile(&first);
    let Cell::Lte(lte) = &cells[0] else { panic!("expected LTE") };
    assert_eq!(lte.tac, Some(25_620));
    assert!(storage.get_bool(StorageKey::LocationAreaEndiannessIncorrect));

    let second = ReconcileInput {
        modern: vec![lte_serving(1, vodafone_cz(), 27_000_001, 0x0102, 201, 6_300)],
        snapshot: SnapshotData::with_subscriptions(&[1]).with_operator(1, vodafone_cz()),
        ..Default::default()
    };
    tracing::info!("Round 2: stored flag only");
    let cells = reconciler.reconcile(&second);
    let Cell::Lte(lte) = &cells[0] else { panic!("expected LTE") };
    assert_eq!(lte.tac, Some(0x0201));
}

#[test]
fn test_e2e_samsung_older_os_untouched() {
    init_test_logging();
    let (reconciler, storage) = reconciler_for(galaxy_s21(30), PipelineConfig::default());
    let mut snapshot = SnapshotData::with_subscriptions(&[1]);
    snapshot.cell_skeletons.insert(
        1,
        CellSkeleton {
            cid: Some(26_123_267),
            area: Some(25_620),
        },
    );
    let input = ReconcileInput {
        modern: vec![lte_serving(1, vodafone_cz(), 26_123_267, 5_220, 101, 1_650)],
        snapshot,
        ..Default::default()
    };

    let cells = reconciler.reconcile(&input);
    let Cell::Lte(lte) = &cells[0] else { panic!("expected LTE") };
    assert_eq!(lte.tac, Some(5_220));
    assert!(storage.is_empty());
}

/// Android 12 masks nrState. A serving LTE cell with an NR leg in the cell
/// list still proves the NSA connection.
#[test]
fn test_e2e_nsa_connected_from_cells() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_5(), PipelineConfig::default());
    let mut snapshot = SnapshotData::with_subscriptions(&[1]).with_operator(1, tmobile_cz());
    snapshot.diagnostics.insert(1, PIXEL_5_NOT_RESTRICTED.to_string());
    let input = ReconcileInput {
        modern: vec![
            lte_serving(1, tmobile_cz(), 28_384_444, 24_530, 96, 6_200),
            lte_neighbour(1, None, 97, 6_200),
            nr_secondary(1),
        ],
        snapshot,
        ..Default::default()
    };

    let cells = reconciler.reconcile(&input);
    let states = reconciler.nsa_states(&cells, &input.snapshot);

    assert_eq!(states.len(), 1);
    let (sub, state) = states[0];
    assert_eq!(sub, 1);
    assert!(state.en_dc_available);
    assert!(state.nr_available);
    assert_eq!(state.connection, NsaConnection::Connected);
}

#[test]
fn test_e2e_network_type_lte_ca_with_nr() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_5(), PipelineConfig::default());
    let mut snapshot = SnapshotData::with_subscriptions(&[1]).with_operator(1, tmobile_cz());
    snapshot.diagnostics.insert(1, PIXEL_5_NOT_RESTRICTED.to_string());
    let serving = vec![lte_serving(1, tmobile_cz(), 28_384_444, 24_530, 96, 6_200), nr_secondary(1)];
    let input = ReconcileInput {
        modern: serving.clone(),
        snapshot,
        ..Default::default()
    };
    let cells = reconciler.reconcile(&input);
    assert_eq!(reconciler.network_type(1, &cells, &input.snapshot), NetworkTechnology::LteNr);

    // No service state dump, so the band 3 neighbour of the band 20 serving
    // cell decides
    let mut aggregated = serving;
    aggregated.push(lte_neighbour(1, None, 301, 1_650));
    let input = ReconcileInput {
        modern: aggregated,
        snapshot: SnapshotData::with_subscriptions(&[1]),
        ..Default::default()
    };
    let cells = reconciler.reconcile(&input);
    assert_eq!(reconciler.network_type(1, &cells, &input.snapshot), NetworkTechnology::LteCaNr);
}

#[test]
fn test_e2e_nsa_not_restricted_without_leg() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_5(), PipelineConfig::default());
    let mut snapshot = SnapshotData::with_subscriptions(&[1]);
    snapshot.diagnostics.insert(1, PIXEL_5_NOT_RESTRICTED.to_string());
    let input = ReconcileInput {
        modern: vec![lte_serving(1, tmobile_cz(), 28_384_444, 24_530, 96, 6_200)],
        snapshot,
        ..Default::default()
    };

    let cells = reconciler.reconcile(&input);
    let state = reconciler.nsa_state(1, &cells, &input.snapshot).unwrap();
    assert!(matches!(state.connection, NsaConnection::Rejected(_)));
}

/// Tensor Pixels disguise GSM neighbours as LTE cells without a band.
#[test]
fn test_e2e_pixel_tensor_gsm_neighbour() {
    init_test_logging();
    let (reconciler, _) = reconciler_for(pixel_7_pro(), PipelineConfig::default());
    let disguised = Cell::Lte(CellLte {
        pci: Some(43),
        signal: SignalLte {
            rsrp: Some(-87.0),
            ..Default::default()
        },
        subscription_id: 1,
        ..Default::default()
    });
    let input = ReconcileInput {
        modern: vec![lte_serving(1, tmobile_cz(), 28_384_444, 24_530, 96, 6_200), disguised],
        snapshot: SnapshotData::with_subscriptions(&[1]),
        ..Default::default()
    };

    let cells = reconciler.reconcile(&input);

    assert_eq!(cells.len(), 2);
    let Cell::Gsm(gsm) = &cells[1] else { panic!("expected GSM") };
    assert_eq!(gsm.bsic, Some(43));
    assert_eq!(gsm.signal.rssi, Some(-87));
}

/// Configuration and snapshot both come from YAML, the way the CLI runs.
#[test]
fn test_e2e_yaml_round_trip() -> TestResult {
    init_test_logging();
    let config = NetmonConfig::from_yaml(
        r#"
logging:
  level: debug
device:
  manufacturer: samsung
  product: o1sxeea
  os_level: 31
  build_fingerprint: samsung/o1sxeea/o1s:12/SP1A.210812.016
pipeline:
  disabled_stages: [timing_advance]
"#,
    )?;
    let input = ReconcileInput::from_yaml(
        r#"
display_on: false
modern:
  - technology: lte
    network: { mcc: 230, mnc: 3 }
    eci: 26123267
    tac: 15100
    pci: 101
    band: { downlink_earfcn: 1650 }
    signal: { rsrp: -98.0, rsrq: -9.0, timing_advance: 0 }
    connection: { role: primary }
    subscription_id: 1
  - technology: lte
    pci: 102
    signal: { rssi: -51, rsrp: -111.0 }
    subscription_id: 1
  - technology: nr
    band: { downlink_arfcn: 700000 }
    subscription_id: 1
snapshot:
  subscriptions: [1]
  network_operators:
    1: { mcc: 230, mnc: 3 }
"#,
    )?;

    let storage = std::sync::Arc::new(netmon_core::InMemoryStorage::new(&config.device.build_fingerprint));
    let reconciler = Reconciler::from_config(&config, storage);
    assert!(!reconciler.pipeline().stage_names().contains(&"timing_advance"));

    let cells = reconciler.reconcile(&input);
    assert_eq!(cells.len(), 3);

    // Samsung "unknown" RSSI dropped from the neighbour
    let Cell::Lte(neighbour) = &cells[1] else { panic!("expected LTE") };
    assert_eq!(neighbour.signal.rssi, None);
    // Timing advance stage disabled
    let Cell::Lte(serving) = &cells[0] else { panic!("expected LTE") };
    assert_eq!(serving.signal.timing_advance, Some(0));
    // Bands resolved from the bare channel numbers
    let band = serving.band.as_ref().ok_or("serving band missing")?;
    assert_eq!(band.number, Some(3));
    assert_eq!(band.name.as_deref(), Some("1800"));
    let Cell::Nr(nr) = &cells[2] else { panic!("expected NR") };
    let band = nr.band.as_ref().ok_or("NR band missing")?;
    assert_eq!(band.number, Some(79));
    assert_eq!(band.downlink_frequency, 4_500_000);
    assert_eq!(nr.network, netmon_common::Network::new(230, 3));

    let yaml = serde_yaml::to_string(&cells)?;
    let parsed: Vec<Cell> = serde_yaml::from_str(&yaml)?;
    assert_eq!(parsed, cells);
    Ok(())
}
