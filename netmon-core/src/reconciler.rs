//! Orchestrator: merges the raw sources, runs the postprocessing pipeline
//! and derives the NR NSA state and network type on request.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use netmon_common::{AcquisitionError, DeviceProfile, Error, NetmonConfig, PipelineConfig, SubscriptionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use crate::band::NetworkTechnology;
use crate::detect::NetworkTypeDetector;
use crate::merge::{CellMerger, RegistrationMerger, SignalMerger};
use crate::model::{Cell, NrNsaState};
use crate::nsa::NrNsaStateParser;
use crate::postprocess::{subscriptions_of, Pipeline, PipelineContext};
use crate::snapshot::{SnapshotData, TelephonySnapshot};
use crate::storage::Storage;

/// Outcome of collecting cells from one platform source.
pub type SourceResult = Result<Vec<Cell>, AcquisitionError>;

/// Cells of a source, or none if the source failed.
pub fn cells_or_empty(source: &str, result: SourceResult) -> Vec<Cell> {
    result.unwrap_or_else(|error| {
        warn!(source, %error, "Cell source failed, continuing without it");
        Vec::new()
    })
}

/// Everything observed during one acquisition round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileInput {
    /// Cells from the legacy location API.
    #[serde(default)]
    pub legacy: Vec<Cell>,
    /// Cells from the modern cell-info API.
    #[serde(default)]
    pub modern: Vec<Cell>,
    /// Cells derived from the signal-strength API.
    #[serde(default)]
    pub signal_api: Vec<Cell>,
    /// Cells derived from registration info.
    #[serde(default)]
    pub registrations: Vec<Cell>,
    /// Some vendors stop refreshing the modern API while the screen is off.
    #[serde(default = "default_display_on")]
    pub display_on: bool,
    #[serde(default)]
    pub snapshot: SnapshotData,
}

fn default_display_on() -> bool {
    true
}

impl Default for ReconcileInput {
    fn default() -> Self {
        Self {
            legacy: Vec::new(),
            modern: Vec::new(),
            signal_api: Vec::new(),
            registrations: Vec::new(),
            display_on: default_display_on(),
            snapshot: SnapshotData::default(),
        }
    }
}

impl ReconcileInput {
    /// Builds an input from the two main sources, either of which may have failed.
    pub fn from_sources(legacy: SourceResult, modern: SourceResult, display_on: bool, snapshot: SnapshotData) -> Self {
        Self {
            legacy: cells_or_empty("legacy", legacy),
            modern: cells_or_empty("modern", modern),
            display_on,
            snapshot,
            ..Default::default()
        }
    }

    pub fn with_signal_api(mut self, result: SourceResult) -> Self {
        self.signal_api = cells_or_empty("signal_api", result);
        self
    }

    pub fn with_registrations(mut self, result: SourceResult) -> Self {
        self.registrations = cells_or_empty("registrations", result);
        self
    }

    /// Parses a recorded input from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a recorded input from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Turns raw observations into one consistent cell list.
pub struct Reconciler {
    storage: Arc<dyn Storage>,
    device: DeviceProfile,
    config: PipelineConfig,
    merger: CellMerger,
    signal: SignalMerger,
    registration: RegistrationMerger,
    pipeline: Pipeline,
    nsa: NrNsaStateParser,
    detector: NetworkTypeDetector,
}

impl Reconciler {
    /// Creates a reconciler running the standard pipeline.
    pub fn new(storage: Arc<dyn Storage>, device: DeviceProfile, config: PipelineConfig) -> Self {
        let pipeline = Pipeline::standard(&config);
        Self {
            storage,
            device,
            config,
            merger: CellMerger::new(),
            signal: SignalMerger,
            registration: RegistrationMerger,
            pipeline,
            nsa: NrNsaStateParser::new(),
            detector: NetworkTypeDetector::new(),
        }
    }

    pub fn from_config(config: &NetmonConfig, storage: Arc<dyn Storage>) -> Self {
        Self::new(storage, config.device.clone(), config.pipeline.clone())
    }

    /// Replaces the pipeline, e.g. with a custom stage list.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn reconcile(&self, input: &ReconcileInput) -> Vec<Cell> {
        let span = info_span!("reconcile", device = %self.device.manufacturer, os = self.device.os_level);
        let _guard = span.enter();

        let legacy = sanitize(&input.legacy);
        let modern = sanitize(&input.modern);
        let signal_api = sanitize(&input.signal_api);
        let registrations = sanitize(&input.registrations);

        let subscriptions = input.snapshot.active_subscriptions();
        let cells = self.merger.merge(&legacy, &modern, input.display_on, &subscriptions);
        let cells = self.signal.merge(cells, &signal_api);
        let cells = self.registration.merge(cells, &registrations);

        let ctx = PipelineContext::new(&input.snapshot, self.storage.as_ref(), &self.device, &self.config);
        let cells = self.pipeline.run(cells, &ctx);

        debug!(cells = cells.len(), "Reconciled");
        cells
    }

    /// NSA state of `sub`, if enabled and the snapshot carries a diagnostics
    /// dump for it.
    pub fn nsa_state(
        &self,
        sub: SubscriptionId,
        cells: &[Cell],
        snapshot: &dyn TelephonySnapshot,
    ) -> Option<NrNsaState> {
        if !self.config.parse_nsa_state {
            return None;
        }
        let diagnostics = snapshot.diagnostics(sub)?;
        let own: Vec<Cell> = cells.iter().filter(|c| c.subscription_id() == sub).cloned().collect();
        Some(self.nsa.parse(&diagnostics, &own))
    }

    /// NSA state of every subscription present in `cells` or in the snapshot.
    pub fn nsa_states(&self, cells: &[Cell], snapshot: &dyn TelephonySnapshot) -> Vec<(SubscriptionId, NrNsaState)> {
        all_subscriptions(cells, snapshot)
            .into_iter()
            .filter_map(|sub| self.nsa_state(sub, cells, snapshot).map(|state| (sub, state)))
            .collect()
    }

    /// Network type of `sub`, using the NSA state when it can be derived.
    pub fn network_type(
        &self,
        sub: SubscriptionId,
        cells: &[Cell],
        snapshot: &dyn TelephonySnapshot,
    ) -> NetworkTechnology {
        let nsa = self.nsa_state(sub, cells, snapshot);
        self.detector.detect(sub, cells, snapshot, nsa.as_ref())
    }

    pub fn network_types(
        &self,
        cells: &[Cell],
        snapshot: &dyn TelephonySnapshot,
    ) -> Vec<(SubscriptionId, NetworkTechnology)> {
        all_subscriptions(cells, snapshot)
            .into_iter()
            .map(|sub| (sub, self.network_type(sub, cells, snapshot)))
            .collect()
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("device", &self.device)
            .field("config", &self.config)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

fn all_subscriptions(cells: &[Cell], snapshot: &dyn TelephonySnapshot) -> Vec<SubscriptionId> {
    let mut subs = snapshot.active_subscriptions();
    for sub in subscriptions_of(cells) {
        if !subs.contains(&sub) {
            subs.push(sub);
        }
    }
    subs
}

fn sanitize(cells: &[Cell]) -> Vec<Cell> {
    cells.iter().cloned().map(Cell::sanitized).collect()
}
