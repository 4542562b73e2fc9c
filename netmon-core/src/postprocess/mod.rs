//! Postprocessing pipeline
//!
//! Each [`Postprocessor`] repairs one class of platform or vendor defect in
//! a merged cell list. [`Pipeline::standard`] chains them in a fixed order;
//! later stages rely on the fixes of earlier ones (PLMN inference needs the
//! primary cell that primary-cell inference may have created, for example).

pub mod cdma_plmn;
pub mod cell_bandwidth;
pub mod invalid_cells;
pub mod invalid_secondary;
pub mod mocn;
pub mod physical_channel;
pub mod pixel_tensor;
pub mod plmn;
pub mod primary_cell;
pub mod samsung_endianness;
pub mod samsung_invalid_values;
pub mod signal_strength;
pub mod sub_duplicities;
pub mod timing_advance;

use netmon_common::{DeviceProfile, PipelineConfig, SubscriptionId};
use tracing::debug;

use crate::model::Cell;
use crate::snapshot::TelephonySnapshot;
use crate::storage::Storage;

pub use cdma_plmn::CdmaPlmnPostprocessor;
pub use cell_bandwidth::CellBandwidthPostprocessor;
pub use invalid_cells::InvalidCellsPostprocessor;
pub use invalid_secondary::InvalidSecondaryPostprocessor;
pub use mocn::MocnPostprocessor;
pub use physical_channel::PhysicalChannelPostprocessor;
pub use pixel_tensor::PixelTensorPostprocessor;
pub use plmn::PlmnPostprocessor;
pub use primary_cell::PrimaryCellPostprocessor;
pub use samsung_endianness::SamsungEndiannessPostprocessor;
pub use samsung_invalid_values::SamsungInvalidValuesPostprocessor;
pub use signal_strength::SignalStrengthPostprocessor;
pub use sub_duplicities::SubDuplicitiesPostprocessor;
pub use timing_advance::TimingAdvancePostprocessor;

/// Everything a stage may consult besides the cells themselves.
pub struct PipelineContext<'a> {
    pub snapshot: &'a dyn TelephonySnapshot,
    pub storage: &'a dyn Storage,
    pub device: &'a DeviceProfile,
    pub config: &'a PipelineConfig,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        snapshot: &'a dyn TelephonySnapshot,
        storage: &'a dyn Storage,
        device: &'a DeviceProfile,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            snapshot,
            storage,
            device,
            config,
        }
    }

    pub fn subscriptions_reliable(&self) -> bool {
        self.config.subscriptions_reliable_for(self.device)
    }
}

/// One repair step.
pub trait Postprocessor: Send + Sync {
    /// Stable name, matched against `disabled_stages` in the configuration.
    fn name(&self) -> &'static str;

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell>;
}

/// Ordered list of stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Postprocessor>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Postprocessor>>) -> Self {
        Self { stages }
    }

    /// All stages in their standard order, minus those disabled in `config`.
    pub fn standard(config: &PipelineConfig) -> Self {
        let stages: Vec<Box<dyn Postprocessor>> = vec![
            Box::new(MocnPostprocessor),
            Box::new(InvalidCellsPostprocessor),
            Box::new(InvalidSecondaryPostprocessor),
            Box::new(PrimaryCellPostprocessor),
            Box::new(SubDuplicitiesPostprocessor),
            Box::new(PlmnPostprocessor),
            Box::new(CdmaPlmnPostprocessor),
            Box::new(SignalStrengthPostprocessor),
            Box::new(CellBandwidthPostprocessor),
            Box::new(PhysicalChannelPostprocessor),
            Box::new(SamsungInvalidValuesPostprocessor),
            Box::new(PixelTensorPostprocessor),
            Box::new(SamsungEndiannessPostprocessor),
            Box::new(TimingAdvancePostprocessor),
        ];

        Self::new(
            stages
                .into_iter()
                .filter(|stage| config.is_enabled(stage.name()))
                .collect(),
        )
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        self.stages.iter().fold(cells, |cells, stage| {
            let before = cells.len();
            let cells = stage.process(cells, ctx);
            debug!(stage = stage.name(), before, after = cells.len(), "Postprocessor done");
            cells
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Subscriptions of `cells` in first-seen order.
pub(crate) fn subscriptions_of(cells: &[Cell]) -> Vec<SubscriptionId> {
    let mut subs = Vec::new();
    for cell in cells {
        let sub = cell.subscription_id();
        if !subs.contains(&sub) {
            subs.push(sub);
        }
    }
    subs
}

/// Applies `f` to the cells of each subscription separately and
/// concatenates the results in first-seen subscription order.
pub(crate) fn per_subscription(
    cells: Vec<Cell>,
    mut f: impl FnMut(SubscriptionId, Vec<Cell>) -> Vec<Cell>,
) -> Vec<Cell> {
    let subs = subscriptions_of(&cells);
    let mut groups: Vec<Vec<Cell>> = vec![Vec::new(); subs.len()];
    for cell in cells {
        if let Some(index) = subs.iter().position(|s| *s == cell.subscription_id()) {
            groups[index].push(cell);
        }
    }

    subs.into_iter()
        .zip(groups)
        .flat_map(|(sub, group)| f(sub, group))
        .collect()
}
