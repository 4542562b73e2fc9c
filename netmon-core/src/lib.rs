//! Cell reconciliation core for netmon
//!
//! Platform telephony APIs report the cells around a device through several
//! overlapping sources, each incomplete or wrong in vendor-specific ways.
//! This crate merges those sources, repairs the result through an ordered
//! postprocessing pipeline and derives the 5G NSA attach state and the
//! network type.
//!
//! Entry point is [`Reconciler`].

pub mod band;
pub mod detect;
pub mod merge;
pub mod model;
pub mod nsa;
mod pattern;
pub mod postprocess;
pub mod reconciler;
pub mod snapshot;
pub mod storage;

pub use band::{
    BandTableGsm, BandTableLte, BandTableNr, BandTableTdscdma, BandTableWcdma, NetworkTechnology,
    NetworkTypeTable,
};
pub use detect::NetworkTypeDetector;
pub use merge::{CellMerger, RegistrationMerger, SignalMerger};
pub use model::{Cell, Connection, NrNsaState, NsaConnection, RejectionReason};
pub use nsa::NrNsaStateParser;
pub use postprocess::{Pipeline, PipelineContext, Postprocessor};
pub use reconciler::{cells_or_empty, ReconcileInput, Reconciler, SourceResult};
pub use snapshot::{SnapshotData, TelephonySnapshot};
pub use storage::{InMemoryStorage, NoopStorage, Storage, StorageKey};
