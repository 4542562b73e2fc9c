//! Cell data model
//!
//! Cells, band descriptors, signals and the auxiliary records used while
//! reconciling them.

pub mod band;
pub mod cell;
pub mod channel_config;
pub mod connection;
pub mod hint;
pub mod nsa;
pub mod signal;

pub use band::*;
pub use cell::*;
pub use channel_config::*;
pub use connection::*;
pub use hint::*;
pub use nsa::*;
pub use signal::*;
