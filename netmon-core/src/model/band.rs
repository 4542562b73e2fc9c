//! Band descriptors attached to cells.
//!
//! Each technology has its own descriptor type because the channel number
//! means something different per technology (ARFCN, UARFCN, EARFCN,
//! NR-ARFCN). All of them expose the same accessors through [`Band`].

use serde::{Deserialize, Serialize};

/// Common accessors of a band descriptor.
pub trait Band {
    /// Raw channel number the descriptor was resolved from.
    fn channel_number(&self) -> u32;
    /// 3GPP band number, `None` when unresolved or ambiguous.
    fn number(&self) -> Option<u32>;
    /// Human readable band name (`"900"`, `"AWS"`, `"1800/1900"`, ...).
    fn name(&self) -> Option<&str>;
}

macro_rules! impl_band {
    ($ty:ty, $channel:ident) => {
        impl Band for $ty {
            fn channel_number(&self) -> u32 {
                self.$channel
            }
            fn number(&self) -> Option<u32> {
                self.number
            }
            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }
    };
}

/// GSM band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandGsm {
    /// Absolute RF channel number, 0..=1023
    pub arfcn: u32,
    /// Band number, e.g. 900 or 1800
    pub number: Option<u32>,
    /// Band name
    pub name: Option<String>,
}

/// WCDMA band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandWcdma {
    /// Downlink UARFCN
    pub downlink_uarfcn: u32,
    /// 3GPP band number
    pub number: Option<u32>,
    /// Band name
    pub name: Option<String>,
}

/// LTE band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandLte {
    /// Downlink EARFCN
    pub downlink_earfcn: u32,
    /// 3GPP band number
    pub number: Option<u32>,
    /// Band name
    pub name: Option<String>,
}

/// TD-SCDMA band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandTdscdma {
    /// Downlink UARFCN
    pub downlink_uarfcn: u32,
    /// 3GPP band number
    pub number: Option<u32>,
    /// Band name
    pub name: Option<String>,
}

/// NR band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandNr {
    /// Downlink NR-ARFCN
    pub downlink_arfcn: u32,
    /// Downlink centre frequency in kHz derived from the ARFCN
    #[serde(default)]
    pub downlink_frequency: u64,
    /// 3GPP band number (n-number)
    pub number: Option<u32>,
    /// Band name
    pub name: Option<String>,
}

impl_band!(BandGsm, arfcn);
impl_band!(BandWcdma, downlink_uarfcn);
impl_band!(BandLte, downlink_earfcn);
impl_band!(BandTdscdma, downlink_uarfcn);
impl_band!(BandNr, downlink_arfcn);

/// One component carrier of an aggregated LTE connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregatedBand {
    /// Band number
    pub number: Option<u32>,
    /// Band name
    pub name: String,
}
