//! Per-technology signal metrics.
//!
//! Every metric is optional. Values outside the documented range are
//! dropped by `sanitized()`, which the cell constructors and the
//! reconciler input boundary call. `merge` keeps the receiver's values and
//! backfills missing ones from the other reading.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Keeps `value` only when it lies in `range`.
pub(crate) fn in_range<T: PartialOrd + Copy>(value: Option<T>, range: RangeInclusive<T>) -> Option<T> {
    value.filter(|v| range.contains(v))
}

/// Valid GSM RSSI, dBm.
pub const GSM_RSSI_RANGE: RangeInclusive<i32> = -113..=-40;
/// Valid GSM / WCDMA / TD-SCDMA bit error rate.
pub const BIT_ERROR_RATE_RANGE: RangeInclusive<i32> = 0..=7;
/// Valid GSM timing advance.
pub const GSM_TIMING_ADVANCE_RANGE: RangeInclusive<i32> = 0..=219;

/// GSM signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalGsm {
    /// Received signal strength, dBm
    pub rssi: Option<i32>,
    /// Bit error rate, 0..=7
    pub ber: Option<i32>,
    /// Timing advance
    pub ta: Option<i32>,
}

impl SignalGsm {
    pub fn new(rssi: Option<i32>, ber: Option<i32>, ta: Option<i32>) -> Self {
        Self { rssi, ber, ta }.sanitized()
    }

    pub fn sanitized(self) -> Self {
        Self {
            rssi: in_range(self.rssi, GSM_RSSI_RANGE),
            ber: in_range(self.ber, BIT_ERROR_RATE_RANGE),
            ta: in_range(self.ta, GSM_TIMING_ADVANCE_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            rssi: self.rssi.or(other.rssi),
            ber: self.ber.or(other.ber),
            ta: self.ta.or(other.ta),
        }
    }
}

/// Valid CDMA / EV-DO RSSI, dBm.
pub const CDMA_RSSI_RANGE: RangeInclusive<i32> = -120..=0;
/// Valid CDMA / EV-DO Ec/Io, tenths of dB.
pub const CDMA_ECIO_RANGE: RangeInclusive<f64> = -160.0..=0.0;
/// Valid EV-DO SNR.
pub const EVDO_SNR_RANGE: RangeInclusive<i32> = 0..=8;

/// CDMA2000 / EV-DO signal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalCdma {
    pub cdma_rssi: Option<i32>,
    pub cdma_ecio: Option<f64>,
    pub evdo_rssi: Option<i32>,
    pub evdo_ecio: Option<f64>,
    pub evdo_snr: Option<i32>,
}

impl SignalCdma {
    pub fn sanitized(self) -> Self {
        Self {
            cdma_rssi: in_range(self.cdma_rssi, CDMA_RSSI_RANGE),
            cdma_ecio: in_range(self.cdma_ecio, CDMA_ECIO_RANGE),
            evdo_rssi: in_range(self.evdo_rssi, CDMA_RSSI_RANGE),
            evdo_ecio: in_range(self.evdo_ecio, CDMA_ECIO_RANGE),
            evdo_snr: in_range(self.evdo_snr, EVDO_SNR_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            cdma_rssi: self.cdma_rssi.or(other.cdma_rssi),
            cdma_ecio: self.cdma_ecio.or(other.cdma_ecio),
            evdo_rssi: self.evdo_rssi.or(other.evdo_rssi),
            evdo_ecio: self.evdo_ecio.or(other.evdo_ecio),
            evdo_snr: self.evdo_snr.or(other.evdo_snr),
        }
    }
}

/// Valid WCDMA / LTE / TD-SCDMA RSSI, dBm.
pub const UMTS_RSSI_RANGE: RangeInclusive<i32> = -113..=-51;
pub const WCDMA_ECNO_RANGE: RangeInclusive<i32> = -23..=1;
pub const WCDMA_RSCP_RANGE: RangeInclusive<i32> = -119..=-25;
pub const WCDMA_ECIO_RANGE: RangeInclusive<i32> = -20..=0;

/// WCDMA signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWcdma {
    /// Received signal strength, dBm
    pub rssi: Option<i32>,
    /// Bit error rate
    pub ber: Option<i32>,
    /// Ec/No, dB
    pub ecno: Option<i32>,
    /// Received signal code power, dBm
    pub rscp: Option<i32>,
    /// Ec/Io, dB
    pub ecio: Option<i32>,
}

impl SignalWcdma {
    pub fn sanitized(self) -> Self {
        Self {
            rssi: in_range(self.rssi, UMTS_RSSI_RANGE),
            ber: in_range(self.ber, BIT_ERROR_RATE_RANGE),
            ecno: in_range(self.ecno, WCDMA_ECNO_RANGE),
            rscp: in_range(self.rscp, WCDMA_RSCP_RANGE),
            ecio: in_range(self.ecio, WCDMA_ECIO_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            rssi: self.rssi.or(other.rssi),
            ber: self.ber.or(other.ber),
            ecno: self.ecno.or(other.ecno),
            rscp: self.rscp.or(other.rscp),
            ecio: self.ecio.or(other.ecio),
        }
    }
}

pub const LTE_RSRP_RANGE: RangeInclusive<f64> = -140.0..=-40.0;
pub const LTE_RSRQ_RANGE: RangeInclusive<f64> = -20.0..=-3.0;
pub const LTE_CQI_RANGE: RangeInclusive<i32> = 1..=15;
pub const LTE_SNR_RANGE: RangeInclusive<f64> = -19.9..=29.9;
pub const LTE_TIMING_ADVANCE_RANGE: RangeInclusive<i32> = 0..=1282;

/// LTE signal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLte {
    /// Received signal strength, dBm
    pub rssi: Option<i32>,
    /// Reference signal received power, dBm
    pub rsrp: Option<f64>,
    /// Reference signal received quality, dB
    pub rsrq: Option<f64>,
    /// Channel quality indicator
    pub cqi: Option<i32>,
    /// Signal to noise ratio, dB
    pub snr: Option<f64>,
    /// Timing advance
    pub timing_advance: Option<i32>,
}

impl SignalLte {
    pub fn sanitized(self) -> Self {
        Self {
            rssi: in_range(self.rssi, UMTS_RSSI_RANGE),
            rsrp: in_range(self.rsrp, LTE_RSRP_RANGE),
            rsrq: in_range(self.rsrq, LTE_RSRQ_RANGE),
            cqi: in_range(self.cqi, LTE_CQI_RANGE),
            snr: in_range(self.snr, LTE_SNR_RANGE),
            timing_advance: in_range(self.timing_advance, LTE_TIMING_ADVANCE_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            rssi: self.rssi.or(other.rssi),
            rsrp: self.rsrp.or(other.rsrp),
            rsrq: self.rsrq.or(other.rsrq),
            cqi: self.cqi.or(other.cqi),
            snr: self.snr.or(other.snr),
            timing_advance: self.timing_advance.or(other.timing_advance),
        }
    }
}

pub const TDSCDMA_RSCP_RANGE: RangeInclusive<i32> = -120..=-24;

/// TD-SCDMA signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalTdscdma {
    pub rssi: Option<i32>,
    pub ber: Option<i32>,
    pub rscp: Option<i32>,
}

impl SignalTdscdma {
    pub fn sanitized(self) -> Self {
        Self {
            rssi: in_range(self.rssi, UMTS_RSSI_RANGE),
            ber: in_range(self.ber, BIT_ERROR_RATE_RANGE),
            rscp: in_range(self.rscp, TDSCDMA_RSCP_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            rssi: self.rssi.or(other.rssi),
            ber: self.ber.or(other.ber),
            rscp: self.rscp.or(other.rscp),
        }
    }
}

pub const NR_RSRP_RANGE: RangeInclusive<i32> = -140..=-44;
pub const NR_RSRQ_RANGE: RangeInclusive<i32> = -20..=-3;
pub const NR_SINR_RANGE: RangeInclusive<i32> = -23..=23;

/// NR signal, split into CSI and SS measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalNr {
    pub csi_rsrp: Option<i32>,
    pub csi_rsrq: Option<i32>,
    pub csi_sinr: Option<i32>,
    pub ss_rsrp: Option<i32>,
    pub ss_rsrq: Option<i32>,
    pub ss_sinr: Option<i32>,
}

impl SignalNr {
    pub fn sanitized(self) -> Self {
        Self {
            csi_rsrp: in_range(self.csi_rsrp, NR_RSRP_RANGE),
            csi_rsrq: in_range(self.csi_rsrq, NR_RSRQ_RANGE),
            csi_sinr: in_range(self.csi_sinr, NR_SINR_RANGE),
            ss_rsrp: in_range(self.ss_rsrp, NR_RSRP_RANGE),
            ss_rsrq: in_range(self.ss_rsrq, NR_RSRQ_RANGE),
            ss_sinr: in_range(self.ss_sinr, NR_SINR_RANGE),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            csi_rsrp: self.csi_rsrp.or(other.csi_rsrp),
            csi_rsrq: self.csi_rsrq.or(other.csi_rsrq),
            csi_sinr: self.csi_sinr.or(other.csi_sinr),
            ss_rsrp: self.ss_rsrp.or(other.ss_rsrp),
            ss_rsrq: self.ss_rsrq.or(other.ss_rsrq),
            ss_sinr: self.ss_sinr.or(other.ss_sinr),
        }
    }

    /// True when no metric is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
