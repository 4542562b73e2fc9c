//! Platform network type codes.
//!
//! Codes 0..=20 are the platform's own. LTE+NR, LTE-CA+NR and HSPA+DC have
//! no platform code; they only come out of detection and get codes at the
//! top of the `i32` range.

use std::fmt;

use netmon_common::Technology;
use serde::{Deserialize, Serialize};

/// Radio bearer the platform reports for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkTechnology {
    Unknown,
    Gprs,
    Edge,
    Umts,
    Cdma,
    Evdo0,
    EvdoA,
    OneXRtt,
    Hsdpa,
    Hsupa,
    Hspa,
    Iden,
    EvdoB,
    Lte,
    Ehrpd,
    HspaPlus,
    Gsm,
    TdScdma,
    Iwlan,
    LteCa,
    Nr,
    /// Dual carrier HSPA+ (HSPA+42)
    HspaDc,
    /// LTE anchor with an NR secondary cell (EN-DC)
    LteNr,
    /// EN-DC with LTE carrier aggregation
    LteCaNr,
}

pub const LTE_NR_CODE: i32 = i32::MAX - 3;
pub const LTE_CA_NR_CODE: i32 = i32::MAX - 2;
pub const HSPA_DC_CODE: i32 = i32::MAX - 1;

impl NetworkTechnology {
    /// Cell technology the bearer belongs to. `None` for codes that cannot
    /// be attributed (eHRPD runs over both LTE and CDMA).
    pub fn technology(self) -> Option<Technology> {
        use NetworkTechnology::*;
        match self {
            Gprs | Edge | Gsm => Some(Technology::Gsm),
            Umts | Hsdpa | Hsupa | Hspa | HspaPlus | HspaDc => Some(Technology::Wcdma),
            Cdma | Evdo0 | EvdoA | EvdoB | OneXRtt => Some(Technology::Cdma),
            Lte | LteCa | Iwlan => Some(Technology::Lte),
            TdScdma => Some(Technology::Tdscdma),
            Nr | LteNr | LteCaNr => Some(Technology::Nr),
            Unknown | Iden | Ehrpd => None,
        }
    }
}

impl fmt::Display for NetworkTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use NetworkTechnology::*;
        let s = match self {
            Unknown => "Unknown",
            Gprs => "GPRS",
            Edge => "EDGE",
            Umts => "UMTS",
            Cdma => "CDMA",
            Evdo0 => "EVDO rev. 0",
            EvdoA => "EVDO rev. A",
            OneXRtt => "1xRTT",
            Hsdpa => "HSDPA",
            Hsupa => "HSUPA",
            Hspa => "HSPA",
            Iden => "iDEN",
            EvdoB => "EVDO rev. B",
            Lte => "LTE",
            Ehrpd => "eHRPD",
            HspaPlus => "HSPA+",
            Gsm => "GSM",
            TdScdma => "TD-SCDMA",
            Iwlan => "IWLAN",
            LteCa => "LTE-CA",
            Nr => "NR",
            HspaDc => "HSPA+DC",
            LteNr => "LTE+NR",
            LteCaNr => "LTE-CA+NR",
        };
        write!(f, "{}", s)
    }
}

/// Indexed by the platform's network type code.
static TABLE: [NetworkTechnology; 21] = [
    NetworkTechnology::Unknown,
    NetworkTechnology::Gprs,
    NetworkTechnology::Edge,
    NetworkTechnology::Umts,
    NetworkTechnology::Cdma,
    NetworkTechnology::Evdo0,
    NetworkTechnology::EvdoA,
    NetworkTechnology::OneXRtt,
    NetworkTechnology::Hsdpa,
    NetworkTechnology::Hsupa,
    NetworkTechnology::Hspa,
    NetworkTechnology::Iden,
    NetworkTechnology::EvdoB,
    NetworkTechnology::Lte,
    NetworkTechnology::Ehrpd,
    NetworkTechnology::HspaPlus,
    NetworkTechnology::Gsm,
    NetworkTechnology::TdScdma,
    NetworkTechnology::Iwlan,
    NetworkTechnology::LteCa,
    NetworkTechnology::Nr,
];

pub struct NetworkTypeTable;

impl NetworkTypeTable {
    pub fn get(code: i32) -> NetworkTechnology {
        match code {
            LTE_NR_CODE => return NetworkTechnology::LteNr,
            LTE_CA_NR_CODE => return NetworkTechnology::LteCaNr,
            HSPA_DC_CODE => return NetworkTechnology::HspaDc,
            _ => {}
        }
        usize::try_from(code)
            .ok()
            .and_then(|i| TABLE.get(i).copied())
            .unwrap_or(NetworkTechnology::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(NetworkTypeTable::get(13), NetworkTechnology::Lte);
        assert_eq!(NetworkTypeTable::get(15), NetworkTechnology::HspaPlus);
        assert_eq!(NetworkTypeTable::get(20), NetworkTechnology::Nr);
        assert_eq!(NetworkTypeTable::get(LTE_CA_NR_CODE), NetworkTechnology::LteCaNr);
        assert_eq!(NetworkTypeTable::get(HSPA_DC_CODE), NetworkTechnology::HspaDc);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(NetworkTypeTable::get(-1), NetworkTechnology::Unknown);
        assert_eq!(NetworkTypeTable::get(21), NetworkTechnology::Unknown);
    }

    #[test]
    fn test_generation() {
        assert_eq!(NetworkTechnology::Edge.technology(), Some(Technology::Gsm));
        assert_eq!(NetworkTechnology::LteCa.technology(), Some(Technology::Lte));
        assert_eq!(NetworkTechnology::Ehrpd.technology(), None);
        assert_eq!(NetworkTechnology::LteCa.to_string(), "LTE-CA");
        assert_eq!(NetworkTechnology::LteNr.technology(), Some(Technology::Nr));
    }
}
