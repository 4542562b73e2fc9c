//! TD-SCDMA UARFCN table.
//!
//! Bands 33/37/39 overlap. China uses band 39, the rest of the world the
//! later entries, so China scans the table front to back and everyone else
//! back to front.

use super::BandEntry;
use crate::model::BandTdscdma;

const CHINA_MCC: [&str; 2] = ["460", "461"];

static BANDS: [BandEntry; 7] = [
    BandEntry::new(9_400..=9_600, "1900", 39),
    BandEntry::new(9_500..=9_600, "1900", 33),
    BandEntry::new(9_550..=9_650, "PCS", 37),
    BandEntry::new(9_650..=9_950, "PCS", 36),
    BandEntry::new(10_050..=10_125, "2000", 34),
    BandEntry::new(11_500..=12_000, "2300", 40),
    BandEntry::new(12_850..=13_100, "2600", 38),
];

pub struct BandTableTdscdma;

impl BandTableTdscdma {
    pub fn get(uarfcn: u32, mcc: Option<&str>) -> Option<&'static BandEntry> {
        let china = mcc.is_some_and(|mcc| CHINA_MCC.iter().any(|c| *c == mcc));
        if china {
            super::first_match(&BANDS, uarfcn)
        } else {
            super::last_match(&BANDS, uarfcn)
        }
    }

    pub fn map(uarfcn: u32, mcc: Option<&str>) -> BandTdscdma {
        let entry = Self::get(uarfcn, mcc);
        BandTdscdma {
            downlink_uarfcn: uarfcn,
            number: entry.and_then(|e| e.number),
            name: entry.map(|e| e.name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_china_prefers_first() {
        assert_eq!(BandTableTdscdma::map(9_550, Some("460")).number, Some(39));
    }

    #[test]
    fn test_elsewhere_prefers_last() {
        assert_eq!(BandTableTdscdma::map(9_550, Some("230")).number, Some(37));
        assert_eq!(BandTableTdscdma::map(9_550, None).number, Some(37));
    }

    #[test]
    fn test_unknown_uarfcn() {
        let band = BandTableTdscdma::map(5, Some("460"));
        assert_eq!(band.name, None);
    }
}
