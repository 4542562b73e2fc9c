//! WCDMA UARFCN table, TS 25.101.
//!
//! Several bands appear twice because additional UARFCN ranges were
//! defined later for them. Order matters: the first range wins.

use super::BandEntry;
use crate::model::BandWcdma;

static BANDS: [BandEntry; 23] = [
    BandEntry::new(412..=687, "1900", 2),
    BandEntry::new(712..=763, "800", 19),
    BandEntry::new(862..=912, "1500", 21),
    BandEntry::new(1_007..=1_087, "850", 5),
    BandEntry::new(1_162..=1_513, "1800", 3),
    BandEntry::new(1_537..=2_087, "AWS", 4),
    BandEntry::new(2_237..=2_563, "2600", 7),
    BandEntry::new(2_937..=3_088, "900", 8),
    BandEntry::new(3_112..=3_388, "AWS", 10),
    BandEntry::new(3_712..=3_787, "1500", 11),
    BandEntry::new(3_842..=3_903, "700", 12),
    BandEntry::new(4_017..=4_043, "700", 13),
    BandEntry::new(4_117..=4_143, "700", 14),
    BandEntry::new(4_357..=4_458, "850", 5),
    BandEntry::new(4_512..=4_638, "800", 20),
    BandEntry::new(4_662..=5_038, "3500", 22),
    BandEntry::new(5_112..=5_413, "1900", 25),
    BandEntry::new(5_762..=5_913, "850", 26),
    BandEntry::new(6_292..=6_592, "1900", 25),
    BandEntry::new(6_617..=6_813, "1500", 32),
    BandEntry::new(9_237..=9_387, "1800", 9),
    BandEntry::new(9_662..=9_938, "1900", 2),
    BandEntry::new(10_562..=10_838, "2100", 1),
];

pub struct BandTableWcdma;

impl BandTableWcdma {
    pub fn get(uarfcn: u32) -> Option<&'static BandEntry> {
        super::first_match(&BANDS, uarfcn)
    }

    pub fn map(uarfcn: u32) -> BandWcdma {
        let entry = Self::get(uarfcn);
        BandWcdma {
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
    fn test_band_1() {
        let band = BandTableWcdma::map(10_663);
        assert_eq!(band.number, Some(1));
        assert_eq!(band.name.as_deref(), Some("2100"));
    }

    #[test]
    fn test_additional_ranges() {
        assert_eq!(BandTableWcdma::get(4_400).and_then(|e| e.number), Some(5));
        assert_eq!(BandTableWcdma::get(9_700).and_then(|e| e.number), Some(2));
    }

    #[test]
    fn test_unknown_uarfcn() {
        let band = BandTableWcdma::map(100);
        assert_eq!(band.downlink_uarfcn, 100);
        assert_eq!(band.number, None);
    }
}
