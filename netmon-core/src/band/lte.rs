//! LTE EARFCN table, TS 36.101.

use super::BandEntry;
use crate::model::BandLte;

static BANDS: [BandEntry; 64] = [
    BandEntry::new(0..=599, "2100", 1),
    BandEntry::new(600..=1199, "1900", 2),
    BandEntry::new(1_200..=1_949, "1800", 3),
    BandEntry::new(1_950..=2_399, "AWS", 4),
    BandEntry::new(2_400..=2_649, "850", 5),
    BandEntry::new(2_650..=2_749, "900", 6),
    BandEntry::new(2_750..=3_449, "2600", 7),
    BandEntry::new(3_450..=3_799, "900", 8),
    BandEntry::new(3_800..=4_149, "1800", 9),
    BandEntry::new(4_150..=4_749, "AWS", 10),
    BandEntry::new(4_750..=5_009, "1500", 11),
    BandEntry::new(5_010..=5_179, "700", 12),
    BandEntry::new(5_180..=5_279, "700", 13),
    BandEntry::new(5_280..=5_729, "700", 14),
    BandEntry::new(5_730..=5_849, "700", 17),
    BandEntry::new(5_850..=5_999, "800", 18),
    BandEntry::new(6_000..=6_149, "800", 19),
    BandEntry::new(6_150..=6_449, "800", 20),
    BandEntry::new(6_450..=6_599, "1500", 21),
    BandEntry::new(6_600..=7_499, "3500", 22),
    BandEntry::new(7_500..=7_699, "2000", 23),
    BandEntry::new(7_700..=8_039, "1600", 24),
    BandEntry::new(8_040..=8_689, "1900", 25),
    BandEntry::new(8_690..=9_039, "850", 26),
    BandEntry::new(9_040..=9_209, "800", 27),
    BandEntry::new(9_210..=9_659, "700", 28),
    BandEntry::new(9_660..=9_769, "700", 29),
    BandEntry::new(9_770..=9_869, "2300", 30),
    BandEntry::new(9_870..=9_919, "450", 31),
    BandEntry::new(9_920..=10_359, "1500", 32),
    // TDD
    BandEntry::new(36_000..=36_199, "1900", 33),
    BandEntry::new(36_200..=36_349, "2000", 34),
    BandEntry::new(36_350..=36_949, "PCS", 35),
    BandEntry::new(36_950..=37_549, "PCS", 36),
    BandEntry::new(37_550..=37_749, "PCS", 37),
    BandEntry::new(37_750..=38_249, "2600", 38),
    BandEntry::new(38_250..=38_649, "1900", 39),
    BandEntry::new(38_650..=39_649, "2300", 40),
    BandEntry::new(39_650..=41_589, "2500", 41),
    BandEntry::new(41_590..=43_589, "3500", 42),
    BandEntry::new(43_590..=45_589, "3700", 43),
    BandEntry::new(45_590..=46_589, "700", 45),
    BandEntry::new(46_590..=46_789, "1500", 44),
    BandEntry::new(55_240..=56_739, "3600", 48),
    BandEntry::new(56_740..=58_239, "3600", 49),
    BandEntry::new(58_240..=59_089, "1500", 50),
    BandEntry::new(59_090..=59_139, "1500", 51),
    BandEntry::new(59_140..=60_139, "3300", 52),
    BandEntry::new(60_140..=60_254, "2500", 53),
    // FDD, extended EARFCN space
    BandEntry::new(65_536..=66_435, "2100", 65),
    BandEntry::new(66_436..=67_335, "AWS", 66),
    BandEntry::new(67_336..=67_535, "700", 67),
    BandEntry::new(67_536..=67_835, "700", 68),
    BandEntry::new(67_836..=68_335, "2500", 69),
    BandEntry::new(68_336..=68_585, "AWS", 70),
    BandEntry::new(68_586..=68_935, "600", 71),
    BandEntry::new(68_936..=68_985, "450", 72),
    BandEntry::new(68_986..=69_035, "450", 73),
    BandEntry::new(69_036..=69_465, "L", 74),
    BandEntry::new(69_466..=70_315, "1500", 75),
    BandEntry::new(70_316..=70_365, "1500", 76),
    BandEntry::new(70_366..=70_545, "700", 85),
    BandEntry::new(70_546..=70_595, "410", 87),
    BandEntry::new(70_596..=70_645, "410", 88),
];

pub struct BandTableLte;

impl BandTableLte {
    pub fn get(earfcn: u32) -> Option<&'static BandEntry> {
        super::first_match(&BANDS, earfcn)
    }

    pub fn map(earfcn: u32) -> BandLte {
        let entry = Self::get(earfcn);
        BandLte {
            downlink_earfcn: earfcn,
            number: entry.and_then(|e| e.number),
            name: entry.map(|e| e.name.to_string()),
        }
    }
}
