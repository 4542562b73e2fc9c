//! NR-ARFCN table, TS 38.101-1 (FR1 bands with a downlink).
//!
//! NR bands overlap heavily. When several ranges contain an ARFCN the
//! candidates are narrowed by assuming operators place 5 MHz blocks aligned
//! to the upper edge of the band.

use super::BandEntry;
use crate::model::BandNr;

/// Smallest NR channel bandwidth, kHz.
const SMALLEST_BANDWIDTH_KHZ: u64 = 5_000;

static BANDS: [BandEntry; 39] = [
    BandEntry::new(123_400..=130_400, "600", 71),
    BandEntry::new(143_400..=145_600, "700", 29),
    BandEntry::new(145_800..=149_200, "700", 12),
    BandEntry::new(151_600..=160_600, "700", 28),
    BandEntry::new(151_600..=153_600, "700", 14),
    BandEntry::new(158_200..=164_200, "800", 20),
    BandEntry::new(171_800..=178_800, "850", 26),
    BandEntry::new(172_000..=175_000, "800", 18),
    BandEntry::new(173_800..=178_800, "850", 5),
    BandEntry::new(185_000..=192_000, "900", 8),
    BandEntry::new(285_400..=286_400, "1500", 51),
    BandEntry::new(285_400..=286_400, "1500", 76),
    BandEntry::new(285_400..=286_400, "1500", 93),
    BandEntry::new(285_400..=286_400, "1500", 91),
    BandEntry::new(286_400..=303_400, "1500", 50),
    BandEntry::new(286_400..=303_400, "1500", 75),
    BandEntry::new(286_400..=303_400, "1500", 92),
    BandEntry::new(286_400..=303_400, "1500", 94),
    BandEntry::new(295_000..=303_600, "1500", 74),
    BandEntry::new(361_000..=376_000, "1800", 3),
    BandEntry::new(376_000..=384_000, "1900", 39),
    BandEntry::new(386_000..=398_000, "PCS", 2),
    BandEntry::new(386_000..=399_000, "1900", 25),
    BandEntry::new(399_000..=404_000, "AWS", 70),
    BandEntry::new(402_000..=405_000, "2000", 34),
    BandEntry::new(422_000..=440_000, "AWS", 66),
    BandEntry::new(422_000..=434_000, "2100", 1),
    BandEntry::new(422_000..=440_000, "2100", 65),
    BandEntry::new(460_000..=480_000, "2300", 40),
    BandEntry::new(470_000..=472_000, "2300", 30),
    BandEntry::new(496_700..=499_000, "2500", 53),
    BandEntry::new(499_200..=537_999, "2600", 41),
    BandEntry::new(499_200..=538_000, "2600", 90),
    BandEntry::new(514_000..=524_000, "2600", 38),
    BandEntry::new(524_000..=538_000, "2600", 7),
    BandEntry::new(620_000..=680_000, "3700", 77),
    BandEntry::new(620_000..=653_333, "3500", 78),
    BandEntry::new(636_667..=646_666, "3600", 48),
    BandEntry::new(693_334..=733_333, "4500", 79),
];

/// Downlink frequency of `arfcn` in kHz, TS 38.101-1 5.4.2.1.
pub fn frequency_khz(arfcn: u32) -> u64 {
    let arfcn = u64::from(arfcn);
    if arfcn <= 600_000 {
        5 * arfcn
    } else {
        3_000_000 + 15 * (arfcn - 600_000)
    }
}

pub struct BandTableNr;

impl BandTableNr {
    pub fn get(arfcn: u32) -> Option<BandEntry> {
        let candidates: Vec<&BandEntry> = BANDS.iter().filter(|e| e.contains(arfcn)).collect();
        match candidates.as_slice() {
            [] => return None,
            [only] => return Some((*only).clone()),
            _ => {}
        }

        let frequency = frequency_khz(arfcn);
        let aligned: Vec<&BandEntry> = candidates
            .into_iter()
            .filter(|e| {
                let edge = frequency_khz(*e.channels.end());
                (edge - frequency) % SMALLEST_BANDWIDTH_KHZ == 0
            })
            .collect();

        match aligned.as_slice() {
            [] => None,
            [only] => Some((*only).clone()),
            [first, rest @ ..] if rest.iter().all(|e| e.name == first.name) => Some(BandEntry {
                number: None,
                ..(*first).clone()
            }),
            _ => None,
        }
    }

    pub fn map(arfcn: u32) -> BandNr {
        let entry = Self::get(arfcn);
        BandNr {
            downlink_arfcn: arfcn,
            downlink_frequency: frequency_khz(arfcn),
            number: entry.as_ref().and_then(|e| e.number),
            name: entry.map(|e| e.name.to_string()),
        }
    }
}
