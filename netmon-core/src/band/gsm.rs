//! GSM ARFCN table.
//!
//! ARFCNs 512..=810 are shared by DCS 1800 and PCS 1900, so the result
//! depends on the country the cell is in.

use super::BandEntry;
use crate::model::BandGsm;

/// Name of the range shared by DCS and PCS.
pub const AMBIGUOUS_DCS_PCS: &str = "1800/1900";

static BANDS: [BandEntry; 7] = [
    BandEntry::new(0..=124, "900", 900),
    BandEntry::new(128..=251, "850", 850),
    BandEntry::new(259..=293, "450", 450),
    BandEntry::new(306..=340, "480", 480),
    BandEntry {
        channels: 512..=810,
        name: AMBIGUOUS_DCS_PCS,
        number: None,
    },
    BandEntry::new(811..=885, "1800", 1800),
    BandEntry::new(955..=1023, "900", 900),
];

/// North America and the Caribbean.
const MCC_PREFIX_NORTH_AMERICA: char = '3';
/// Central and South America.
const MCC_PREFIX_SOUTH_AMERICA: char = '7';

/// Countries in the Americas running both DCS 1800 and PCS 1900.
const PCS_AND_DCS: [&str; 10] = [
    "348", "346", "370", "338", "356", "358", "376", "724", "748", "734",
];

/// Countries in the Americas running DCS 1800 only.
const DCS_ONLY: [&str; 4] = ["352", "372", "360", "712"];

pub struct BandTableGsm;

impl BandTableGsm {
    /// Resolves `arfcn`, using `mcc` to split the DCS/PCS range.
    pub fn get(arfcn: u32, mcc: Option<&str>) -> Option<BandEntry> {
        let entry = super::first_match(&BANDS, arfcn)?;
        if entry.number.is_some() {
            return Some(entry.clone());
        }

        let Some(mcc) = mcc else {
            return Some(entry.clone());
        };

        let americas =
            mcc.starts_with(MCC_PREFIX_NORTH_AMERICA) || mcc.starts_with(MCC_PREFIX_SOUTH_AMERICA);
        let (name, number) = if !americas {
            ("1800", 1800)
        } else if PCS_AND_DCS.iter().any(|c| *c == mcc) {
            return Some(entry.clone());
        } else if DCS_ONLY.iter().any(|c| *c == mcc) {
            ("1800", 1800)
        } else {
            ("1900", 1900)
        };

        Some(BandEntry {
            name,
            number: Some(number),
            ..entry.clone()
        })
    }

    pub fn map(arfcn: u32, mcc: Option<&str>) -> BandGsm {
        let entry = Self::get(arfcn, mcc);
        BandGsm {
            arfcn,
            number: entry.as_ref().and_then(|e| e.number),
            name: entry.map(|e| e.name.to_string()),
        }
    }
}
