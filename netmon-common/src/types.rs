//! Core identity types: PLMN, radio technology, subscription id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a logical SIM / eSIM slot as reported by the platform.
pub type SubscriptionId = i32;

/// Smallest valid Mobile Country Code.
pub const MCC_MIN: u16 = 1;
/// Largest valid Mobile Country Code.
pub const MCC_MAX: u16 = 999;
/// Smallest valid Mobile Network Code.
pub const MNC_MIN: u16 = 0;
/// Largest valid Mobile Network Code.
pub const MNC_MAX: u16 = 999;

/// Public Land Mobile Network identifier.
///
/// Codes are kept as strings because the number of MNC digits is
/// significant: `230-03` and `230-003` are different networks.
///
/// Instances are only created through the range-checked constructors
/// [`Network::new`], [`Network::from_codes`] and [`Network::parse`], which
/// also resolve the ISO 3166 country code when the MCC is known.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork", into = "RawNetwork")]
pub struct Network {
    mcc: String,
    mnc: String,
    iso: Option<String>,
}

impl Network {
    /// Creates a network from numeric codes. MNC is zero-padded to two digits.
    ///
    /// Returns `None` when MCC is outside 1..=999 or MNC outside 0..=999.
    pub fn new(mcc: u16, mnc: u16) -> Option<Self> {
        if !(MCC_MIN..=MCC_MAX).contains(&mcc) || !(MNC_MIN..=MNC_MAX).contains(&mnc) {
            return None;
        }
        let mcc = mcc.to_string();
        let iso = iso_for_mcc(&mcc).map(str::to_string);
        Some(Self {
            mcc,
            mnc: format!("{mnc:02}"),
            iso,
        })
    }

    /// Creates a network from textual codes, preserving the given digits.
    pub fn from_codes(mcc: &str, mnc: &str) -> Option<Self> {
        let mcc_num = parse_code(mcc)?;
        let mnc_num = parse_code(mnc)?;
        if !(MCC_MIN..=MCC_MAX).contains(&mcc_num) || !(MNC_MIN..=MNC_MAX).contains(&mnc_num) {
            return None;
        }
        Some(Self {
            mcc: mcc.to_string(),
            mnc: mnc.to_string(),
            iso: iso_for_mcc(mcc).map(str::to_string),
        })
    }

    /// Parses a concatenated PLMN such as `"23003"` or `"310410"`.
    pub fn parse(plmn: &str) -> Option<Self> {
        if plmn.len() < 5 || !plmn.is_char_boundary(3) {
            return None;
        }
        let (mcc, mnc) = plmn.split_at(3);
        Self::from_codes(mcc, mnc)
    }

    /// Mobile Country Code, 3 digits.
    pub fn mcc(&self) -> &str {
        &self.mcc
    }

    /// Mobile Network Code, 2 or 3 digits.
    pub fn mnc(&self) -> &str {
        &self.mnc
    }

    /// ISO 3166-1 alpha-2 country code, if the MCC is known.
    pub fn iso(&self) -> Option<&str> {
        self.iso.as_deref()
    }

    /// Joins MCC and MNC with `separator`.
    pub fn to_plmn(&self, separator: &str) -> String {
        format!("{}{}{}", self.mcc, separator, self.mnc)
    }
}

fn parse_code(code: &str) -> Option<u16> {
    if code.is_empty() || code.len() > 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network({}-{})", self.mcc, self.mnc)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.mcc, self.mnc)
    }
}

/// Serialized form of [`Network`]. Codes may be written as strings or
/// plain integers in YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNetwork {
    mcc: Code,
    mnc: Code,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Code {
    Text(String),
    Number(u16),
}

impl TryFrom<RawNetwork> for Network {
    type Error = String;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        let network = match (&raw.mcc, &raw.mnc) {
            (Code::Text(mcc), Code::Text(mnc)) => Network::from_codes(mcc, mnc),
            (Code::Number(mcc), Code::Number(mnc)) => Network::new(*mcc, *mnc),
            (Code::Text(mcc), Code::Number(mnc)) => Network::from_codes(mcc, &format!("{mnc:02}")),
            (Code::Number(mcc), Code::Text(mnc)) => Network::from_codes(&mcc.to_string(), mnc),
        };
        network.ok_or_else(|| format!("invalid PLMN {:?}-{:?}", raw.mcc, raw.mnc))
    }
}

impl From<Network> for RawNetwork {
    fn from(network: Network) -> Self {
        Self {
            mcc: Code::Text(network.mcc),
            mnc: Code::Text(network.mnc),
        }
    }
}

/// MCC to ISO country code, sorted by MCC for binary search.
const MCC_ISO: &[(&str, &str)] = &[
    ("202", "gr"), ("204", "nl"), ("206", "be"), ("208", "fr"), ("212", "mc"),
    ("213", "ad"), ("214", "es"), ("216", "hu"), ("218", "ba"), ("219", "hr"),
    ("220", "rs"), ("222", "it"), ("226", "ro"), ("228", "ch"), ("230", "cz"),
    ("231", "sk"), ("232", "at"), ("234", "gb"), ("235", "gb"), ("238", "dk"),
    ("240", "se"), ("242", "no"), ("244", "fi"), ("246", "lt"), ("247", "lv"),
    ("248", "ee"), ("250", "ru"), ("255", "ua"), ("257", "by"), ("259", "md"),
    ("260", "pl"), ("262", "de"), ("268", "pt"), ("270", "lu"), ("272", "ie"),
    ("274", "is"), ("276", "al"), ("278", "mt"), ("280", "cy"), ("282", "ge"),
    ("283", "am"), ("284", "bg"), ("286", "tr"), ("293", "si"), ("294", "mk"),
    ("297", "me"), ("302", "ca"), ("310", "us"), ("311", "us"), ("312", "us"),
    ("313", "us"), ("314", "us"), ("316", "us"), ("334", "mx"), ("338", "jm"),
    ("346", "ky"), ("348", "vg"), ("352", "gd"), ("356", "kn"), ("358", "lc"),
    ("360", "vc"), ("370", "do"), ("372", "ht"), ("376", "tc"), ("400", "az"),
    ("401", "kz"), ("404", "in"), ("405", "in"), ("410", "pk"), ("413", "lk"),
    ("415", "lb"), ("416", "jo"), ("418", "iq"), ("419", "kw"), ("420", "sa"),
    ("424", "ae"), ("425", "il"), ("427", "qa"), ("432", "ir"), ("440", "jp"),
    ("441", "jp"), ("450", "kr"), ("452", "vn"), ("454", "hk"), ("455", "mo"),
    ("460", "cn"), ("461", "cn"), ("466", "tw"), ("470", "bd"), ("502", "my"),
    ("505", "au"), ("510", "id"), ("515", "ph"), ("520", "th"), ("525", "sg"),
    ("530", "nz"), ("602", "eg"), ("603", "dz"), ("604", "ma"), ("605", "tn"),
    ("620", "gh"), ("621", "ng"), ("639", "ke"), ("655", "za"), ("712", "cr"),
    ("714", "pa"), ("716", "pe"), ("722", "ar"), ("724", "br"), ("730", "cl"),
    ("732", "co"), ("734", "ve"), ("740", "ec"), ("744", "py"), ("748", "uy"),
];

/// Looks up the ISO 3166-1 alpha-2 country code for `mcc`.
pub fn iso_for_mcc(mcc: &str) -> Option<&'static str> {
    MCC_ISO
        .binary_search_by(|(code, _)| (*code).cmp(mcc))
        .ok()
        .map(|idx| MCC_ISO[idx].1)
}

/// Radio access technology of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    /// 2G GSM / GPRS / EDGE
    Gsm,
    /// 2G/3G CDMA2000 and EV-DO
    Cdma,
    /// 3G UMTS
    Wcdma,
    /// 3G TD-SCDMA
    Tdscdma,
    /// 4G
    Lte,
    /// 5G
    Nr,
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Technology::Gsm => "GSM",
            Technology::Cdma => "CDMA",
            Technology::Wcdma => "WCDMA",
            Technology::Tdscdma => "TD-SCDMA",
            Technology::Lte => "LTE",
            Technology::Nr => "NR",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_new() {
        let network = Network::new(230, 3).unwrap();
        assert_eq!(network.mcc(), "230");
        assert_eq!(network.mnc(), "03");
        assert_eq!(network.iso(), Some("cz"));
        assert_eq!(network.to_plmn("-"), "230-03");
    }

    #[test]
    fn test_network_new_out_of_range() {
        assert!(Network::new(0, 1).is_none());
        assert!(Network::new(1000, 1).is_none());
        assert!(Network::new(230, 1000).is_none());
    }

    #[test]
    fn test_network_parse() {
        let short = Network::parse("23003").unwrap();
        assert_eq!(short, Network::new(230, 3).unwrap());

        let long = Network::parse("310410").unwrap();
        assert_eq!(long.mnc(), "410");
        assert_eq!(long.iso(), Some("us"));

        assert!(Network::parse("2300").is_none());
        assert!(Network::parse("23a03").is_none());
    }

    #[test]
    fn test_network_three_digit_mnc_is_distinct() {
        let two = Network::from_codes("230", "03").unwrap();
        let three = Network::from_codes("230", "003").unwrap();
        assert_ne!(two, three);
    }

    #[test]
    fn test_network_unknown_iso() {
        let network = Network::new(999, 99).unwrap();
        assert_eq!(network.iso(), None);
    }

    #[test]
    fn test_network_display() {
        let network = Network::new(413, 8).unwrap();
        assert_eq!(format!("{network}"), "413-08");
        assert_eq!(format!("{network:?}"), "Network(413-08)");
    }

    #[test]
    fn test_network_yaml_accepts_numbers_and_strings() {
        let from_numbers: Network = serde_yaml::from_str("mcc: 230\nmnc: 3\n").unwrap();
        let from_strings: Network = serde_yaml::from_str("mcc: \"230\"\nmnc: \"03\"\n").unwrap();
        assert_eq!(from_numbers, from_strings);

        let bad: Result<Network, _> = serde_yaml::from_str("mcc: 0\nmnc: 3\n");
        assert!(bad.is_err());
    }

    #[test]
    fn test_mcc_iso_table_sorted() {
        assert!(MCC_ISO.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
