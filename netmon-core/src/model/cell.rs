//! Cell records.
//!
//! [`Cell`] is a closed union over the six radio technologies. Each variant
//! struct carries the common fields (network, band, signal, connection,
//! subscription, timestamp) plus its own identity fields. Identity fields
//! outside their valid range are treated as absent; [`Cell::sanitized`]
//! enforces that at the input boundary and resolves every band descriptor
//! from its channel number.

use netmon_common::{Network, SubscriptionId, Technology};
use serde::{Deserialize, Serialize};

use crate::band::{BandTableGsm, BandTableLte, BandTableNr, BandTableTdscdma, BandTableWcdma};

use super::band::{Band, BandGsm, BandLte, BandNr, BandTdscdma, BandWcdma};
use super::connection::Connection;
use super::signal::{
    in_range, SignalCdma, SignalGsm, SignalLte, SignalNr, SignalTdscdma, SignalWcdma,
};

use std::ops::RangeInclusive;

/// GSM cell id range. 0 and 65535 are used as "unavailable" by vendors.
pub const GSM_CID_RANGE: RangeInclusive<u32> = 1..=65_534;
/// GSM / WCDMA / TD-SCDMA location area code and LTE tracking area code range.
pub const AREA_CODE_RANGE: RangeInclusive<u32> = 1..=65_534;
pub const GSM_BSIC_RANGE: RangeInclusive<u32> = 0..=63;

pub const CDMA_SID_RANGE: RangeInclusive<u32> = 1..=32_767;
pub const CDMA_NID_RANGE: RangeInclusive<u32> = 0..=65_535;
pub const CDMA_BID_RANGE: RangeInclusive<u32> = 1..=65_535;
/// Latitude in quarter-seconds.
pub const CDMA_LAT_RANGE: RangeInclusive<i32> = -1_296_000..=1_296_000;
/// Longitude in quarter-seconds.
pub const CDMA_LON_RANGE: RangeInclusive<i32> = -2_592_000..=2_592_000;

/// 28-bit UTRAN cell id.
pub const UMTS_CI_RANGE: RangeInclusive<u32> = 1..=268_435_455;
pub const WCDMA_PSC_RANGE: RangeInclusive<u32> = 0..=511;
pub const TDSCDMA_CPID_RANGE: RangeInclusive<u32> = 0..=127;

/// 28-bit E-UTRAN cell id. 268 435 455 is used as "unavailable" by MIUI.
pub const LTE_ECI_RANGE: RangeInclusive<u32> = 1..=268_435_454;
pub const LTE_PCI_RANGE: RangeInclusive<u32> = 0..=503;
/// LTE channel bandwidth in kHz, 1.4 MHz to 100 MHz.
pub const LTE_BANDWIDTH_RANGE: RangeInclusive<u32> = 1_400..=100_000;

/// 36-bit NR cell id.
pub const NR_NCI_RANGE: RangeInclusive<u64> = 1..=68_719_476_734;
pub const NR_TAC_RANGE: RangeInclusive<u32> = 1..=16_777_214;
pub const NR_PCI_RANGE: RangeInclusive<u32> = 0..=1007;
/// Possible gNodeB id lengths in bits.
pub const NR_GNB_LENGTH_RANGE: RangeInclusive<u32> = 22..=32;

fn padded(value: Option<impl std::fmt::Display>, width: usize) -> String {
    match value {
        Some(v) => format!("{v:0>width$}"),
        None => "0".repeat(width),
    }
}

/// GSM cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellGsm {
    pub network: Option<Network>,
    /// 16-bit cell id
    pub cid: Option<u32>,
    /// 16-bit location area code
    pub lac: Option<u32>,
    /// 6-bit base station identity code
    pub bsic: Option<u32>,
    pub band: Option<BandGsm>,
    pub signal: SignalGsm,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellGsm {
    /// Network colour code, left digit of the BSIC.
    pub fn ncc(&self) -> Option<u32> {
        self.bsic.map(|b| b / 10)
    }

    /// Base station colour code, right digit of the BSIC.
    pub fn bcc(&self) -> Option<u32> {
        self.bsic.map(|b| b % 10)
    }

    /// Cell global identity, MCC-MNC-LAC-CID without separators.
    pub fn cgi(&self) -> Option<String> {
        let network = self.network.as_ref()?;
        Some(format!(
            "{}{}{}",
            network.to_plmn(""),
            padded(self.lac, 5),
            padded(self.cid, 5)
        ))
    }

    pub fn sanitized(self) -> Self {
        Self {
            cid: in_range(self.cid, GSM_CID_RANGE),
            lac: in_range(self.lac, AREA_CODE_RANGE),
            bsic: in_range(self.bsic, GSM_BSIC_RANGE),
            band: self.band.map(|b| BandTableGsm::map(b.arfcn, self.network.as_ref().map(Network::mcc))),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// CDMA cell. CDMA carries no band descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellCdma {
    pub network: Option<Network>,
    /// System id
    pub sid: Option<u32>,
    /// Network id
    pub nid: Option<u32>,
    /// Base station id
    pub bid: Option<u32>,
    /// Base station latitude, quarter-seconds
    pub lat: Option<i32>,
    /// Base station longitude, quarter-seconds
    pub lon: Option<i32>,
    pub signal: SignalCdma,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellCdma {
    pub fn sanitized(self) -> Self {
        Self {
            sid: in_range(self.sid, CDMA_SID_RANGE),
            nid: in_range(self.nid, CDMA_NID_RANGE),
            bid: in_range(self.bid, CDMA_BID_RANGE),
            lat: in_range(self.lat, CDMA_LAT_RANGE),
            lon: in_range(self.lon, CDMA_LON_RANGE),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// WCDMA cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellWcdma {
    pub network: Option<Network>,
    /// 28-bit UTRAN cell id, RNC and CID combined
    pub ci: Option<u32>,
    pub lac: Option<u32>,
    /// Primary scrambling code
    pub psc: Option<u32>,
    pub band: Option<BandWcdma>,
    pub signal: SignalWcdma,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellWcdma {
    /// 16-bit cell id.
    pub fn cid(&self) -> Option<u32> {
        self.ci.map(|ci| ci & 0xFFFF)
    }

    /// 12-bit radio network controller id.
    pub fn rnc(&self) -> Option<u32> {
        self.ci.map(|ci| ci >> 16)
    }

    pub fn cgi(&self) -> Option<String> {
        let network = self.network.as_ref()?;
        Some(format!(
            "{}{}{}",
            network.to_plmn(""),
            padded(self.lac, 5),
            padded(self.cid(), 5)
        ))
    }

    pub fn sanitized(self) -> Self {
        Self {
            ci: in_range(self.ci, UMTS_CI_RANGE),
            lac: in_range(self.lac, AREA_CODE_RANGE),
            psc: in_range(self.psc, WCDMA_PSC_RANGE),
            band: self.band.map(|b| BandTableWcdma::map(b.downlink_uarfcn)),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// LTE cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellLte {
    pub network: Option<Network>,
    /// 28-bit E-UTRAN cell id
    pub eci: Option<u32>,
    /// Tracking area code
    pub tac: Option<u32>,
    /// Physical cell id
    pub pci: Option<u32>,
    pub band: Option<BandLte>,
    /// Channel bandwidth, kHz
    pub bandwidth: Option<u32>,
    pub signal: SignalLte,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellLte {
    /// 20-bit eNodeB id.
    pub fn enb(&self) -> Option<u32> {
        self.eci.map(|eci| eci >> 8)
    }

    /// 8-bit cell id within the eNodeB.
    pub fn cid(&self) -> Option<u32> {
        self.eci.map(|eci| eci & 0xFF)
    }

    /// E-UTRAN cell global identity, 15 digits.
    pub fn ecgi(&self) -> Option<String> {
        let network = self.network.as_ref()?;
        let eci = self.eci?;
        Some(format!("{}{:010}", network.to_plmn(""), eci))
    }

    pub fn sanitized(self) -> Self {
        Self {
            eci: in_range(self.eci, LTE_ECI_RANGE),
            tac: in_range(self.tac, AREA_CODE_RANGE),
            pci: in_range(self.pci, LTE_PCI_RANGE),
            bandwidth: in_range(self.bandwidth, LTE_BANDWIDTH_RANGE),
            band: self.band.map(|b| BandTableLte::map(b.downlink_earfcn)),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// TD-SCDMA cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellTdscdma {
    pub network: Option<Network>,
    pub ci: Option<u32>,
    pub lac: Option<u32>,
    /// Cell parameter id
    pub cpid: Option<u32>,
    pub band: Option<BandTdscdma>,
    pub signal: SignalTdscdma,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellTdscdma {
    pub fn cid(&self) -> Option<u32> {
        self.ci.map(|ci| ci & 0xFFFF)
    }

    pub fn rnc(&self) -> Option<u32> {
        self.ci.map(|ci| ci >> 16)
    }

    pub fn sanitized(self) -> Self {
        Self {
            ci: in_range(self.ci, UMTS_CI_RANGE),
            lac: in_range(self.lac, AREA_CODE_RANGE),
            cpid: in_range(self.cpid, TDSCDMA_CPID_RANGE),
            band: self.band.map(|b| BandTableTdscdma::map(b.downlink_uarfcn, self.network.as_ref().map(Network::mcc))),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// NR cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellNr {
    pub network: Option<Network>,
    /// 36-bit NR cell id
    pub nci: Option<u64>,
    /// 24-bit tracking area code
    pub tac: Option<u32>,
    pub pci: Option<u32>,
    pub band: Option<BandNr>,
    pub signal: SignalNr,
    pub connection: Connection,
    pub subscription_id: SubscriptionId,
    pub timestamp: Option<u64>,
}

impl CellNr {
    /// gNodeB id for a gNB id length of `gnb_bits` (22..=32). The length is
    /// operator configuration and is not reported by the platform.
    pub fn gnb_id(&self, gnb_bits: u32) -> Option<u64> {
        if !NR_GNB_LENGTH_RANGE.contains(&gnb_bits) {
            return None;
        }
        self.nci.map(|nci| nci >> (36 - gnb_bits))
    }

    /// Cell local id for a gNB id length of `gnb_bits`.
    pub fn cell_local_id(&self, gnb_bits: u32) -> Option<u64> {
        if !NR_GNB_LENGTH_RANGE.contains(&gnb_bits) {
            return None;
        }
        let shift = 36 - gnb_bits;
        self.nci.map(|nci| nci & ((1u64 << shift) - 1))
    }

    pub fn sanitized(self) -> Self {
        Self {
            nci: in_range(self.nci, NR_NCI_RANGE),
            tac: in_range(self.tac, NR_TAC_RANGE),
            pci: in_range(self.pci, NR_PCI_RANGE),
            band: self.band.map(|b| BandTableNr::map(b.downlink_arfcn)),
            signal: self.signal.sanitized(),
            ..self
        }
    }
}

/// A cell observed by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technology", rename_all = "lowercase")]
pub enum Cell {
    Gsm(CellGsm),
    Cdma(CellCdma),
    Wcdma(CellWcdma),
    Lte(CellLte),
    Tdscdma(CellTdscdma),
    Nr(CellNr),
}

/// Expands `$body` once per variant with `$c` bound to the inner struct.
macro_rules! each_variant {
    ($cell:expr, $c:ident => $body:expr) => {
        match $cell {
            Cell::Gsm($c) => $body,
            Cell::Cdma($c) => $body,
            Cell::Wcdma($c) => $body,
            Cell::Lte($c) => $body,
            Cell::Tdscdma($c) => $body,
            Cell::Nr($c) => $body,
        }
    };
}

impl Cell {
    pub fn technology(&self) -> Technology {
        match self {
            Cell::Gsm(_) => Technology::Gsm,
            Cell::Cdma(_) => Technology::Cdma,
            Cell::Wcdma(_) => Technology::Wcdma,
            Cell::Lte(_) => Technology::Lte,
            Cell::Tdscdma(_) => Technology::Tdscdma,
            Cell::Nr(_) => Technology::Nr,
        }
    }

    pub fn subscription_id(&self) -> SubscriptionId {
        each_variant!(self, c => c.subscription_id)
    }

    pub fn network(&self) -> Option<&Network> {
        each_variant!(self, c => c.network.as_ref())
    }

    pub fn connection(&self) -> &Connection {
        each_variant!(self, c => &c.connection)
    }

    pub fn timestamp(&self) -> Option<u64> {
        each_variant!(self, c => c.timestamp)
    }

    pub fn is_primary(&self) -> bool {
        self.connection().is_primary()
    }

    /// Channel number of the band descriptor. CDMA has none.
    pub fn channel_number(&self) -> Option<u32> {
        match self {
            Cell::Gsm(c) => c.band.as_ref().map(Band::channel_number),
            Cell::Cdma(_) => None,
            Cell::Wcdma(c) => c.band.as_ref().map(Band::channel_number),
            Cell::Lte(c) => c.band.as_ref().map(Band::channel_number),
            Cell::Tdscdma(c) => c.band.as_ref().map(Band::channel_number),
            Cell::Nr(c) => c.band.as_ref().map(Band::channel_number),
        }
    }

    /// Most specific identity the cell carries: GSM cid, CDMA bid, WCDMA
    /// and TD-SCDMA ci, LTE eci, NR nci.
    pub fn full_identity(&self) -> Option<u64> {
        match self {
            Cell::Gsm(c) => c.cid.map(u64::from),
            Cell::Cdma(c) => c.bid.map(u64::from),
            Cell::Wcdma(c) => c.ci.map(u64::from),
            Cell::Lte(c) => c.eci.map(u64::from),
            Cell::Tdscdma(c) => c.ci.map(u64::from),
            Cell::Nr(c) => c.nci,
        }
    }

    pub fn with_network(self, network: Option<Network>) -> Self {
        self.map_common(|n, _, _| *n = network)
    }

    pub fn with_connection(self, connection: Connection) -> Self {
        self.map_common(|_, c, _| *c = connection)
    }

    pub fn with_subscription_id(self, subscription_id: SubscriptionId) -> Self {
        self.map_common(|_, _, s| *s = subscription_id)
    }

    fn map_common(
        mut self,
        f: impl FnOnce(&mut Option<Network>, &mut Connection, &mut SubscriptionId),
    ) -> Self {
        each_variant!(&mut self, c => f(&mut c.network, &mut c.connection, &mut c.subscription_id));
        self
    }

    /// Drops every identity and signal value outside its valid range.
    pub fn sanitized(self) -> Self {
        match self {
            Cell::Gsm(c) => Cell::Gsm(c.sanitized()),
            Cell::Cdma(c) => Cell::Cdma(c.sanitized()),
            Cell::Wcdma(c) => Cell::Wcdma(c.sanitized()),
            Cell::Lte(c) => Cell::Lte(c.sanitized()),
            Cell::Tdscdma(c) => Cell::Tdscdma(c.sanitized()),
            Cell::Nr(c) => Cell::Nr(c.sanitized()),
        }
    }
}

macro_rules! impl_from_variant {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Cell {
            fn from(cell: $ty) -> Self {
                Cell::$variant(cell)
            }
        }
    };
}

impl_from_variant!(CellGsm, Gsm);
impl_from_variant!(CellCdma, Cdma);
impl_from_variant!(CellWcdma, Wcdma);
impl_from_variant!(CellLte, Lte);
impl_from_variant!(CellTdscdma, Tdscdma);
impl_from_variant!(CellNr, Nr);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lte_derived_ids() {
        let cell = CellLte {
            network: Network::new(230, 3),
            eci: Some(26_123_267),
            ..Default::default()
        };
        assert_eq!(cell.enb(), Some(102_044));
        assert_eq!(cell.cid(), Some(3));
        assert_eq!(cell.ecgi().as_deref(), Some("230030026123267"));
    }

    #[test]
    fn test_wcdma_derived_ids() {
        let cell = CellWcdma {
            ci: Some(523_423),
            ..Default::default()
        };
        assert_eq!(cell.cid(), Some(523_423 & 0xFFFF));
        assert_eq!(cell.rnc(), Some(7));
    }

    #[test]
    fn test_gsm_bsic_digits_and_cgi() {
        let cell = CellGsm {
            network: Network::new(203, 2),
            cid: Some(4234),
            lac: Some(1231),
            bsic: Some(37),
            ..Default::default()
        };
        assert_eq!(cell.ncc(), Some(3));
        assert_eq!(cell.bcc(), Some(7));
        assert_eq!(cell.cgi().as_deref(), Some("203020123104234"));
    }

    #[test]
    fn test_nr_gnb_split() {
        let cell = CellNr {
            nci: Some(0x1_2345_6789),
            ..Default::default()
        };
        assert_eq!(cell.gnb_id(24), Some(0x1_2345_6789 >> 12));
        assert_eq!(cell.cell_local_id(24), Some(0x789));
        assert_eq!(cell.gnb_id(21), None);
    }

    #[test]
    fn test_sanitized_drops_sentinels() {
        let cell = Cell::Lte(CellLte {
            eci: Some(268_435_455),
            tac: Some(65_535),
            pci: Some(504),
            bandwidth: Some(200_000),
            ..Default::default()
        })
        .sanitized();

        let Cell::Lte(lte) = cell else { panic!("variant changed") };
        assert_eq!(lte.eci, None);
        assert_eq!(lte.tac, None);
        assert_eq!(lte.pci, None);
        assert_eq!(lte.bandwidth, None);
    }

    #[test]
    fn test_sanitized_resolves_bands() {
        let yaml = r#"
- technology: gsm
  network: { mcc: 310, mnc: 410 }
  band: { arfcn: 600 }
- technology: nr
  band: { downlink_arfcn: 700000 }
"#;
        let cells: Vec<Cell> = serde_yaml::from_str(yaml).unwrap();
        let cells: Vec<Cell> = cells.into_iter().map(Cell::sanitized).collect();

        let Cell::Gsm(gsm) = &cells[0] else { panic!("expected GSM") };
        assert_eq!(gsm.band, Some(BandTableGsm::map(600, Some("310"))));
        assert_eq!(gsm.band.as_ref().and_then(|b| b.number), Some(1900));

        let Cell::Nr(nr) = &cells[1] else { panic!("expected NR") };
        let band = nr.band.as_ref().unwrap();
        assert_eq!(band.downlink_frequency, 4_500_000);
        assert_eq!(band.number, Some(79));
        assert_eq!(band.name.as_deref(), Some("4500"));
    }

    #[test]
    fn test_with_helpers_keep_variant() {
        let cell = Cell::from(CellGsm::default())
            .with_subscription_id(3)
            .with_connection(Connection::primary())
            .with_network(Network::new(230, 1));

        assert_eq!(cell.technology(), Technology::Gsm);
        assert_eq!(cell.subscription_id(), 3);
        assert!(cell.is_primary());
        assert_eq!(cell.network(), Network::new(230, 1).as_ref());
    }

    #[test]
    fn test_yaml_cell() {
        let yaml = r#"
technology: lte
network: { mcc: 230, mnc: 3 }
eci: 2
pci: 17
connection: { role: primary }
subscription_id: 1
signal: { rsrp: -95.0 }
"#;
        let cell: Cell = serde_yaml::from_str(yaml).unwrap();
        let Cell::Lte(lte) = &cell else { panic!("expected LTE") };
        assert_eq!(lte.pci, Some(17));
        assert_eq!(lte.signal.rsrp, Some(-95.0));
        assert!(cell.is_primary());
    }
}
