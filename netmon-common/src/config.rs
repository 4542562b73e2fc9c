//! Configuration structures for the reconciliation pipeline
//!
//! A [`NetmonConfig`] describes the device whose observations are being
//! reconciled, which postprocessing stages run and how logging is set up.
//! Vendor-specific stages consult [`DeviceProfile`] to decide whether they
//! apply.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;

/// Product names of Google Pixel phones built on the Tensor modem.
pub const PIXEL_TENSOR_PRODUCTS: &[&str] = &["oriole", "raven", "bluejay", "panther", "cheetah"];

/// OS API level from which Samsung firmware glues area-code bytes in the
/// wrong order.
pub const SAMSUNG_ENDIANNESS_MIN_OS_LEVEL: u32 = 31;

/// OS API level from which every subscription handle returns its own cells.
pub const RELIABLE_SUBSCRIPTIONS_OS_LEVEL: u32 = 29;

// ============================================================================
// Device profile
// ============================================================================

/// Build information of the device the observations came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Manufacturer as reported by the platform, e.g. `samsung`
    #[serde(default)]
    pub manufacturer: String,
    /// Brand, often equal to the manufacturer
    #[serde(default)]
    pub brand: String,
    /// Product code name, e.g. `oriole`
    #[serde(default)]
    pub product: String,
    /// Marketing model name
    #[serde(default)]
    pub model: String,
    /// Hardware / board name, used to spot MediaTek chipsets
    #[serde(default)]
    pub hardware: String,
    /// OS API level
    #[serde(default = "default_os_level")]
    pub os_level: u32,
    /// Full build fingerprint. Persisted flags are keyed by it so they
    /// reset whenever the firmware changes.
    #[serde(default = "default_build_fingerprint")]
    pub build_fingerprint: String,
}

fn default_os_level() -> u32 {
    RELIABLE_SUBSCRIPTIONS_OS_LEVEL
}

fn default_build_fingerprint() -> String {
    "generic".to_string()
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            manufacturer: String::new(),
            brand: String::new(),
            product: String::new(),
            model: String::new(),
            hardware: String::new(),
            os_level: default_os_level(),
            build_fingerprint: default_build_fingerprint(),
        }
    }
}

impl DeviceProfile {
    /// Creates a profile for `manufacturer` running OS level `os_level`.
    pub fn new(manufacturer: &str, os_level: u32) -> Self {
        Self {
            manufacturer: manufacturer.to_string(),
            brand: manufacturer.to_string(),
            os_level,
            build_fingerprint: format!("{}/{}", manufacturer.to_lowercase(), os_level),
            ..Default::default()
        }
    }

    /// Sets the product code name.
    pub fn with_product(mut self, product: &str) -> Self {
        self.product = product.to_string();
        self
    }

    /// Sets the hardware / board name.
    pub fn with_hardware(mut self, hardware: &str) -> Self {
        self.hardware = hardware.to_string();
        self
    }

    /// Samsung devices, identified by manufacturer or brand.
    pub fn is_samsung(&self) -> bool {
        self.manufacturer.eq_ignore_ascii_case("samsung") || self.brand.eq_ignore_ascii_case("samsung")
    }

    /// Devices on a MediaTek chipset. Their board names start with `mt`.
    pub fn is_mediatek(&self) -> bool {
        let hardware = self.hardware.to_lowercase();
        hardware.starts_with("mt") || hardware.contains("mediatek")
    }

    /// Google Pixel phones with a Tensor modem.
    pub fn is_pixel_tensor(&self) -> bool {
        self.manufacturer.eq_ignore_ascii_case("google")
            && PIXEL_TENSOR_PRODUCTS.contains(&self.product.as_str())
    }
}

// ============================================================================
// Pipeline configuration
// ============================================================================

/// Controls which postprocessing stages run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Every subscription handle is known to return only its own cells, so
    /// duplicate removal is skipped. When unset the decision is taken from
    /// the device OS level.
    #[serde(default)]
    pub subscriptions_reliable: Option<bool>,
    /// Derive the NR NSA state after reconciliation.
    #[serde(default = "default_parse_nsa_state")]
    pub parse_nsa_state: bool,
    /// Names of stages to leave out of the standard pipeline.
    #[serde(default)]
    pub disabled_stages: Vec<String>,
}

fn default_parse_nsa_state() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            subscriptions_reliable: None,
            parse_nsa_state: default_parse_nsa_state(),
            disabled_stages: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Returns true if the stage called `name` should run.
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled_stages.iter().any(|s| s == name)
    }

    /// Resolves whether subscriptions can be trusted on `device`.
    pub fn subscriptions_reliable_for(&self, device: &DeviceProfile) -> bool {
        self.subscriptions_reliable
            .unwrap_or(device.os_level >= RELIABLE_SUBSCRIPTIONS_OS_LEVEL)
    }
}

// ============================================================================
// Logging configuration
// ============================================================================

/// Logging setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default)]
    pub level: LogLevel,
    /// Full filter directive, overrides `level`
    #[serde(default)]
    pub filter: Option<String>,
    /// Include the event target in output
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_with_target() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            filter: None,
            with_target: default_with_target(),
        }
    }
}

// ============================================================================
// Top-level configuration
// ============================================================================

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NetmonConfig {
    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Device the observations came from
    #[serde(default)]
    pub device: DeviceProfile,
    /// Stage selection
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl NetmonConfig {
    /// Parses a configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use netmon_common::NetmonConfig;
    ///
    /// let yaml = r#"
    /// device:
    ///   manufacturer: samsung
    ///   os_level: 31
    /// pipeline:
    ///   disabled_stages: [timing_advance]
    /// "#;
    ///
    /// let config = NetmonConfig::from_yaml(yaml).unwrap();
    /// assert!(config.device.is_samsung());
    /// assert!(!config.pipeline.is_enabled("timing_advance"));
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.device.build_fingerprint.trim().is_empty() {
            return Err(Error::Config("device.build_fingerprint must not be empty".to_string()));
        }
        Ok(())
    }
}
