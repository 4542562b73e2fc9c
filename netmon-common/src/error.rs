//! Error types for netmon

use thiserror::Error;

/// Failure reported by one of the acquisition sources feeding the pipeline.
///
/// The pipeline never produces these itself. Callers that collect raw cells
/// report them so a failed source can be logged and treated as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AcquisitionError {
    /// The source did not answer in time.
    #[error("acquisition timed out")]
    Timeout,

    /// The modem reported an error while collecting data.
    #[error("modem error")]
    ModemError,

    /// The platform version does not expose this source.
    #[error("unsupported platform version")]
    UnsupportedVersion,

    /// Anything else.
    #[error("unknown acquisition failure")]
    Unknown,
}

/// Error types for the netmon library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),

    /// A data source failed.
    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_error_converts() {
        let err: Error = AcquisitionError::Timeout.into();
        assert_eq!(err.to_string(), "Acquisition error: acquisition timed out");
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::Config("missing device".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing device");
    }
}
