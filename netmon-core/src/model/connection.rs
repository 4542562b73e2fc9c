//! Connection role of a cell towards the device.

use serde::{Deserialize, Serialize};

use super::band::AggregatedBand;

/// How the device is attached to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Connection {
    /// Serving cell. `aggregated` lists known carrier-aggregation components.
    Primary {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        aggregated: Vec<AggregatedBand>,
    },
    /// Carrier-aggregation or dual-connectivity cell. `is_guess` marks roles
    /// inferred by the pipeline rather than reported by the modem.
    Secondary {
        #[serde(default)]
        is_guess: bool,
    },
    /// Detected neighbour without an active connection.
    #[default]
    None,
}

impl Connection {
    /// Plain serving-cell role without aggregation info.
    pub const fn primary() -> Self {
        Connection::Primary {
            aggregated: Vec::new(),
        }
    }

    /// Secondary role.
    pub const fn secondary(is_guess: bool) -> Self {
        Connection::Secondary { is_guess }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Connection::Primary { .. })
    }

    pub fn is_secondary(&self) -> bool {
        matches!(self, Connection::Secondary { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Connection::None)
    }

    /// Same role, ignoring payloads.
    pub fn same_role(&self, other: &Connection) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
