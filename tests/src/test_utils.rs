//! Test utility functions for integration tests
//!
//! Provides logging setup and assertions over reconciled cell lists.

use std::collections::BTreeMap;

use netmon_common::SubscriptionId;
use netmon_core::Cell;
use tracing_subscriber::{fmt, EnvFilter};

/// Result type for integration tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info".
/// Safe to call from every test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Number of cells per subscription
pub fn count_by_subscription(cells: &[Cell]) -> BTreeMap<SubscriptionId, usize> {
    let mut counts = BTreeMap::new();
    for cell in cells {
        *counts.entry(cell.subscription_id()).or_insert(0) += 1;
    }
    counts
}

/// Serving cell of `sub`, if any
pub fn primary_of(cells: &[Cell], sub: SubscriptionId) -> Option<&Cell> {
    cells.iter().find(|c| c.subscription_id() == sub && c.is_primary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netmon_core::model::{CellGsm, Connection};

    fn gsm(sub: SubscriptionId, connection: Connection) -> Cell {
        Cell::Gsm(CellGsm {
            connection,
            subscription_id: sub,
            ..Default::default()
        })
    }

    #[test]
    fn test_count_by_subscription() {
        let cells = vec![gsm(2, Connection::None), gsm(1, Connection::primary()), gsm(2, Connection::primary())];
        let counts = count_by_subscription(&cells);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
    }

    #[test]
    fn test_primary_of() {
        let cells = vec![gsm(1, Connection::None), gsm(1, Connection::primary())];
        assert!(primary_of(&cells, 1).is_some_and(Cell::is_primary));
        assert!(primary_of(&cells, 2).is_none());
    }
}
