//! Cells learned from network registration info.

use crate::model::Cell;

/// Appends registration cells that are not already known.
#[derive(Debug, Default)]
pub struct RegistrationMerger;

impl RegistrationMerger {
    pub fn merge(&self, existing: Vec<Cell>, registrations: &[Cell]) -> Vec<Cell> {
        let added: Vec<Cell> = registrations
            .iter()
            .filter(|cell| !existing.iter().any(|known| is_similar(known, cell)))
            .cloned()
            .collect();

        let mut merged = existing;
        merged.extend(added);
        merged
    }
}

/// Same subscription, same technology and the same full identity.
fn is_similar(a: &Cell, b: &Cell) -> bool {
    a.subscription_id() == b.subscription_id()
        && a.technology() == b.technology()
        && a.full_identity() == b.full_identity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellGsm, CellLte, Connection};

    fn lte(sub: i32, eci: Option<u32>) -> Cell {
        Cell::Lte(CellLte {
            eci,
            subscription_id: sub,
            connection: Connection::primary(),
            ..Default::default()
        })
    }

    #[test]
    fn test_known_cells_are_skipped() {
        let existing = vec![lte(1, Some(100)), lte(1, None)];
        let merged = RegistrationMerger.merge(existing.clone(), &[lte(1, Some(100)), lte(1, None)]);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_new_cells_are_appended() {
        let existing = vec![lte(1, Some(100))];
        let gsm = Cell::Gsm(CellGsm {
            cid: Some(100),
            subscription_id: 1,
            ..Default::default()
        });

        let merged = RegistrationMerger.merge(existing, &[lte(2, Some(100)), gsm.clone()]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1], lte(2, Some(100)));
        assert_eq!(merged[2], gsm);
    }
}
