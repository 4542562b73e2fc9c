//! LTE bandwidth and secondary role from physical channel configs.
//!
//! The modem lists the channels it is using (role, bandwidth, PCI and
//! sometimes EARFCN) separately from the cell list. Configs are paired with
//! cells in passes of decreasing certainty; each pass consumes the configs
//! it used so later passes only see what is left.

use std::collections::HashMap;

use super::{per_subscription, PipelineContext, Postprocessor};
use crate::model::{Band, Cell, CellLte, Connection, PhysicalChannelConfig};

#[derive(Debug, Default)]
pub struct PhysicalChannelPostprocessor;

impl Postprocessor for PhysicalChannelPostprocessor {
    fn name(&self) -> &'static str {
        "physical_channel"
    }

    fn process(&self, cells: Vec<Cell>, ctx: &PipelineContext<'_>) -> Vec<Cell> {
        per_subscription(cells, |sub, cells| {
            let configs = ctx.snapshot.physical_channel_configs(sub);
            MergeBundle { cells, configs }
                .remove_redundant_configs()
                .merge_by_pci()
                .merge_by_pci_with_hints()
                .merge_by_pci()
                .merge_by_connection()
                .merge_leftovers()
                .into_fixed_cells()
        })
    }
}

struct MergeBundle {
    cells: Vec<Cell>,
    configs: Vec<PhysicalChannelConfig>,
}

fn lte_cells(cells: &[Cell]) -> impl Iterator<Item = (usize, &CellLte)> {
    cells.iter().enumerate().filter_map(|(i, c)| match c {
        Cell::Lte(lte) => Some((i, lte)),
        _ => None,
    })
}

/// The only item of `items`, if there is exactly one.
fn single<T>(mut items: impl Iterator<Item = T>) -> Option<T> {
    match (items.next(), items.next()) {
        (Some(item), None) => Some(item),
        _ => None,
    }
}

fn same_connection(a: &Connection, b: &Connection) -> bool {
    match (a, b) {
        (Connection::Primary { .. }, Connection::Primary { .. }) => true,
        _ => a == b,
    }
}

impl MergeBundle {
    /// Drops configs already reflected by a cell.
    fn remove_redundant_configs(mut self) -> Self {
        let cells = &self.cells;
        self.configs.retain(|config| {
            !lte_cells(cells).any(|(_, cell)| {
                same_connection(&cell.connection, &config.connection)
                    && cell.bandwidth == config.bandwidth
                    && (config.pci.is_none() || cell.pci == config.pci)
            })
        });
        self
    }

    /// Pairs each config with the only bandwidth-less cell sharing its PCI.
    fn merge_by_pci(self) -> Self {
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for (config_index, config) in self.configs.iter().enumerate() {
            if config.pci.is_none() {
                continue;
            }
            let candidate = single(
                lte_cells(&self.cells).filter(|(_, cell)| cell.pci == config.pci && cell.bandwidth.is_none()),
            );
            if let Some((cell_index, _)) = candidate {
                pairs.retain(|(cell, _)| *cell != cell_index);
                pairs.push((cell_index, config_index));
            }
        }
        self.apply(pairs)
    }

    /// Operators use one bandwidth per EARFCN. A cell on an EARFCN whose
    /// bandwidth is already known takes the only config with that
    /// bandwidth and its PCI, which resolves PCIs reused across channels.
    fn merge_by_pci_with_hints(self) -> Self {
        let mut hints: HashMap<u32, u32> = HashMap::new();
        for (_, cell) in lte_cells(&self.cells) {
            if let (Some(bandwidth), Some(band)) = (cell.bandwidth, &cell.band) {
                hints.insert(band.channel_number(), bandwidth);
            }
        }

        let pairs: Vec<(usize, usize)> = lte_cells(&self.cells)
            .filter_map(|(cell_index, cell)| {
                let preferred = hints.get(&cell.band.as_ref()?.channel_number())?;
                let (config_index, _) = single(
                    self.configs
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| c.bandwidth == Some(*preferred) && c.pci == cell.pci),
                )?;
                Some((cell_index, config_index))
            })
            .collect();
        self.apply(pairs)
    }

    /// A single primary config belongs to the serving cell, whatever its PCI.
    fn merge_by_connection(mut self) -> Self {
        let primary = single(
            self.configs
                .iter()
                .enumerate()
                .filter(|(_, c)| c.connection.is_primary())
                .map(|(i, _)| i),
        );
        let Some(index) = primary else {
            return self;
        };

        let config = self.configs.remove(index);
        for cell in &mut self.cells {
            if let Cell::Lte(lte) = cell {
                if lte.connection.is_primary() {
                    lte.bandwidth = lte.bandwidth.or(config.bandwidth);
                }
            }
        }
        self
    }

    /// Configs without a channel are shared out among cells with the same
    /// PCI. Identical configs count as separate tokens; when more cells
    /// claim a config than there are copies of it, none of them gets it.
    fn merge_leftovers(self) -> Self {
        let mut tokens: HashMap<&PhysicalChannelConfig, i32> = HashMap::new();
        for config in &self.configs {
            *tokens.entry(config).or_default() += 1;
        }

        let mut claims: Vec<(usize, usize)> = Vec::new();
        for (cell_index, cell) in lte_cells(&self.cells) {
            if cell.bandwidth.is_some() || cell.band.is_none() {
                continue;
            }
            let found = self
                .configs
                .iter()
                .position(|c| c.pci == cell.pci && c.channel_number.is_none());
            if let Some(config_index) = found {
                *tokens.entry(&self.configs[config_index]).or_default() -= 1;
                claims.push((cell_index, config_index));
            }
        }

        let accepted: Vec<(usize, usize)> = claims
            .into_iter()
            .filter(|(_, config)| tokens.get(&self.configs[*config]).is_some_and(|t| *t >= 0))
            .collect();
        drop(tokens);
        self.apply(accepted)
    }

    /// Merges each `(cell, config)` pair and removes every config equal to
    /// one that was used.
    fn apply(mut self, pairs: Vec<(usize, usize)>) -> Self {
        let used: Vec<PhysicalChannelConfig> = pairs.iter().map(|(_, c)| self.configs[*c].clone()).collect();
        for (cell_index, config_index) in pairs {
            if let Cell::Lte(lte) = &mut self.cells[cell_index] {
                merge_by_code(lte, &self.configs[config_index]);
            }
        }
        self.configs.retain(|c| !used.contains(c));
        self
    }

    /// Configs and cells are refreshed independently, so a secondary may
    /// briefly appear on the serving EARFCN. Two serving cells cannot share
    /// a channel, so such a secondary is demoted.
    fn into_fixed_cells(self) -> Vec<Cell> {
        let primary_channels: Vec<u32> = lte_cells(&self.cells)
            .filter(|(_, c)| c.connection.is_primary())
            .filter_map(|(_, c)| c.band.as_ref().map(Band::channel_number))
            .collect();

        self.cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Lte(mut lte)
                    if lte.connection.is_secondary()
                        && lte
                            .band
                            .as_ref()
                            .is_some_and(|b| primary_channels.contains(&b.channel_number())) =>
                {
                    lte.connection = Connection::None;
                    Cell::Lte(lte)
                }
                other => other,
            })
            .collect()
    }
}

fn merge_by_code(cell: &mut CellLte, config: &PhysicalChannelConfig) {
    let connection = match (&cell.connection, &config.connection) {
        (Connection::Primary { .. }, _) => cell.connection.clone(),
        (_, Connection::Secondary { .. }) => config.connection.clone(),
        // Samsung reports secondary cells as primary channels
        (Connection::None, Connection::Primary { .. }) => Connection::secondary(true),
        (current, _) => current.clone(),
    };
    cell.connection = connection;
    cell.bandwidth = cell.bandwidth.or(config.bandwidth);
}
