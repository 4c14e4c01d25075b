//! Tiling engine - the event source that drives re-tiling.
//!
//! Structural edits arrive either immediately (`place` / `remove`) or queued
//! through `submit` and drained in order by `tick`. Either way the engine
//! takes `&mut self`, so edits are serialized one at a time.

use log::{debug, trace, warn};
use panelgrid_logic::assignment::{dissolve_and_reform, form_group, RetileReport};
use panelgrid_logic::config::{validate_config, TilingConfig};
use panelgrid_logic::lattice::LatticePos;
use panelgrid_logic::orientation::Orientation;
use panelgrid_logic::validate::{validate_all, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::components::TileGroup;
use crate::error::EngineError;
use crate::store::CellWorld;

/// A structural edit waiting for the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEvent {
    Placed {
        pos: LatticePos,
        orientation: Orientation,
    },
    Removed {
        pos: LatticePos,
    },
}

/// Main tiling engine
pub struct TilingEngine {
    /// Display cells and their group components
    pub world: CellWorld,
    config: TilingConfig,
    pending: VecDeque<CellEvent>,
    ticks: u64,
}

impl TilingEngine {
    /// Create an empty engine with the default 10×10 limit
    pub fn new() -> Self {
        Self {
            world: CellWorld::new(),
            config: TilingConfig::default(),
            pending: VecDeque::new(),
            ticks: 0,
        }
    }

    /// Create an empty engine with a custom config, rejecting invalid ones
    pub fn with_config(config: TilingConfig) -> Result<Self, EngineError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(EngineError::InvalidConfig(errors));
        }
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Add a cell and re-tile the region it joins.
    pub fn place(
        &mut self,
        pos: LatticePos,
        orientation: Orientation,
    ) -> Result<RetileReport, EngineError> {
        self.world.insert_cell(pos, orientation)?;
        let report = form_group(&mut self.world, pos, orientation, &self.config)?;
        self.log_report("place", pos, &report);
        Ok(report)
    }

    /// Re-tile around the cell at `pos`, then delete it.
    ///
    /// `Ok(None)` when there is no cell at `pos`.
    pub fn remove(&mut self, pos: LatticePos) -> Result<Option<RetileReport>, EngineError> {
        let Some(orientation) = self.world.orientation_at(pos) else {
            debug!("remove {}: no cell", pos);
            return Ok(None);
        };
        // The cell must still be visible while its region is re-tiled.
        let report = dissolve_and_reform(&mut self.world, pos, orientation, &self.config)?;
        self.world.remove_cell(pos);
        self.log_report("remove", pos, &report);
        Ok(Some(report))
    }

    /// Queue an edit for the next tick.
    pub fn submit(&mut self, event: CellEvent) {
        self.pending.push_back(event);
    }

    /// Number of queued edits.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued edit in submission order.
    ///
    /// Placing onto an occupied position is skipped with a warning. A store
    /// failure stops the tick; the failed edit and everything after it stay
    /// queued.
    pub fn tick(&mut self) -> Result<Vec<RetileReport>, EngineError> {
        self.ticks += 1;
        let mut reports = Vec::with_capacity(self.pending.len());
        while let Some(&event) = self.pending.front() {
            let outcome = match event {
                CellEvent::Placed { pos, orientation } => {
                    if self.world.contains(pos) {
                        warn!("tick {}: place {} skipped, position occupied", self.ticks, pos);
                        None
                    } else {
                        Some(self.place(pos, orientation)?)
                    }
                }
                CellEvent::Removed { pos } => self.remove(pos)?,
            };
            self.pending.pop_front();
            reports.extend(outcome);
        }
        trace!("tick {}: {} re-tile pass(es)", self.ticks, reports.len());
        Ok(reports)
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn group_at(&self, pos: LatticePos) -> Option<TileGroup> {
        self.world.group_at(pos)
    }

    /// Master cell of the tile containing `pos`.
    pub fn master_of(&self, pos: LatticePos) -> Option<LatticePos> {
        self.group_at(pos).map(|g| g.master)
    }

    /// (column, row) of `pos` inside its tile.
    pub fn local_offset(&self, pos: LatticePos) -> Option<(u32, u32)> {
        let orientation = self.world.orientation_at(pos)?;
        self.group_at(pos)?.local_offset(pos, orientation)
    }

    pub fn cell_count(&self) -> usize {
        self.world.len()
    }

    /// Distinct tiles currently assigned, singletons included.
    pub fn tile_count(&self) -> usize {
        self.world
            .records()
            .iter()
            .filter_map(|r| r.group.map(|g| g.master))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Check every tiling invariant against the current world.
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_all(&self.world.records(), &self.config)
    }

    fn log_report(&self, action: &str, pos: LatticePos, report: &RetileReport) {
        debug!(
            "{} {}: scanned {}, {} tile(s), {} singleton(s)",
            action,
            pos,
            report.scanned,
            report.tiles.len(),
            report.singletons.len()
        );
        for tile in &report.tiles {
            trace!(
                "  tile master={} {}x{}",
                tile.group.master,
                tile.group.width,
                tile.group.height
            );
        }
        if report.truncated {
            warn!(
                "{} {}: scan stopped at {} cells; region exceeds the {}x{} limit",
                action,
                pos,
                self.config.scan_cap(),
                self.config.max_size,
                self.config.max_size
            );
        }
    }
}

impl Default for TilingEngine {
    fn default() -> Self {
        Self::new()
    }
}
