//! Display cells held in a `hecs` world, exposed to tiling as a `CellStore`.

use hecs::{Entity, World};
use panelgrid_logic::lattice::LatticePos;
use panelgrid_logic::orientation::Orientation;
use panelgrid_logic::store::{CellRecord, CellStore};
use std::collections::HashMap;

use crate::components::{DisplayCell, TileGroup};
use crate::error::StoreError;

/// ECS world of display cells plus a position → entity index.
pub struct CellWorld {
    world: World,
    index: HashMap<LatticePos, Entity>,
}

impl CellWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
        }
    }

    /// Spawn an unassigned cell. Fails if the position is taken.
    pub fn insert_cell(
        &mut self,
        pos: LatticePos,
        orientation: Orientation,
    ) -> Result<Entity, StoreError> {
        if self.index.contains_key(&pos) {
            return Err(StoreError::Occupied(pos));
        }
        let entity = self.world.spawn((DisplayCell { pos, orientation },));
        self.index.insert(pos, entity);
        Ok(entity)
    }

    /// Despawn the cell at `pos`, returning it if there was one.
    pub fn remove_cell(&mut self, pos: LatticePos) -> Option<DisplayCell> {
        let entity = self.index.remove(&pos)?;
        let cell = self.world.get::<&DisplayCell>(entity).ok().map(|c| *c);
        let _ = self.world.despawn(entity);
        cell
    }

    fn cell(&self, pos: LatticePos) -> Result<Option<DisplayCell>, StoreError> {
        let Some(&entity) = self.index.get(&pos) else {
            return Ok(None);
        };
        let cell = self.world.get::<&DisplayCell>(entity)?;
        Ok(Some(*cell))
    }

    pub fn orientation_at(&self, pos: LatticePos) -> Option<Orientation> {
        self.cell(pos).ok().flatten().map(|c| c.orientation)
    }

    pub fn group_at(&self, pos: LatticePos) -> Option<TileGroup> {
        let entity = *self.index.get(&pos)?;
        self.world.get::<&TileGroup>(entity).ok().map(|g| *g)
    }

    pub fn contains(&self, pos: LatticePos) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Snapshot of every cell, sorted by position.
    pub fn records(&self) -> Vec<CellRecord> {
        let mut records: Vec<CellRecord> = self
            .world
            .query::<(&DisplayCell, Option<&TileGroup>)>()
            .iter()
            .map(|(_, (cell, group))| CellRecord {
                pos: cell.pos,
                orientation: cell.orientation,
                group: group.copied(),
            })
            .collect();
        records.sort_by_key(|r| r.pos);
        records
    }
}

impl Default for CellWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CellStore for CellWorld {
    type Error = StoreError;

    fn cell_at(&self, pos: LatticePos) -> Result<Option<Orientation>, StoreError> {
        Ok(self.cell(pos)?.map(|c| c.orientation))
    }

    fn write_group(&mut self, pos: LatticePos, group: TileGroup) -> Result<(), StoreError> {
        let entity = *self.index.get(&pos).ok_or(StoreError::MissingCell(pos))?;
        self.world
            .insert_one(entity, group)
            .map_err(|_| StoreError::MissingCell(pos))
    }
}
