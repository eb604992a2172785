//! Uniform grid spatial index. Entries are bucketed by their
//! ground-plane (x, y) cell; a query scans the block of cells around the
//! query point sized to the caller's own search range, rather than
//! walking every entry. For the common case (range no wider than a
//! cell) that block is the classic 3×3; a wide-sight query (e.g. a
//! bird's 250 m `sight_dist`) widens the block instead of risking a
//! miss on an entry bucketed several cells away.

use std::collections::HashMap;

use npcsim_core::constants::SPATIAL_CELL_SIZE;
use npcsim_core::types::{Uid, Vec3};

type CellKey = (i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<Uid>>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(SPATIAL_CELL_SIZE)
    }
}

impl SpatialIndex {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size, cells: HashMap::new() }
    }

    fn cell_of(&self, pos: Vec3) -> CellKey {
        ((pos.x / self.cell_size).floor() as i32, (pos.y / self.cell_size).floor() as i32)
    }

    pub fn insert(&mut self, id: Uid, pos: Vec3) {
        self.cells.entry(self.cell_of(pos)).or_default().push(id);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Every id bucketed within `range` of `pos`, widening the scanned
    /// block as `range` grows past one cell. Callers still need to
    /// distance-filter the result: this only narrows the candidate set.
    pub fn query(&self, pos: Vec3, range: f32) -> Vec<Uid> {
        let (cx, cy) = self.cell_of(pos);
        let block_radius = ((range / self.cell_size).ceil() as i32).max(1);
        let mut out = Vec::new();
        for dx in -block_radius..=block_radius {
            for dy in -block_radius..=block_radius {
                if let Some(ids) = self.cells.get(&(cx + dx, cy + dy)) {
                    out.extend(ids.iter().copied());
                }
            }
        }
        out
    }
}
