// offsets.rs - Random phase table for the jitter mode
//
// One uniform sample in [0, 2π) per cell. The table is immutable: a grid size
// change builds a new one instead of mutating the old.

use std::f32::consts::TAU;

use fastrand::Rng;
use ndarray::Array2;

use super::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTable {
    phases: Array2<f32>,
}

impl OffsetTable {
    pub fn size(&self) -> u32 {
        self.phases.nrows() as u32
    }

    /// Phase for `cell`. Panics if the cell lies outside the table.
    #[inline]
    pub fn get(&self, cell: Cell) -> f32 {
        self.phases[[cell.x as usize, cell.z as usize]]
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.phases.iter().copied()
    }
}

/// Build a `grid_size` x `grid_size` table of independent phases.
pub fn generate_offsets(grid_size: u32, rng: &mut Rng) -> OffsetTable {
    let n = grid_size as usize;
    OffsetTable {
        phases: Array2::from_shape_fn((n, n), |_| rng.f32() * TAU),
    }
}
