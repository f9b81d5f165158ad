// grid.rs - Cell coordinates and validated grid geometry

use std::ops::Range;

use crate::error::{FieldError, Result};

/// Integer grid coordinate, 0-indexed on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub z: u32,
}

impl Cell {
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Planar distance to a point in cell space
    #[inline]
    pub fn distance_to(self, px: f32, pz: f32) -> f32 {
        let dx = self.x as f32 - px;
        let dz = self.z as f32 - pz;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Square grid with an inset spawn region.
///
/// Construction guarantees `size > 0` and `2 * margin < size`, so the spawn
/// region `[margin, size - margin)` is never empty and the pulse envelope
/// radius `size / 2 - margin` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    size: u32,
    margin: u32,
}

impl GridConfig {
    pub fn new(size: u32, margin: u32) -> Result<Self> {
        if size == 0 {
            return Err(FieldError::EmptyGrid);
        }
        if margin.saturating_mul(2) >= size {
            return Err(FieldError::DegenerateMargin { grid_size: size, margin });
        }
        Ok(Self { size, margin })
    }

    pub fn size(&self) -> u32 { self.size }
    pub fn margin(&self) -> u32 { self.margin }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Valid emitter coordinates on either axis
    pub fn spawn_range(&self) -> Range<u32> {
        self.margin..self.size - self.margin
    }

    /// Geometric center, shared by both axes
    pub fn center(&self) -> f32 {
        (self.size as f32 - 1.0) / 2.0
    }

    /// Distance from center at which the radial pulse fades to zero
    pub fn envelope_radius(&self) -> f32 {
        self.size as f32 / 2.0 - self.margin as f32
    }

    pub fn in_spawn_region(&self, cell: Cell) -> bool {
        let r = self.spawn_range();
        r.contains(&cell.x) && r.contains(&cell.z)
    }

    /// Row-major iteration, `x` outer
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |z| Cell::new(x, z)))
    }

    /// Flat buffer index for a cell, matching `cells()` order
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.x as usize * self.size as usize + cell.z as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_region_excludes_margin() {
        let grid = GridConfig::new(10, 2).unwrap();
        assert_eq!(grid.spawn_range(), 2..8);
        assert!(grid.in_spawn_region(Cell::new(2, 7)));
        assert!(!grid.in_spawn_region(Cell::new(8, 4)));
        assert!(!grid.in_spawn_region(Cell::new(1, 4)));
    }

    #[test]
    fn single_cell_grid_is_valid() {
        let grid = GridConfig::new(1, 0).unwrap();
        assert_eq!(grid.spawn_range(), 0..1);
        assert_eq!(grid.center(), 0.0);
        assert_eq!(grid.envelope_radius(), 0.5);
    }

    #[test]
    fn cells_follow_buffer_order() {
        let grid = GridConfig::new(3, 0).unwrap();
        for (i, cell) in grid.cells().enumerate() {
            assert_eq!(grid.index(cell), i);
        }
        assert_eq!(grid.cells().count(), grid.cell_count());
    }
}
