// render.rs - Per-frame output buffers
//
// Output layout (for the renderer, indexed in `GridConfig::cells()` order):
//   heights  = one f32 per cell
//   colors   = three u8 per cell, packed r, g, b
//
// Every frame is recomputed in full; diffing against the previous frame is
// left to the consumer.

use crate::color::Rgb;

pub struct Encoder {
    heights: Vec<f32>,
    colors: Vec<u8>,
}

impl Encoder {
    pub fn new(cells: usize) -> Self {
        Self {
            heights: vec![0.0; cells],
            colors: vec![0; cells * 3],
        }
    }

    pub fn resize(&mut self, cells: usize) {
        self.heights.resize(cells, 0.0);
        self.colors.resize(cells * 3, 0);
    }

    #[inline]
    pub fn put(&mut self, idx: usize, height: f32, color: Rgb) {
        self.heights[idx] = height;
        self.colors[idx * 3..idx * 3 + 3].copy_from_slice(&color.to_array());
    }

    pub fn height(&self, idx: usize) -> f32 {
        self.heights[idx]
    }

    pub fn color(&self, idx: usize) -> Rgb {
        let c = &self.colors[idx * 3..idx * 3 + 3];
        Rgb::new(c[0], c[1], c[2])
    }

    pub fn heights(&self) -> &[f32] { &self.heights }
    pub fn colors(&self) -> &[u8] { &self.colors }

    pub fn cells(&self) -> usize {
        self.heights.len()
    }

    // Raw views for JS typed arrays
    pub fn heights_ptr(&self) -> *const f32 { self.heights.as_ptr() }
    pub fn colors_ptr(&self) -> *const u8 { self.colors.as_ptr() }
}
