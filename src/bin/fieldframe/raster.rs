// raster.rs - Rasterize a frame of cell colors
//
// Each cell becomes a cell_px square; x runs left to right, z top to bottom.
// The first row and column of every square are darkened to mark cube edges.

use image::{Rgb, RgbImage};
use wavegrid_engine::render::Encoder;
use wavegrid_engine::{Cell, GridConfig};

const EDGE_SHADE: f32 = 0.6;

pub fn frame_image(grid: &GridConfig, frame: &Encoder, cell_px: u32) -> RgbImage {
    let side = grid.size() * cell_px;
    RgbImage::from_fn(side, side, |px, py| {
        let cell = Cell::new(px / cell_px, py / cell_px);
        let c = frame.color(grid.index(cell));
        let edge = cell_px > 2 && (px % cell_px == 0 || py % cell_px == 0);
        if edge {
            Rgb([shade(c.r), shade(c.g), shade(c.b)])
        } else {
            Rgb(c.to_array())
        }
    })
}

#[inline]
fn shade(c: u8) -> u8 {
    (c as f32 * EDGE_SHADE) as u8
}
