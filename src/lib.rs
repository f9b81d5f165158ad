use wasm_bindgen::prelude::*;

// ============================================================================
// WAVE GRID - Procedural height field for an animated grid of cubes
// ============================================================================
//
// The renderer owns the scene; this crate owns the numbers. Once per frame JS
// calls `tick`, then reads one height and one packed RGB color per cell
// straight out of wasm memory.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod render;
pub mod sim;

pub use color::{HeightPalette, Rgb, hsl_to_rgb, map_height};
pub use config::{FieldConfig, WaveTuning};
pub use error::FieldError;
pub use field::{Cell, GridConfig, Mode, Sample};
pub use sim::{Emitter, EmitterPool, FieldSession, FrameStats};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn js_err(e: FieldError) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen]
pub struct WaveGrid {
    session: FieldSession,
    implemented: bool,
}

#[wasm_bindgen]
impl WaveGrid {
    #[wasm_bindgen(constructor)]
    pub fn new(grid_size: u32, margin: u32, emitters: usize) -> Result<WaveGrid, JsError> {
        let config = FieldConfig { grid_size, margin, emitters, ..Default::default() };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let session = FieldSession::new(&config, seed, js_sys::Date::now()).map_err(js_err)?;
        Ok(Self { session, implemented: true })
    }

    /// `elapsed` is the animation clock in seconds, `now` wall time in ms
    pub fn tick(&mut self, elapsed: f32, now: f64) -> usize {
        let stats = self.session.tick(elapsed, now);
        self.implemented = stats.implemented;
        stats.respawned
    }

    pub fn tick_now(&mut self, elapsed: f32) -> usize {
        self.tick(elapsed, js_sys::Date::now())
    }

    pub fn set_grid(&mut self, grid_size: u32, margin: u32) -> Result<(), JsError> {
        self.session.set_grid(grid_size, margin, js_sys::Date::now()).map_err(js_err)
    }

    pub fn set_emitters(&mut self, count: usize) -> Result<(), JsError> {
        self.session.set_emitter_count(count, js_sys::Date::now()).map_err(js_err)
    }

    pub fn set_mode(&mut self, mode: u8) -> Result<(), JsError> {
        self.session.set_mode(Mode::from_index(mode).map_err(js_err)?);
        Ok(())
    }

    pub fn set_ripple_timing(&mut self, lead_ms: f64, time_decay: f64, normalization_ms: f64) -> Result<(), JsError> {
        let mut tuning = *self.session.tuning();
        tuning.ripple.lead_ms = lead_ms;
        tuning.ripple.time_decay = time_decay;
        tuning.ripple.normalization_ms = normalization_ms;
        self.session.set_tuning(tuning).map_err(js_err)
    }

    pub fn set_blend(&mut self, percent: f32) {
        self.session.set_blend_percent(percent);
    }

    pub fn set_base_hsl(&mut self, hue: f32, saturation: f32, lightness: f32) {
        self.session.set_base_hsl(hue, saturation, lightness);
    }

    /// CSS form of the current base color, for UI chrome
    pub fn base_color(&self) -> String {
        self.session.base_color().to_string()
    }

    /// False after a frame from a mode with no wave yet
    pub fn mode_implemented(&self) -> bool {
        self.implemented
    }

    // Accessors for WASM
    pub fn heights_ptr(&self) -> *const f32 { self.session.frame().heights_ptr() }
    pub fn colors_ptr(&self) -> *const u8 { self.session.frame().colors_ptr() }
    pub fn cell_count(&self) -> usize { self.session.frame().cells() }
    pub fn grid_size(&self) -> u32 { self.session.grid().size() }
    pub fn mode(&self) -> u8 { self.session.mode().index() }
}
