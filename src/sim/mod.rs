// sim/ - Field simulation session
//
// The session owns every piece of mutable state: offsets, emitter pool, RNG
// and frame buffers. Nothing is shared between sessions.

mod emitter;

pub use emitter::{Emitter, EmitterPool};

use fastrand::Rng;

use crate::color::{HeightPalette, Rgb, hsl_to_rgb};
use crate::config::{FieldConfig, WaveTuning};
use crate::error::Result;
use crate::field::{self, Cell, FieldContext, GridConfig, Mode, OffsetTable, generate_offsets};
use crate::render::Encoder;

// Capacity limits
pub const MAX_EMITTERS: usize = 64;

/// What a tick did, for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub respawned: usize,
    /// False when the frame came from a reserved mode
    pub implemented: bool,
}

pub struct FieldSession {
    // Geometry
    grid: GridConfig,
    offsets: OffsetTable,

    // Waves
    mode: Mode,
    tuning: WaveTuning,
    emitters: EmitterPool,

    // Color
    palette: HeightPalette,
    blend_percent: f32,
    base_hsl: [f32; 3],
    base: Rgb,

    // Output
    encoder: Encoder,

    rng: Rng,
}

impl FieldSession {
    /// Build a session from a validated config. `now` (ms) stamps the
    /// initial emitters.
    pub fn new(config: &FieldConfig, seed: u64, now: f64) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let mut rng = Rng::with_seed(seed);

        let offsets = generate_offsets(grid.size(), &mut rng);
        let mut emitters = EmitterPool::new();
        emitters.resize(config.emitters, now, &grid, &config.waves.ripple, &mut rng)?;

        let base_hsl = config.base_hsl.map(|c| c.clamp(0.0, 1.0));
        let [h, s, l] = base_hsl;

        log::debug!(
            "session: {0}x{0} grid, margin {1}, {2} emitters, mode {3}",
            grid.size(),
            grid.margin(),
            emitters.len(),
            config.mode
        );

        Ok(Self {
            grid,
            offsets,
            mode: config.selected_mode()?,
            tuning: config.waves,
            emitters,
            palette: HeightPalette::default(),
            blend_percent: config.blend_percent.clamp(0.0, 100.0),
            base_hsl,
            base: hsl_to_rgb(h, s, l),
            encoder: Encoder::new(grid.cell_count()),
            rng,
        })
    }

    /// Advance one frame: age the emitter pool, then evaluate every cell.
    pub fn tick(&mut self, elapsed_secs: f32, now: f64) -> FrameStats {
        // Ripple evaluation reads the pool, so it must be fully ticked first
        let respawned = self.emitters.tick(now, &self.grid, &self.tuning.ripple, &mut self.rng);

        let ctx = FieldContext {
            grid: &self.grid,
            offsets: &self.offsets,
            emitters: &self.emitters,
            tuning: &self.tuning,
        };

        let mut implemented = true;
        for cell in self.grid.cells() {
            let sample = field::evaluate(self.mode, elapsed_secs, now, cell, &ctx);
            implemented &= sample.is_implemented();

            let h = sample.height();
            let color = self.palette.map(h, self.blend_percent, self.base);
            self.encoder.put(self.grid.index(cell), h, color);
        }

        FrameStats { respawned, implemented }
    }

    /// Change grid geometry. Offsets are regenerated and every emitter is
    /// respawned inside the new spawn region.
    pub fn set_grid(&mut self, size: u32, margin: u32, now: f64) -> Result<()> {
        let grid = GridConfig::new(size, margin)?;
        if grid == self.grid {
            return Ok(());
        }

        if grid.size() != self.grid.size() {
            self.offsets = generate_offsets(grid.size(), &mut self.rng);
            self.encoder.resize(grid.cell_count());
        }
        self.grid = grid;
        self.emitters.respawn_all(now, &self.grid, &self.tuning.ripple, &mut self.rng);

        log::debug!("grid changed to {0}x{0}, margin {1}", size, margin);
        Ok(())
    }

    pub fn set_emitter_count(&mut self, count: usize, now: f64) -> Result<()> {
        self.emitters.resize(count, now, &self.grid, &self.tuning.ripple, &mut self.rng)?;
        log::debug!("emitter pool resized to {count}");
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        if !mode.is_implemented() {
            log::warn!("mode {} has no wave yet, cells will stay flat", mode.index());
        }
        self.mode = mode;
    }

    pub fn set_tuning(&mut self, tuning: WaveTuning) -> Result<()> {
        tuning.ripple.validate()?;
        self.tuning = tuning;
        Ok(())
    }

    pub fn set_blend_percent(&mut self, percent: f32) {
        self.blend_percent = percent.clamp(0.0, 100.0);
    }

    /// Update the base color; a no-op unless the triple actually changed.
    pub fn set_base_hsl(&mut self, hue: f32, saturation: f32, lightness: f32) {
        let hsl = [hue, saturation, lightness].map(|c| c.clamp(0.0, 1.0));
        if hsl == self.base_hsl {
            return;
        }
        self.base_hsl = hsl;
        self.base = hsl_to_rgb(hsl[0], hsl[1], hsl[2]);
    }

    // Accessors
    pub fn grid(&self) -> &GridConfig { &self.grid }
    pub fn mode(&self) -> Mode { self.mode }
    pub fn tuning(&self) -> &WaveTuning { &self.tuning }
    pub fn offsets(&self) -> &OffsetTable { &self.offsets }
    pub fn emitters(&self) -> &EmitterPool { &self.emitters }
    pub fn emitters_mut(&mut self) -> &mut EmitterPool { &mut self.emitters }
    pub fn blend_percent(&self) -> f32 { self.blend_percent }
    pub fn base_color(&self) -> Rgb { self.base }
    pub fn frame(&self) -> &Encoder { &self.encoder }
}

/// Uniform cell inside the grid's spawn region
#[inline]
pub fn random_location(grid: &GridConfig, rng: &mut Rng) -> Cell {
    let range = grid.spawn_range();
    Cell::new(rng.u32(range.clone()), rng.u32(range))
}

/// Uniform duration in `[min_ms, max_ms)`
#[inline]
pub fn random_duration(min_ms: f64, max_ms: f64, rng: &mut Rng) -> f64 {
    rng.f64() * (max_ms - min_ms) + min_ms
}
