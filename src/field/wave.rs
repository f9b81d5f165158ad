// wave.rs - Height functions, one per animation mode
//
// Pure math over (time, cell, parameters). Elapsed time `t` is in seconds,
// wall-clock `now` is in milliseconds and only matters to the ripple mode.

use crate::config::{AmbientTuning, JitterTuning, PulseTuning, RippleTuning, WaveTuning};
use crate::sim::EmitterPool;

use super::{Cell, GridConfig, Mode, OffsetTable, Sample};

/// Read-only state a frame's evaluation needs.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub grid: &'a GridConfig,
    pub offsets: &'a OffsetTable,
    pub emitters: &'a EmitterPool,
    pub tuning: &'a WaveTuning,
}

/// Evaluate the selected mode at one cell.
///
/// For `Mode::Ripples` the pool must already have been ticked for `now`.
#[inline]
pub fn evaluate(mode: Mode, t: f32, now: f64, cell: Cell, ctx: &FieldContext) -> Sample {
    let h = match mode {
        Mode::Ambient => ambient(t, cell, &ctx.tuning.ambient),
        Mode::Pulse => pulse(t, cell, ctx.grid, &ctx.tuning.pulse),
        Mode::Jitter => jitter(t, cell, ctx.offsets, &ctx.tuning.jitter),
        Mode::Ripples => ripples(t, now, cell, ctx.emitters, &ctx.tuning.ripple),
        Mode::Reserved(_) => return Sample::Unimplemented(mode),
    };
    Sample::Height(h)
}

/// Mode 1: `A * (sin(ωt + φx) + sin(ωt + φz))`
#[inline]
pub fn ambient(t: f32, cell: Cell, w: &AmbientTuning) -> f32 {
    let phase_x = (cell.x as f32 + w.axis_offset) * w.phase_x;
    let phase_z = (cell.z as f32 + w.axis_offset) * w.phase_z;
    let wt = t * w.speed;
    w.amplitude * ((wt + phase_x).sin() + (wt + phase_z).sin())
}

/// Mode 2: sine travelling outward from the center, fading linearly to zero
/// at `grid.envelope_radius()`.
#[inline]
pub fn pulse(t: f32, cell: Cell, grid: &GridConfig, w: &PulseTuning) -> f32 {
    let c = grid.center();
    let d = cell.distance_to(c, c);
    let decay = 1.0 / grid.envelope_radius();
    (t * w.speed - d).sin() * (1.0 - d * decay).max(0.0) * w.scale
}

/// Mode 3: `sin(ωt + φ) cos(ωt + φ)` with φ from the offset table.
#[inline]
pub fn jitter(t: f32, cell: Cell, offsets: &OffsetTable, w: &JitterTuning) -> f32 {
    let a = t * w.speed + offsets.get(cell);
    a.sin() * a.cos() * w.scale
}

/// Mode 4: linear sum of every emitter's ripple within `radius`.
///
/// Intensity `(due - now) / duration` runs 1 -> 0 over an emitter's life and
/// may dip below zero during the lead window. The time warp
/// `(due - now) * time_decay / normalization` slows the phase as an emitter
/// nears expiry.
pub fn ripples(t: f32, now: f64, cell: Cell, emitters: &EmitterPool, w: &RippleTuning) -> f32 {
    let decay = 1.0 / w.radius;
    let mut height = 0.0;

    for e in emitters.iter() {
        let d = cell.distance_to(e.location.x as f32, e.location.z as f32);
        if d > w.radius {
            continue;
        }

        let remaining = e.due - now;
        let intensity = e.remaining_fraction(now) as f32;
        let warp = (remaining * w.time_decay / w.normalization_ms) as f32;

        height += ((t + warp) * w.speed - d).sin() * (1.0 - d * decay).max(0.0) * warp * intensity;
    }

    height * w.height_multiplier
}
