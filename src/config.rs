// config.rs - Engine configuration
//
// Everything the presentation layer can change between frames, plus the wave
// tuning constants. Defaults match the shipped animation.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::field::{GridConfig, Mode};
use crate::sim::MAX_EMITTERS;

// Ambient wave
pub const AMBIENT_SPEED: f32 = 2.0;
pub const AMBIENT_AMPLITUDE: f32 = 1.0;
pub const AMBIENT_PHASE_X: f32 = 0.7;
pub const AMBIENT_PHASE_Z: f32 = 0.9;
pub const AMBIENT_AXIS_OFFSET: f32 = 2.0;

// Radial pulse
pub const PULSE_SPEED: f32 = 5.0;
pub const PULSE_SCALE: f32 = 1.5;

// Per-cell jitter
pub const JITTER_SPEED: f32 = 12.0;
pub const JITTER_SCALE: f32 = 1.0;

// Ripples
pub const RIPPLE_SPEED: f32 = 12.0;
pub const RIPPLE_RADIUS: f32 = 4.0;
pub const RIPPLE_LEAD_MS: f64 = 50.0;
pub const RIPPLE_TIME_DECAY: f64 = 1.0;
pub const RIPPLE_NORMALIZATION_MS: f64 = 2000.0;
pub const RIPPLE_HEIGHT_MULTIPLIER: f32 = 1.0;
pub const RIPPLE_MIN_DURATION_MS: f64 = 500.0;
pub const RIPPLE_MAX_DURATION_MS: f64 = 4000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientTuning {
    pub speed: f32,
    pub amplitude: f32,
    pub phase_x: f32,
    pub phase_z: f32,
    pub axis_offset: f32,
}

impl Default for AmbientTuning {
    fn default() -> Self {
        Self {
            speed: AMBIENT_SPEED,
            amplitude: AMBIENT_AMPLITUDE,
            phase_x: AMBIENT_PHASE_X,
            phase_z: AMBIENT_PHASE_Z,
            axis_offset: AMBIENT_AXIS_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseTuning {
    pub speed: f32,
    pub scale: f32,
}

impl Default for PulseTuning {
    fn default() -> Self {
        Self { speed: PULSE_SPEED, scale: PULSE_SCALE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterTuning {
    pub speed: f32,
    pub scale: f32,
}

impl Default for JitterTuning {
    fn default() -> Self {
        Self { speed: JITTER_SPEED, scale: JITTER_SCALE }
    }
}

/// Multi-emitter ripple tuning.
///
/// `lead_ms`, `time_decay` and `normalization_ms` drifted between historical
/// variants of the animation (lead 0 or 50, divisor 2000 to 4000), so they are
/// knobs rather than literals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleTuning {
    pub speed: f32,
    /// Hard cutoff distance in cells
    pub radius: f32,
    /// Emitters expire this many ms before `due`
    pub lead_ms: f64,
    pub time_decay: f64,
    pub normalization_ms: f64,
    pub height_multiplier: f32,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
}

impl Default for RippleTuning {
    fn default() -> Self {
        Self {
            speed: RIPPLE_SPEED,
            radius: RIPPLE_RADIUS,
            lead_ms: RIPPLE_LEAD_MS,
            time_decay: RIPPLE_TIME_DECAY,
            normalization_ms: RIPPLE_NORMALIZATION_MS,
            height_multiplier: RIPPLE_HEIGHT_MULTIPLIER,
            min_duration_ms: RIPPLE_MIN_DURATION_MS,
            max_duration_ms: RIPPLE_MAX_DURATION_MS,
        }
    }
}

impl RippleTuning {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0) {
            return Err(FieldError::InvalidRippleRadius(self.radius));
        }
        if !(self.normalization_ms > 0.0) {
            return Err(FieldError::InvalidNormalization(self.normalization_ms));
        }
        let (min_ms, max_ms) = (self.min_duration_ms, self.max_duration_ms);
        if !(min_ms > 0.0) || !(max_ms >= min_ms) {
            return Err(FieldError::InvalidDurationRange { min_ms, max_ms });
        }
        Ok(())
    }
}

/// Per-mode wave constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub ambient: AmbientTuning,
    pub pulse: PulseTuning,
    pub jitter: JitterTuning,
    pub ripple: RippleTuning,
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub grid_size: u32,
    pub margin: u32,
    pub emitters: usize,
    /// Animation selector, 1-9
    pub mode: u8,
    pub blend_percent: f32,
    /// Base color as (hue, saturation, lightness), each in [0, 1]
    pub base_hsl: [f32; 3],
    pub waves: WaveTuning,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            margin: 0,
            emitters: 1,
            mode: 1,
            blend_percent: 0.0,
            base_hsl: [0.5, 0.5, 0.5],
            waves: WaveTuning::default(),
        }
    }
}

impl FieldConfig {
    /// Check every configuration-time rule without building a session.
    pub fn validate(&self) -> Result<()> {
        self.grid()?;
        self.selected_mode()?;
        if self.emitters > MAX_EMITTERS {
            return Err(FieldError::TooManyEmitters {
                requested: self.emitters,
                capacity: MAX_EMITTERS,
            });
        }
        self.waves.ripple.validate()
    }

    pub fn grid(&self) -> Result<GridConfig> {
        GridConfig::new(self.grid_size, self.margin)
    }

    pub fn selected_mode(&self) -> Result<Mode> {
        Mode::from_index(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(0, 0, FieldError::EmptyGrid)]
    #[case(10, 5, FieldError::DegenerateMargin { grid_size: 10, margin: 5 })]
    #[case(5, 3, FieldError::DegenerateMargin { grid_size: 5, margin: 3 })]
    fn rejects_degenerate_grids(#[case] grid_size: u32, #[case] margin: u32, #[case] expected: FieldError) {
        let config = FieldConfig { grid_size, margin, ..Default::default() };
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn rejects_oversized_pool() {
        let config = FieldConfig { emitters: MAX_EMITTERS + 1, ..Default::default() };
        assert!(matches!(config.validate(), Err(FieldError::TooManyEmitters { .. })));
    }

    #[test]
    fn rejects_bad_ripple_tuning() {
        let mut ripple = RippleTuning { radius: 0.0, ..Default::default() };
        assert_eq!(ripple.validate(), Err(FieldError::InvalidRippleRadius(0.0)));

        ripple.radius = RIPPLE_RADIUS;
        ripple.normalization_ms = -1.0;
        assert_eq!(ripple.validate(), Err(FieldError::InvalidNormalization(-1.0)));

        ripple.normalization_ms = RIPPLE_NORMALIZATION_MS;
        ripple.min_duration_ms = 3000.0;
        ripple.max_duration_ms = 1000.0;
        assert!(matches!(ripple.validate(), Err(FieldError::InvalidDurationRange { .. })));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: FieldConfig = serde_json::from_str(r#"{"grid_size": 12, "waves": {"ripple": {"lead_ms": 0}}}"#)
            .expect("failed to parse");
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.margin, 0);
        assert_eq!(config.waves.ripple.lead_ms, 0.0);
        assert_eq!(config.waves.ripple.radius, RIPPLE_RADIUS);
    }
}
