// mode.rs - Animation selector
//
// Slots 1-4 are implemented. Slots 5-9 exist in the selector but have no wave
// yet; evaluating them yields `Sample::Unimplemented` rather than a height.

use crate::error::{FieldError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Two crossed sine trains
    Ambient,
    /// Standing wave radiating from the grid center
    Pulse,
    /// Fast per-cell flicker with random phase
    Jitter,
    /// Sum of ripples from the emitter pool
    Ripples,
    /// Selector slot 5-9 with no wave behind it
    Reserved(u8),
}

impl Mode {
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1 => Ok(Mode::Ambient),
            2 => Ok(Mode::Pulse),
            3 => Ok(Mode::Jitter),
            4 => Ok(Mode::Ripples),
            5..=9 => Ok(Mode::Reserved(index)),
            _ => Err(FieldError::UnknownMode(index)),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Mode::Ambient => 1,
            Mode::Pulse => 2,
            Mode::Jitter => 3,
            Mode::Ripples => 4,
            Mode::Reserved(i) => i,
        }
    }

    pub fn is_implemented(self) -> bool {
        !matches!(self, Mode::Reserved(_))
    }
}

/// Result of evaluating one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Height(f32),
    Unimplemented(Mode),
}

impl Sample {
    /// Height to displace the cell by; unimplemented modes leave it flat.
    #[inline]
    pub fn height(self) -> f32 {
        match self {
            Sample::Height(h) => h,
            Sample::Unimplemented(_) => 0.0,
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Sample::Height(_))
    }
}
