// error.rs - Configuration error taxonomy
//
// Per-frame work is plain arithmetic and never fails. Everything that can go
// wrong is caught when a grid, pool or tuning is configured.

/// Rejected engine configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("grid size must be positive")]
    EmptyGrid,

    #[error("margin {margin} leaves no spawn region on a {grid_size}x{grid_size} grid")]
    DegenerateMargin { grid_size: u32, margin: u32 },

    #[error("{requested} emitters requested, pool holds at most {capacity}")]
    TooManyEmitters { requested: usize, capacity: usize },

    #[error("invalid emitter duration range {min_ms}..{max_ms} ms")]
    InvalidDurationRange { min_ms: f64, max_ms: f64 },

    #[error("ripple radius must be positive, got {0}")]
    InvalidRippleRadius(f32),

    #[error("ripple time normalization must be positive, got {0}")]
    InvalidNormalization(f64),

    #[error("unknown animation mode {0}, expected 1-9")]
    UnknownMode(u8),
}

pub type Result<T> = std::result::Result<T, FieldError>;
