// field/ - Procedural height field
//
// Pure functions over grid geometry. No per-frame state, no allocation on
// the per-cell path.

mod grid;
mod mode;
mod offsets;
mod wave;

pub use grid::{Cell, GridConfig};
pub use mode::{Mode, Sample};
pub use offsets::{OffsetTable, generate_offsets};
pub use wave::{FieldContext, ambient, evaluate, jitter, pulse, ripples};
