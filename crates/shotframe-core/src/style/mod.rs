//! Style model: every user-adjustable parameter of a render.
//!
//! The model has no behavior beyond validation, defaults and color
//! randomization. Setters clamp out-of-range input instead of failing, so a
//! slider can pass raw values straight through.

mod color;
mod state;

pub use color::{hsl_to_rgb, ColorParseError, ColorToken, Rgb};
pub use state::{
    ExportFormat, Filter, Gradient, GradientKind, StyleState, UnknownTokenError,
    CORNER_RADIUS_RANGE, SHADOW_BLUR_RANGE, SIZE_PERCENT_RANGE,
};
