//! The style snapshot every render is driven by.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::ColorToken;

/// Allowed range for [`StyleState::size_percent`].
pub const SIZE_PERCENT_RANGE: RangeInclusive<u32> = 10..=200;
/// Allowed range for [`StyleState::shadow_blur`].
pub const SHADOW_BLUR_RANGE: RangeInclusive<u32> = 0..=100;
/// Allowed range for [`StyleState::corner_radius`].
pub const CORNER_RADIUS_RANGE: RangeInclusive<u32> = 0..=50;

/// Error returned when a style token (gradient kind, filter, format) is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} value: {value}")]
pub struct UnknownTokenError {
    kind: &'static str,
    value: String,
}

impl UnknownTokenError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Shape of the backdrop gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Corner to corner, top-left to bottom-right.
    #[default]
    Linear,
    /// Centered ellipse reaching the farthest corner.
    Radial,
    /// Rendered as a vertical linear gradient, top to bottom.
    Angular,
}

/// Color filter applied to the placed image only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Brightness,
    Contrast,
    Invert,
}

/// Encoding used by the download adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    /// File extension, also used in the download file name.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    /// Name of the downloaded file, e.g. `image.png`.
    pub fn file_name(self) -> String {
        format!("image.{}", self.extension())
    }
}

macro_rules! token_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownTokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text $(| $alias)* => Ok($ty::$variant),)+
                    _ => Err(UnknownTokenError::new($kind, s)),
                }
            }
        }
    };
}

token_enum!(GradientKind, "gradient", {
    Linear => "linear",
    Radial => "radial",
    Angular => "angular",
});

token_enum!(Filter, "filter", {
    None => "none",
    Grayscale => "grayscale",
    Sepia => "sepia",
    Brightness => "brightness",
    Contrast => "contrast",
    Invert => "invert",
});

token_enum!(ExportFormat, "export format", {
    Png => "png",
    Jpeg => "jpeg" | "jpg",
});

/// Backdrop gradient: a shape and two colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub color_a: ColorToken,
    pub color_b: ColorToken,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            color_a: ColorToken::hex(0x69, 0xc4, 0xcf),
            color_b: ColorToken::hex(0xf8, 0xf9, 0xfa),
        }
    }
}

/// Every user-adjustable visual parameter.
///
/// Numeric fields are private so that they can only change through the
/// clamping setters; the invariants hold for every value of this type
/// except freshly deserialized ones, which should go through [`StyleState::clamped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    gradient: Gradient,
    size_percent: u32,
    shadow_blur: u32,
    corner_radius: u32,
    filter: Filter,
    flip_horizontal: bool,
    flip_vertical: bool,
    export_format: ExportFormat,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            size_percent: 100,
            shadow_blur: 0,
            corner_radius: 10,
            filter: Filter::None,
            flip_horizontal: false,
            flip_vertical: false,
            export_format: ExportFormat::Png,
        }
    }
}

#[inline]
fn clamp_to(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

impl StyleState {
    /// Create a style with the default look (linear teal-to-white backdrop).
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-establish every range invariant. Use on values built outside the setters.
    pub fn clamped(mut self) -> Self {
        self.size_percent = clamp_to(self.size_percent.into(), &SIZE_PERCENT_RANGE);
        self.shadow_blur = clamp_to(self.shadow_blur.into(), &SHADOW_BLUR_RANGE);
        self.corner_radius = clamp_to(self.corner_radius.into(), &CORNER_RADIUS_RANGE);
        self
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn set_gradient(&mut self, gradient: Gradient) {
        self.gradient = gradient;
    }

    pub fn gradient_kind(&self) -> GradientKind {
        self.gradient.kind
    }

    pub fn set_gradient_kind(&mut self, kind: GradientKind) {
        self.gradient.kind = kind;
    }

    pub fn gradient_colors(&self) -> (ColorToken, ColorToken) {
        (self.gradient.color_a, self.gradient.color_b)
    }

    pub fn set_gradient_colors(&mut self, color_a: ColorToken, color_b: ColorToken) {
        self.gradient.color_a = color_a;
        self.gradient.color_b = color_b;
    }

    pub fn size_percent(&self) -> u32 {
        self.size_percent
    }

    /// Set the image size, clamped to 10-200%.
    pub fn set_size_percent(&mut self, value: i64) {
        self.size_percent = clamp_to(value, &SIZE_PERCENT_RANGE);
    }

    pub fn shadow_blur(&self) -> u32 {
        self.shadow_blur
    }

    /// Set the shadow blur radius, clamped to 0-100 px. Zero disables the shadow.
    pub fn set_shadow_blur(&mut self, value: i64) {
        self.shadow_blur = clamp_to(value, &SHADOW_BLUR_RANGE);
    }

    pub fn corner_radius(&self) -> u32 {
        self.corner_radius
    }

    /// Set the corner radius, clamped to 0-50 px.
    pub fn set_corner_radius(&mut self, value: i64) {
        self.corner_radius = clamp_to(value, &CORNER_RADIUS_RANGE);
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    pub fn set_flip_horizontal(&mut self, value: bool) {
        self.flip_horizontal = value;
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical
    }

    pub fn set_flip_vertical(&mut self, value: bool) {
        self.flip_vertical = value;
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }

    /// Pick two new backdrop colors using the thread-local generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Pick two new backdrop colors from `rng`.
    ///
    /// Each color gets an independent hue in [0, 360), saturation in
    /// [50, 100)% and lightness in [50, 80)%, which keeps both tones bright
    /// enough to sit behind a screenshot.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let color_a = random_color(rng);
        let color_b = random_color(rng);
        self.set_gradient_colors(color_a, color_b);
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> ColorToken {
    let hue = rng.gen_range(0u32..360);
    let saturation = rng.gen_range(50u32..100);
    let lightness = rng.gen_range(50u32..80);
    ColorToken::hsl(hue as f32, saturation as f32, lightness as f32)
}
