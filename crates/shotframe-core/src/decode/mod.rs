//! Source image decoding.
//!
//! Turns the bytes of a user-chosen file into a [`SourceImage`]: format
//! sniffing, decoding to RGBA8 and EXIF orientation correction. Everything
//! here is synchronous.

mod source;
mod types;

pub use source::extract_orientation;
pub use types::{DecodeError, Orientation, SourceImage};
