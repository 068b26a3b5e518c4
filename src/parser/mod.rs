//! Parsing of color strings and vector markup.
//!
//! This module turns user- and artwork-supplied strings into typed values:
//! CSS-style color strings into [`HslColor`](crate::models::HslColor) and
//! markup fragments into a small owned element tree.

pub mod color;
pub mod markup;

// Re-export commonly used functions
pub use color::parse_color_string;
pub use markup::{parse_fragment, MarkupElement, MarkupNode};
