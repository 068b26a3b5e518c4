//! Data models for emblem designs and colors.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of storage and CLI concerns.

pub mod design;
pub mod element;
pub mod hsl;
pub mod quadrant;
pub mod rgb;

// Re-export all model types
pub use design::{BaseDesign, DesignConfiguration, TwoToneDesign, UniqueElementColors};
pub use element::ElementId;
pub use hsl::HslColor;
pub use quadrant::{FillQuadrant, Offset, Quadrant, MAX_ELEMENT_SCALE, MIN_ELEMENT_SCALE, QUADRANT_COUNT};
pub use rgb::RgbColor;
