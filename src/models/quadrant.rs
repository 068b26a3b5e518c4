//! Quadrant slots of the emblem.

use crate::models::ElementId;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Number of quadrants in an emblem.
pub const QUADRANT_COUNT: usize = 4;

/// Smallest allowed element scale.
pub const MIN_ELEMENT_SCALE: f64 = 0.5;

/// Largest allowed element scale.
pub const MAX_ELEMENT_SCALE: f64 = 2.0;

/// Offset of an element from its quadrant's fixed anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

impl Offset {
    /// Creates a new offset.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One of the four emblem quadrants.
///
/// The quadrant's position is its index in the design's quadrant array and is
/// never stored. Index 0 is top-left, then clockwise: 1 top-right, 2
/// bottom-right, 3 bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quadrant {
    /// Decorative element shown in this quadrant
    pub element_id: ElementId,
    /// Element scale (0.5-2.0)
    pub element_scale: f64,
    /// Offset from the quadrant anchor
    pub center_offset: Offset,
    /// Whether the quadrant shows a colored disk behind the element
    pub is_filled: bool,
}

impl Quadrant {
    /// Creates a quadrant at scale 1.0 with no offset.
    #[must_use]
    pub const fn new(element_id: ElementId, is_filled: bool) -> Self {
        Self {
            element_id,
            element_scale: 1.0,
            center_offset: Offset::new(0.0, 0.0),
            is_filled,
        }
    }

    /// Clamps a requested scale into the allowed range.
    #[must_use]
    pub fn clamp_scale(scale: f64) -> f64 {
        if scale.is_nan() {
            return 1.0;
        }
        scale.clamp(MIN_ELEMENT_SCALE, MAX_ELEMENT_SCALE)
    }

    /// Validates scale range and offset finiteness.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_ELEMENT_SCALE..=MAX_ELEMENT_SCALE).contains(&self.element_scale) {
            anyhow::bail!(
                "Element scale {} is outside {MIN_ELEMENT_SCALE}-{MAX_ELEMENT_SCALE}",
                self.element_scale
            );
        }

        if !self.center_offset.x.is_finite() || !self.center_offset.y.is_finite() {
            anyhow::bail!("Center offset must be finite");
        }

        Ok(())
    }
}

/// A quadrant index that may carry a fill: only quadrants 0 and 3.
///
/// Tier-2 and tier-3 overrides are keyed by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillQuadrant {
    /// Quadrant 0 (top-left)
    First,
    /// Quadrant 3 (bottom-left)
    Last,
}

impl FillQuadrant {
    /// Quadrant array index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Last => 3,
        }
    }

    /// Maps an array index to a fillable quadrant, if it is one.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            3 => Some(Self::Last),
            _ => None,
        }
    }
}
