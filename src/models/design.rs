//! Design configuration: the unit of persistence, export and import.
//!
//! A design is resolved in three tiers:
//!
//! 1. [`BaseDesign`] (always present) supplies one shared fill for every filled
//!    quadrant and one element color per background kind.
//! 2. [`TwoToneDesign`] (optional) gives quadrants 0 and 3 their own fills.
//! 3. [`UniqueElementColors`] (optional, nested in tier 2) gives the elements
//!    over those two fills their own colors.

use crate::constants::{DEFAULT_DESIGN_NAME, FORMAT_VERSION};
use crate::models::quadrant::QUADRANT_COUNT;
use crate::models::{ElementId, FillQuadrant, HslColor, Quadrant};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tier-1 colors, always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDesign {
    /// Shared fill for every filled quadrant
    pub fill_color_for_filled_quadrants: HslColor,
    /// Element color when the element sits directly on the base
    pub element_color_over_base: HslColor,
    /// Element color when the element sits on a quadrant fill
    pub element_color_over_filled_quadrants: HslColor,
}

/// Tier-3 colors: one element color per fillable quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueElementColors {
    /// Element color over quadrant 0's fill
    pub element_color_over_quadrant0_fill: HslColor,
    /// Element color over quadrant 3's fill
    pub element_color_over_quadrant3_fill: HslColor,
}

impl UniqueElementColors {
    /// Both slots set to the same color.
    #[must_use]
    pub const fn uniform(color: HslColor) -> Self {
        Self {
            element_color_over_quadrant0_fill: color,
            element_color_over_quadrant3_fill: color,
        }
    }

    /// Color stored for the given quadrant.
    #[must_use]
    pub const fn get(&self, quadrant: FillQuadrant) -> HslColor {
        match quadrant {
            FillQuadrant::First => self.element_color_over_quadrant0_fill,
            FillQuadrant::Last => self.element_color_over_quadrant3_fill,
        }
    }

    /// Replaces the color for the given quadrant.
    pub fn set(&mut self, quadrant: FillQuadrant, color: HslColor) {
        match quadrant {
            FillQuadrant::First => self.element_color_over_quadrant0_fill = color,
            FillQuadrant::Last => self.element_color_over_quadrant3_fill = color,
        }
    }

    /// Returns true when both colors are within HSL range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.element_color_over_quadrant0_fill.is_valid()
            && self.element_color_over_quadrant3_fill.is_valid()
    }
}

/// Tier-2 colors: per-quadrant fills for quadrants 0 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoToneDesign {
    /// Fill for quadrant 0
    pub fill_color_quadrant0: HslColor,
    /// Fill for quadrant 3
    pub fill_color_quadrant3: HslColor,
    /// Optional tier-3 element colors
    pub unique_element_colors: Option<UniqueElementColors>,
}

impl TwoToneDesign {
    /// Both fills set to the same color, no tier-3 colors.
    #[must_use]
    pub const fn uniform(fill: HslColor) -> Self {
        Self {
            fill_color_quadrant0: fill,
            fill_color_quadrant3: fill,
            unique_element_colors: None,
        }
    }

    /// Fill stored for the given quadrant.
    #[must_use]
    pub const fn fill(&self, quadrant: FillQuadrant) -> HslColor {
        match quadrant {
            FillQuadrant::First => self.fill_color_quadrant0,
            FillQuadrant::Last => self.fill_color_quadrant3,
        }
    }

    /// Replaces the fill for the given quadrant.
    pub fn set_fill(&mut self, quadrant: FillQuadrant, color: HslColor) {
        match quadrant {
            FillQuadrant::First => self.fill_color_quadrant0 = color,
            FillQuadrant::Last => self.fill_color_quadrant3 = color,
        }
    }

    /// Returns true when both fills and any nested tier-3 colors are within HSL range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fill_color_quadrant0.is_valid()
            && self.fill_color_quadrant3.is_valid()
            && self
                .unique_element_colors
                .as_ref()
                .is_none_or(UniqueElementColors::is_valid)
    }
}

/// A complete emblem design.
///
/// # Validation
///
/// - version must be non-empty
/// - every color channel must be inside its HSL range
/// - every quadrant scale must be within 0.5-2.0 and offsets finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignConfiguration {
    /// Format version tag (e.g., "1.0")
    pub version: String,
    /// Display name
    pub name: String,
    /// Color of the base artwork and the overlay stroke
    pub base_color: HslColor,
    /// Decorative elements offered to the user
    pub available_elements: Vec<ElementId>,
    /// Quadrants in position order (0 top-left, clockwise)
    pub quadrants: [Quadrant; QUADRANT_COUNT],
    /// Tier-1 colors
    pub base_design: BaseDesign,
    /// Tier-2 colors (tier 3 nested inside)
    pub two_tone_design: Option<TwoToneDesign>,
}

impl Default for DesignConfiguration {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            name: DEFAULT_DESIGN_NAME.to_string(),
            base_color: HslColor::new(45.0, 65.0, 55.0),
            available_elements: ElementId::ALL.to_vec(),
            quadrants: [
                Quadrant::new(ElementId::Briefcase, true),
                Quadrant::new(ElementId::Mountains, false),
                Quadrant::new(ElementId::Dollar, false),
                Quadrant::new(ElementId::Leaf, true),
            ],
            base_design: BaseDesign {
                fill_color_for_filled_quadrants: HslColor::new(210.0, 100.0, 50.0),
                element_color_over_base: HslColor::WHITE,
                element_color_over_filled_quadrants: HslColor::WHITE,
            },
            two_tone_design: None,
        }
    }
}

impl DesignConfiguration {
    /// Deserializes and validates a design from a JSON value.
    ///
    /// Unknown fields are ignored.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let design: Self =
            serde_json::from_value(value).context("Design does not match the current schema")?;
        design.validate()?;
        Ok(design)
    }

    /// Parses and validates a design from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).context("Invalid JSON")?;
        Self::from_value(value)
    }

    /// Serializes to pretty-printed JSON (the export payload).
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize design")
    }

    /// Validates ranges that the type system does not capture.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            anyhow::bail!("Design version must not be empty");
        }

        let check = |label: &str, color: &HslColor| -> Result<()> {
            if color.is_valid() {
                Ok(())
            } else {
                anyhow::bail!("Color '{label}' is out of range: {color:?}")
            }
        };

        check("baseColor", &self.base_color)?;
        check(
            "baseDesign.fillColorForFilledQuadrants",
            &self.base_design.fill_color_for_filled_quadrants,
        )?;
        check(
            "baseDesign.elementColorOverBase",
            &self.base_design.element_color_over_base,
        )?;
        check(
            "baseDesign.elementColorOverFilledQuadrants",
            &self.base_design.element_color_over_filled_quadrants,
        )?;

        if let Some(two_tone) = &self.two_tone_design {
            check("twoToneDesign.fillColorQuadrant0", &two_tone.fill_color_quadrant0)?;
            check("twoToneDesign.fillColorQuadrant3", &two_tone.fill_color_quadrant3)?;
            if let Some(unique) = &two_tone.unique_element_colors {
                check(
                    "uniqueElementColors.elementColorOverQuadrant0Fill",
                    &unique.element_color_over_quadrant0_fill,
                )?;
                check(
                    "uniqueElementColors.elementColorOverQuadrant3Fill",
                    &unique.element_color_over_quadrant3_fill,
                )?;
            }
        }

        for (i, quadrant) in self.quadrants.iter().enumerate() {
            quadrant
                .validate()
                .with_context(|| format!("Invalid quadrant {i}"))?;
        }

        Ok(())
    }

    /// Gets a quadrant by position.
    #[must_use]
    pub fn quadrant(&self, index: usize) -> Option<&Quadrant> {
        self.quadrants.get(index)
    }

    /// Gets a mutable quadrant by position.
    pub fn quadrant_mut(&mut self, index: usize) -> Option<&mut Quadrant> {
        self.quadrants.get_mut(index)
    }

    /// Color of the base artwork fill and stroke, and of the overlay stroke.
    #[must_use]
    pub const fn base_fragment_color(&self) -> HslColor {
        self.base_color
    }

    /// Resolves the disk fill behind a quadrant's element.
    ///
    /// Priority:
    /// 1. Quadrant not filled, or not fillable (index 1, 2, out of range): no fill
    /// 2. Two-tone fill for the quadrant
    /// 3. Base design shared fill
    ///
    /// # Examples
    ///
    /// ```
    /// use crestforge::models::DesignConfiguration;
    ///
    /// let design = DesignConfiguration::default();
    /// assert_eq!(
    ///     design.fill_color(0),
    ///     Some(design.base_design.fill_color_for_filled_quadrants)
    /// );
    /// assert_eq!(design.fill_color(1), None);
    /// ```
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Option<HslColor> {
        let slot = FillQuadrant::from_index(index)?;
        if !self.quadrants[slot.index()].is_filled {
            return None;
        }

        // 1. Two-tone fill
        if let Some(two_tone) = &self.two_tone_design {
            return Some(two_tone.fill(slot));
        }

        // 2. Shared fill (fallback)
        Some(self.base_design.fill_color_for_filled_quadrants)
    }

    /// Resolves the color of a quadrant's decorative element.
    ///
    /// Priority:
    /// 1. Unique element color (filled quadrant 0 or 3, two-tone and unique present)
    /// 2. Base design color over filled quadrants (quadrant filled)
    /// 3. Base design color over base
    ///
    /// Returns `None` only for an out-of-range index.
    #[must_use]
    pub fn element_color(&self, index: usize) -> Option<HslColor> {
        let quadrant = self.quadrants.get(index)?;

        if quadrant.is_filled {
            // 1. Unique element color
            let unique = FillQuadrant::from_index(index).and_then(|slot| {
                self.two_tone_design
                    .as_ref()
                    .and_then(|two_tone| two_tone.unique_element_colors.as_ref())
                    .map(|unique| unique.get(slot))
            });
            if let Some(color) = unique {
                return Some(color);
            }

            // 2. Color over filled quadrants
            return Some(self.base_design.element_color_over_filled_quadrants);
        }

        // 3. Color over base (fallback)
        Some(self.base_design.element_color_over_base)
    }
}
