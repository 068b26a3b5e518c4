//! HSL color value, the canonical color representation of a design.

// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Allow float comparisons in the HSL conversion (standard algorithm)
#![allow(clippy::float_cmp)]

use crate::models::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum hue in degrees.
pub const MAX_HUE: f64 = 360.0;
/// Maximum saturation / lightness in percent.
pub const MAX_PERCENT: f64 = 100.0;

/// Color expressed as hue, saturation and lightness.
///
/// - `h`: hue in degrees (0-360)
/// - `s`: saturation in percent (0-100)
/// - `l`: lightness in percent (0-100)
///
/// This is the only color form that is ever persisted. RGB, hex and CSS strings
/// are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    /// Hue in degrees (0-360)
    pub h: f64,
    /// Saturation in percent (0-100)
    pub s: f64,
    /// Lightness in percent (0-100)
    pub l: f64,
}

impl HslColor {
    /// Creates a new `HslColor` without range checks.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Pure white.
    pub const WHITE: Self = Self::new(0.0, 0.0, 100.0);

    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Returns true when every channel is finite and inside its range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let in_range = |value: f64, max: f64| value.is_finite() && (0.0..=max).contains(&value);
        in_range(self.h, MAX_HUE) && in_range(self.s, MAX_PERCENT) && in_range(self.l, MAX_PERCENT)
    }

    /// Converts to 8-bit RGB.
    ///
    /// # Examples
    ///
    /// ```
    /// use crestforge::models::{HslColor, RgbColor};
    ///
    /// assert_eq!(HslColor::new(0.0, 100.0, 50.0).to_rgb(), RgbColor::new(255, 0, 0));
    /// assert_eq!(HslColor::new(0.0, 0.0, 100.0).to_rgb(), RgbColor::new(255, 255, 255));
    /// ```
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        let lightness = self.l / 100.0;
        let a = self.s * lightness.min(1.0 - lightness) / 100.0;

        let channel = |n: f64| -> u8 {
            let k = (n + self.h / 30.0) % 12.0;
            let value = lightness - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (255.0 * value).round().clamp(0.0, 255.0) as u8
        };

        RgbColor::new(channel(0.0), channel(8.0), channel(4.0))
    }

    /// Creates an `HslColor` from 8-bit RGB, rounding every channel to a whole number.
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HSL color model uses single-char names
    pub fn from_rgb(rgb: RgbColor) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0) // Achromatic, hue is undefined
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        Self {
            h: (h * 360.0).round(),
            s: (s * 100.0).round(),
            l: (l * 100.0).round(),
        }
    }

    /// Converts to a lowercase `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }

    /// Parses a `#rrggbb` / `#rgb` hex string.
    ///
    /// Returns `None` when the string is not a hex color.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        RgbColor::from_hex(hex).ok().map(Self::from_rgb)
    }

    /// Formats as a CSS `hsl()` function, e.g. `hsl(200, 50%, 50%)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// Returns a copy with lightness shifted by `amount`, clamped to 0-100.
    #[must_use]
    pub fn adjust_lightness(&self, amount: f64) -> Self {
        Self {
            l: (self.l + amount).clamp(0.0, MAX_PERCENT),
            ..*self
        }
    }

    /// Returns a copy with saturation shifted by `amount`, clamped to 0-100.
    #[must_use]
    pub fn adjust_saturation(&self, amount: f64) -> Self {
        Self {
            s: (self.s + amount).clamp(0.0, MAX_PERCENT),
            ..*self
        }
    }

    /// A color counts as light when its lightness is above 50%.
    #[must_use]
    pub fn is_light(&self) -> bool {
        self.l > 50.0
    }

    /// Black or white hex text color readable on top of this color.
    #[must_use]
    pub fn contrast_text_hex(&self) -> &'static str {
        if self.is_light() {
            "#000000"
        } else {
            "#ffffff"
        }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}
