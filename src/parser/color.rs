//! Parsing of CSS-style color strings into [`HslColor`].
//!
//! Accepted forms:
//! - `#rgb`, `#rrggbb`
//! - `rgb(r, g, b)`, `rgba(r, g, b, a)` (comma or space separated, alpha ignored)
//! - `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)` (`deg` suffix and missing `%` tolerated)
//! - common named colors (`white`, `navy`, `gold`, ...)
//!
//! Anything else yields `None`.

use crate::models::{HslColor, RgbColor};
use regex::Regex;
use std::sync::LazyLock;

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d+(?:\.\d+)?)\s*[,\s]\s*(\d+(?:\.\d+)?)\s*[,\s]\s*(\d+(?:\.\d+)?)\s*(?:[,/]\s*\d*(?:\.\d+)?%?\s*)?\)$",
    )
    .expect("rgb pattern is valid")
});

static HSL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^hsla?\(\s*(\d+(?:\.\d+)?)(?:deg)?\s*[,\s]\s*(\d+(?:\.\d+)?)%?\s*[,\s]\s*(\d+(?:\.\d+)?)%?\s*(?:[,/]\s*\d*(?:\.\d+)?%?\s*)?\)$",
    )
    .expect("hsl pattern is valid")
});

/// Parses a color string into HSL.
///
/// # Examples
///
/// ```
/// use crestforge::models::HslColor;
/// use crestforge::parser::parse_color_string;
///
/// assert_eq!(parse_color_string("#ff0000"), Some(HslColor::new(0.0, 100.0, 50.0)));
/// assert_eq!(parse_color_string("hsl(200, 50%, 40%)"), Some(HslColor::new(200.0, 50.0, 40.0)));
/// assert_eq!(parse_color_string("white"), Some(HslColor::WHITE));
/// assert_eq!(parse_color_string("not a color"), None);
/// ```
#[must_use]
pub fn parse_color_string(input: &str) -> Option<HslColor> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let parsed = if let Some(hex) = normalized.strip_prefix('#') {
        parse_hex(hex)
    } else if normalized.starts_with("rgb") {
        parse_rgb_function(&normalized)
    } else if normalized.starts_with("hsl") {
        parse_hsl_function(&normalized)
    } else {
        named_color(&normalized).map(HslColor::from_rgb)
    };

    if parsed.is_none() {
        tracing::debug!(input, "Unparsable color string");
    }

    parsed
}

fn parse_hex(hex: &str) -> Option<HslColor> {
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    RgbColor::from_hex(hex).ok().map(HslColor::from_rgb)
}

fn parse_rgb_function(input: &str) -> Option<HslColor> {
    let caps = RGB_PATTERN.captures(input)?;
    let channel = |i: usize| -> Option<u8> {
        let value: f64 = caps.get(i)?.as_str().parse().ok()?;
        if value > 255.0 {
            return None;
        }
        // Range checked above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = value.round() as u8;
        Some(channel)
    };
    Some(HslColor::from_rgb(RgbColor::new(channel(1)?, channel(2)?, channel(3)?)))
}

fn parse_hsl_function(input: &str) -> Option<HslColor> {
    let caps = HSL_PATTERN.captures(input)?;
    let number = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse().ok() };
    let color = HslColor::new(number(1)?, number(2)?, number(3)?);
    color.is_valid().then_some(color)
}

fn named_color(name: &str) -> Option<RgbColor> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "orange" => (255, 165, 0),
        "gold" => (255, 215, 0),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        "crimson" => (220, 20, 60),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "beige" => (245, 245, 220),
        "ivory" => (255, 255, 240),
        "khaki" => (240, 230, 140),
        "coral" => (255, 127, 80),
        "salmon" => (250, 128, 114),
        "tan" => (210, 180, 140),
        "turquoise" => (64, 224, 208),
        "darkgreen" => (0, 100, 0),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        "forestgreen" => (34, 139, 34),
        "royalblue" => (65, 105, 225),
        "skyblue" => (135, 206, 235),
        "steelblue" => (70, 130, 180),
        "goldenrod" => (218, 165, 32),
        "darkgoldenrod" => (184, 134, 11),
        "slategray" | "slategrey" => (112, 128, 144),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        _ => return None,
    };
    Some(RgbColor::new(r, g, b))
}
