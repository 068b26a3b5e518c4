//! Category-aware recoloring of vector artwork fragments.
//!
//! Fragments are parsed into a [`MarkupElement`] tree, colors are written into
//! `fill` / `stroke` attributes and the matching inline `style` declarations,
//! and the tree is serialized again. The input string is never modified; on
//! malformed markup it is returned unchanged.

use crate::models::HslColor;
use crate::parser::{parse_fragment, MarkupElement};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Semantic role of an artwork fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentCategory {
    /// Shield/laurel base: fill and stroke
    Base,
    /// Overlay motif: stroke only, fills stay as drawn
    Overlay,
    /// Quadrant disk: fill only
    QuadrantFill,
    /// Decorative element: text fill or path fill, bounding boxes untouched
    DecorativeElement,
}

impl FragmentCategory {
    /// All categories.
    pub const ALL: [Self; 4] = [
        Self::Base,
        Self::Overlay,
        Self::QuadrantFill,
        Self::DecorativeElement,
    ];

    /// Stable identifier (kebab-case).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Overlay => "overlay",
            Self::QuadrantFill => "quadrant-fill",
            Self::DecorativeElement => "decorative-element",
        }
    }
}

impl fmt::Display for FragmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown fragment category '{s}'. Expected one of: {}",
                    Self::ALL.map(|category| category.as_str()).join(", ")
                )
            })
    }
}

/// Colors to substitute; each is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorTargets {
    /// Fill color
    pub fill: Option<HslColor>,
    /// Stroke color
    pub stroke: Option<HslColor>,
    /// Fill color for text elements
    pub text_fill: Option<HslColor>,
}

impl ColorTargets {
    /// Only a fill color.
    #[must_use]
    pub const fn fill(color: HslColor) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            text_fill: None,
        }
    }
}

/// Recolors a fragment according to its category.
///
/// # Examples
///
/// ```
/// use crestforge::models::HslColor;
/// use crestforge::services::recolor::{recolor_fragment, ColorTargets, FragmentCategory};
///
/// let out = recolor_fragment(
///     r##"<g><path fill="#000000"/><rect style="fill:none"/></g>"##,
///     FragmentCategory::DecorativeElement,
///     &ColorTargets::fill(HslColor::new(200.0, 50.0, 50.0)),
/// );
/// assert_eq!(out, r#"<g><path fill="hsl(200, 50%, 50%)"/><rect style="fill:none"/></g>"#);
/// ```
#[must_use]
pub fn recolor_fragment(markup: &str, category: FragmentCategory, targets: &ColorTargets) -> String {
    match try_recolor(markup, category, targets) {
        Ok(recolored) => recolored,
        Err(err) => {
            warn!(%category, error = %format!("{err:#}"), "Markup parsing error, returning fragment unchanged");
            markup.to_string()
        }
    }
}

fn try_recolor(markup: &str, category: FragmentCategory, targets: &ColorTargets) -> Result<String> {
    let mut root = parse_fragment(markup)?;
    let mut changed = 0usize;

    match category {
        FragmentCategory::Base => {
            if let Some(fill) = targets.fill {
                root.walk_mut(|el| changed += usize::from(paint(el, Paint::Fill, fill)));
            }
            if let Some(stroke) = targets.stroke {
                root.walk_mut(|el| changed += usize::from(paint(el, Paint::Stroke, stroke)));
            }
        }
        FragmentCategory::Overlay => {
            if let Some(stroke) = targets.stroke {
                root.walk_mut(|el| changed += usize::from(paint(el, Paint::Stroke, stroke)));
            }
        }
        FragmentCategory::QuadrantFill => {
            if let Some(fill) = targets.fill {
                root.walk_mut(|el| changed += usize::from(paint(el, Paint::Fill, fill)));
            }
        }
        FragmentCategory::DecorativeElement => {
            let has_text = root.find(|el| el.is("text")).is_some();
            match (has_text, targets.text_fill, targets.fill) {
                (true, Some(text_fill), _) => {
                    root.walk_mut(|el| {
                        if el.is("text") {
                            paint_text(el, text_fill);
                            changed += 1;
                        }
                    });
                }
                (_, _, Some(fill)) => {
                    root.walk_mut(|el| {
                        if !is_invisible_guide(el) {
                            changed += usize::from(paint(el, Paint::Fill, fill));
                        }
                    });
                }
                _ => {}
            }
        }
    }

    debug!(%category, changed, "Recolored fragment");
    root.to_markup()
}

#[derive(Debug, Clone, Copy)]
enum Paint {
    Fill,
    Stroke,
}

impl Paint {
    const fn property(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }
}

fn is_none(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}

/// Writes the color into the attribute and the inline style when they are set and not `none`.
fn paint(el: &mut MarkupElement, kind: Paint, color: HslColor) -> bool {
    let property = kind.property();
    let css = color.to_css();
    let mut changed = false;

    let attribute_set = el
        .attribute(property)
        .is_some_and(|value| !value.trim().is_empty() && !is_none(value));
    if attribute_set {
        el.set_attribute(property, css.as_str());
        changed = true;
    }

    if let Some(style) = el.attribute("style") {
        if let Some(rewritten) = rewrite_style(style, property, &css) {
            el.set_attribute("style", rewritten);
            changed = true;
        }
    }

    changed
}

/// Text elements always receive the fill attribute.
fn paint_text(el: &mut MarkupElement, color: HslColor) {
    let css = color.to_css();
    el.set_attribute("fill", css.as_str());
    if let Some(style) = el.attribute("style") {
        if let Some(rewritten) = rewrite_style(style, "fill", &css) {
            el.set_attribute("style", rewritten);
        }
    }
}

/// Rectangles whose inline style declares `fill: none` are invisible guides.
fn is_invisible_guide(el: &MarkupElement) -> bool {
    el.is("rect")
        && el
            .attribute("style")
            .is_some_and(|style| style_declaration(style, "fill").is_some_and(is_none))
}

fn split_declaration(declaration: &str) -> Option<(&str, &str)> {
    let (name, value) = declaration.split_once(':')?;
    Some((name, value))
}

/// Value of a style property, if declared.
fn style_declaration<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(split_declaration)
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value)
}

/// Replaces every non-`none` value of `property`; `None` when nothing changed.
fn rewrite_style(style: &str, property: &str, css: &str) -> Option<String> {
    let mut changed = false;
    let declarations: Vec<String> = style
        .split(';')
        .map(|declaration| match split_declaration(declaration) {
            Some((name, value))
                if name.trim().eq_ignore_ascii_case(property) && !is_none(value) =>
            {
                changed = true;
                format!("{name}: {css}")
            }
            _ => declaration.to_string(),
        })
        .collect();

    changed.then(|| declarations.join(";"))
}
