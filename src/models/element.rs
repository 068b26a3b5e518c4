//! Registry of decorative elements that can be placed in a quadrant.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a decorative element.
///
/// The set is closed: every identifier corresponds to one artwork fragment owned
/// by the renderer. Identifiers are stable across storage versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementId {
    /// Briefcase pictogram
    Briefcase,
    /// Mountain range silhouette
    Mountains,
    /// Currency glyph (rendered as a text element)
    Dollar,
    /// Grape leaf
    Leaf,
}

impl ElementId {
    /// All elements in registry order.
    pub const ALL: [Self; 4] = [Self::Briefcase, Self::Mountains, Self::Dollar, Self::Leaf];

    /// Stable identifier used in storage and artwork lookups.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Briefcase => "briefcase",
            Self::Mountains => "mountains",
            Self::Dollar => "dollar",
            Self::Leaf => "leaf",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Briefcase => "Briefcase",
            Self::Mountains => "Sierra Nevada",
            Self::Dollar => "Dollar Sign",
            Self::Leaf => "Grape Leaf",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown element '{s}'. Expected one of: {}",
                    Self::ALL.map(|id| id.as_str()).join(", ")
                )
            })
    }
}
