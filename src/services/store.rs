//! Current design plus the shadow copies of disabled color tiers.
//!
//! Every command is a small old-to-new transform. Precondition violations are
//! logged as warnings and leave the design untouched; only [`DesignStore::import_json`]
//! reports failure to the caller.

use crate::constants::FORMAT_VERSION;
use crate::models::{
    DesignConfiguration, FillQuadrant, HslColor, Offset, Quadrant, TwoToneDesign,
    UniqueElementColors,
};
use crate::services::migration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Last values of disabled tiers, restored when the tier is re-enabled.
///
/// Never part of the exported design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowTable {
    /// Tier 2 as it was when last disabled (tier 3 nested)
    #[serde(rename = "twoToneDesignCopy", default)]
    pub two_tone: Option<TwoToneDesign>,
    /// Tier 3 as it was when last disabled
    #[serde(rename = "uniqueElementColorsCopy", default)]
    pub unique: Option<UniqueElementColors>,
}

impl ShadowTable {
    /// Forgets every stored tier.
    pub fn clear(&mut self) {
        self.two_tone = None;
        self.unique = None;
    }

    /// Returns true when no tier is remembered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.two_tone.is_none() && self.unique.is_none()
    }

    /// Drops remembered tiers holding out-of-range colors.
    ///
    /// Restoring such a copy would make the live design fail validation.
    pub fn discard_invalid(&mut self) {
        if self.two_tone.is_some_and(|copy| !copy.is_valid()) {
            warn!("Discarding out-of-range two-tone copy");
            self.two_tone = None;
        }
        if self.unique.is_some_and(|copy| !copy.is_valid()) {
            warn!("Discarding out-of-range unique element colors copy");
            self.unique = None;
        }
    }
}

/// The single mutable design cell with its shadow side-table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignStore {
    design: DesignConfiguration,
    shadow: ShadowTable,
}

impl DesignStore {
    /// Wraps a design with an empty shadow table.
    #[must_use]
    pub fn new(design: DesignConfiguration) -> Self {
        Self {
            design,
            shadow: ShadowTable::default(),
        }
    }

    /// Wraps a design together with previously remembered tiers.
    #[must_use]
    pub const fn with_shadow(design: DesignConfiguration, shadow: ShadowTable) -> Self {
        Self { design, shadow }
    }

    /// Current design.
    #[must_use]
    pub const fn design(&self) -> &DesignConfiguration {
        &self.design
    }

    /// Remembered tiers.
    #[must_use]
    pub const fn shadow(&self) -> &ShadowTable {
        &self.shadow
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Disk fill of a quadrant, `None` when there is no fill.
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Option<HslColor> {
        self.design.fill_color(index)
    }

    /// Color of a quadrant's decorative element.
    #[must_use]
    pub fn element_color(&self, index: usize) -> Option<HslColor> {
        self.design.element_color(index)
    }

    /// Color of the base artwork and the overlay stroke.
    #[must_use]
    pub const fn base_fragment_color(&self) -> HslColor {
        self.design.base_fragment_color()
    }

    // ------------------------------------------------------------------
    // Name and base colors
    // ------------------------------------------------------------------

    /// Renames the design.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(%name, "Setting design name");
        self.design.name = name;
    }

    /// Sets the base artwork color.
    pub fn set_base_color(&mut self, color: HslColor) {
        debug!(%color, "Setting base color");
        self.design.base_color = color;
    }

    /// Sets the shared fill for filled quadrants.
    pub fn set_base_fill_color(&mut self, color: HslColor) {
        debug!(%color, "Setting base fill color");
        self.design.base_design.fill_color_for_filled_quadrants = color;
    }

    /// Sets the element color used over the base.
    pub fn set_element_color_over_base(&mut self, color: HslColor) {
        debug!(%color, "Setting element color over base");
        self.design.base_design.element_color_over_base = color;
    }

    /// Sets the element color used over filled quadrants.
    pub fn set_element_color_over_filled(&mut self, color: HslColor) {
        debug!(%color, "Setting element color over filled quadrants");
        self.design.base_design.element_color_over_filled_quadrants = color;
    }

    // ------------------------------------------------------------------
    // Quadrants
    // ------------------------------------------------------------------

    fn quadrant_mut_or_warn(&mut self, index: usize, action: &str) -> Option<&mut Quadrant> {
        let quadrant = self.design.quadrant_mut(index);
        if quadrant.is_none() {
            warn!(index, action, "Quadrant index out of range");
        }
        quadrant
    }

    /// Sets an element's scale, clamped to 0.5-2.0.
    pub fn set_element_scale(&mut self, index: usize, scale: f64) -> bool {
        let clamped = Quadrant::clamp_scale(scale);
        let Some(quadrant) = self.quadrant_mut_or_warn(index, "set_element_scale") else {
            return false;
        };
        debug!(index, requested = scale, applied = clamped, "Setting element scale");
        quadrant.element_scale = clamped;
        true
    }

    /// Moves an element relative to its quadrant anchor.
    pub fn set_center_offset(&mut self, index: usize, offset: Offset) -> bool {
        if !offset.x.is_finite() || !offset.y.is_finite() {
            warn!(index, ?offset, "Ignoring non-finite center offset");
            return false;
        }
        let Some(quadrant) = self.quadrant_mut_or_warn(index, "set_center_offset") else {
            return false;
        };
        debug!(index, ?offset, "Setting center offset");
        quadrant.center_offset = offset;
        true
    }

    /// Sets whether a quadrant shows a fill disk.
    pub fn set_filled(&mut self, index: usize, filled: bool) -> bool {
        let Some(quadrant) = self.quadrant_mut_or_warn(index, "set_filled") else {
            return false;
        };
        debug!(index, filled, "Setting quadrant fill flag");
        quadrant.is_filled = filled;
        true
    }

    /// Swaps the decorative elements of two quadrants; everything else stays.
    pub fn swap_elements(&mut self, from: usize, to: usize) -> bool {
        let len = self.design.quadrants.len();
        if from >= len || to >= len {
            warn!(from, to, "Cannot swap elements: quadrant index out of range");
            return false;
        }
        debug!(from, to, "Swapping elements");
        let from_element = self.design.quadrants[from].element_id;
        self.design.quadrants[from].element_id = self.design.quadrants[to].element_id;
        self.design.quadrants[to].element_id = from_element;
        true
    }

    /// Rearranges whole quadrants: new quadrant `k` is old quadrant `order[k]`.
    pub fn reorder_quadrants(&mut self, order: [usize; 4]) -> bool {
        let mut seen = [false; 4];
        for &index in &order {
            if index >= seen.len() || seen[index] {
                warn!(?order, "Cannot reorder quadrants: order is not a permutation");
                return false;
            }
            seen[index] = true;
        }
        debug!(?order, "Reordering quadrants");
        let old = self.design.quadrants;
        self.design.quadrants = order.map(|index| old[index]);
        true
    }

    // ------------------------------------------------------------------
    // Tier 2: two-tone fills
    // ------------------------------------------------------------------

    /// Turns on per-quadrant fills, restoring the last disabled values if any.
    pub fn enable_two_tone(&mut self) {
        if self.design.two_tone_design.is_some() {
            debug!("Two-tone mode already enabled");
            return;
        }

        if let Some(copy) = self.shadow.two_tone {
            debug!("Restoring two-tone design from copy");
            self.design.two_tone_design = Some(copy);
        } else {
            debug!("Initializing two-tone design from base fill");
            self.design.two_tone_design = Some(TwoToneDesign::uniform(
                self.design.base_design.fill_color_for_filled_quadrants,
            ));
        }
    }

    /// Turns off per-quadrant fills, remembering them (and nested unique colors).
    pub fn disable_two_tone(&mut self) {
        let Some(current) = self.design.two_tone_design.take() else {
            debug!("Two-tone mode already disabled");
            return;
        };

        debug!("Saving two-tone design to copy");
        self.shadow.two_tone = Some(current);
        if let Some(unique) = current.unique_element_colors {
            self.shadow.unique = Some(unique);
        }
    }

    /// Sets the two-tone fill of quadrant 0 or 3. Requires two-tone mode.
    pub fn set_two_tone_fill(&mut self, quadrant: FillQuadrant, color: HslColor) -> bool {
        let Some(two_tone) = self.design.two_tone_design.as_mut() else {
            warn!(
                quadrant = quadrant.index(),
                "Attempted to set two-tone fill color while two-tone mode is disabled"
            );
            return false;
        };
        debug!(quadrant = quadrant.index(), %color, "Setting two-tone fill color");
        two_tone.set_fill(quadrant, color);
        true
    }

    // ------------------------------------------------------------------
    // Tier 3: unique element colors
    // ------------------------------------------------------------------

    /// Turns on per-quadrant element colors. Requires two-tone mode.
    pub fn enable_unique_colors(&mut self) -> bool {
        let restored = self.shadow.unique;
        let fallback = self.design.base_design.element_color_over_filled_quadrants;
        let Some(two_tone) = self.design.two_tone_design.as_mut() else {
            warn!("Attempted to enable unique element colors while two-tone mode is disabled");
            return false;
        };

        if two_tone.unique_element_colors.is_some() {
            debug!("Unique element colors already enabled");
            return true;
        }

        if let Some(copy) = restored {
            debug!("Restoring unique element colors from copy");
            two_tone.unique_element_colors = Some(copy);
        } else {
            debug!("Initializing unique element colors from base");
            two_tone.unique_element_colors = Some(UniqueElementColors::uniform(fallback));
        }
        true
    }

    /// Turns off per-quadrant element colors, remembering them. Requires two-tone mode.
    pub fn disable_unique_colors(&mut self) -> bool {
        let Some(two_tone) = self.design.two_tone_design.as_mut() else {
            warn!("Attempted to disable unique element colors while two-tone mode is disabled");
            return false;
        };

        if let Some(unique) = two_tone.unique_element_colors.take() {
            debug!("Saving unique element colors to copy");
            self.shadow.unique = Some(unique);
        }
        true
    }

    /// Sets the unique element color over quadrant 0 or 3. Requires tier 3.
    pub fn set_unique_element_color(&mut self, quadrant: FillQuadrant, color: HslColor) -> bool {
        let unique = self
            .design
            .two_tone_design
            .as_mut()
            .and_then(|two_tone| two_tone.unique_element_colors.as_mut());
        let Some(unique) = unique else {
            warn!(
                quadrant = quadrant.index(),
                "Attempted to set unique element color while the feature is disabled"
            );
            return false;
        };
        debug!(quadrant = quadrant.index(), %color, "Setting unique element color");
        unique.set(quadrant, color);
        true
    }

    // ------------------------------------------------------------------
    // Export, import, reset
    // ------------------------------------------------------------------

    /// Serializes the current design (shadow copies excluded).
    pub fn export_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.design)
        } else {
            serde_json::to_string(&self.design)
        }
        .context("Failed to serialize design")?;

        info!(
            version = %self.design.version,
            name = %self.design.name,
            json_length = json.len(),
            "Design exported"
        );
        Ok(json)
    }

    /// Replaces the design with an imported one and forgets every shadow copy.
    ///
    /// The payload must carry `version`, `baseColor` and `quadrants`; legacy
    /// shapes are upgraded and the result validated. On any failure the
    /// current design is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        info!(json_length = json.len(), "Attempting to import design");

        match parse_import(json) {
            Ok(design) => {
                warn!(
                    version = %design.version,
                    name = %design.name,
                    "Importing design, replacing the current one"
                );
                self.design = design;
                self.shadow.clear();
                info!("Design imported successfully");
                Ok(())
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "Failed to import design");
                Err(err)
            }
        }
    }

    /// Restores the built-in default design and forgets every shadow copy.
    pub fn reset(&mut self) {
        warn!("Resetting to default design");
        self.design = DesignConfiguration::default();
        self.shadow.clear();
        info!("Reset to default design complete");
    }
}

const REQUIRED_IMPORT_FIELDS: [&str; 3] = ["version", "baseColor", "quadrants"];

/// Parses an exported design, upgrading older shapes.
pub(crate) fn parse_import(json: &str) -> Result<DesignConfiguration> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).context("Import is not valid JSON")?;

    let object = value
        .as_object()
        .context("Invalid design structure: expected a JSON object")?;
    let missing: Vec<&str> = REQUIRED_IMPORT_FIELDS
        .into_iter()
        .filter(|field| object.get(*field).is_none_or(serde_json::Value::is_null))
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "Invalid design structure: missing required fields: {}",
            missing.join(", ")
        );
    }

    let blank_version = value
        .get("version")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|version| version.trim().is_empty());
    if blank_version {
        debug!(version = FORMAT_VERSION, "Stamping blank import version");
        value["version"] = serde_json::Value::from(FORMAT_VERSION);
    }

    migration::try_upgrade(value).context("Imported design is invalid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementId;

    const RED: HslColor = HslColor::new(0.0, 90.0, 45.0);
    const GREEN: HslColor = HslColor::new(120.0, 60.0, 35.0);

    #[test]
    fn test_two_tone_memory() {
        let mut store = DesignStore::default();
        store.enable_two_tone();
        assert!(store.set_two_tone_fill(FillQuadrant::First, RED));
        store.disable_two_tone();
        assert_eq!(store.design().two_tone_design, None);
        assert_eq!(
            store.fill_color(0),
            Some(store.design().base_design.fill_color_for_filled_quadrants)
        );

        store.enable_two_tone();
        assert_eq!(store.fill_color(0), Some(RED));
    }

    #[test]
    fn test_enable_two_tone_initializes_from_base_fill() {
        let mut store = DesignStore::default();
        let shared = store.design().base_design.fill_color_for_filled_quadrants;
        store.enable_two_tone();
        let two_tone = store.design().two_tone_design.unwrap();
        assert_eq!(two_tone.fill_color_quadrant0, shared);
        assert_eq!(two_tone.fill_color_quadrant3, shared);
        assert_eq!(two_tone.unique_element_colors, None);
    }

    #[test]
    fn test_enable_two_tone_twice_keeps_edits() {
        let mut store = DesignStore::default();
        store.enable_two_tone();
        store.set_two_tone_fill(FillQuadrant::Last, GREEN);
        store.enable_two_tone();
        assert_eq!(store.fill_color(3), Some(GREEN));
    }

    #[test]
    fn test_unique_requires_two_tone() {
        let mut store = DesignStore::default();
        let before = store.clone();
        assert!(!store.enable_unique_colors());
        assert!(!store.disable_unique_colors());
        assert!(!store.set_unique_element_color(FillQuadrant::First, RED));
        assert!(!store.set_two_tone_fill(FillQuadrant::First, RED));
        assert_eq!(store, before);
    }

    #[test]
    fn test_unique_memory_and_initialization() {
        let mut store = DesignStore::default();
        store.enable_two_tone();
        assert!(store.enable_unique_colors());

        let over_filled = store.design().base_design.element_color_over_filled_quadrants;
        assert_eq!(store.element_color(0), Some(over_filled));

        assert!(store.set_unique_element_color(FillQuadrant::Last, GREEN));
        assert_eq!(store.element_color(3), Some(GREEN));

        assert!(store.disable_unique_colors());
        assert_eq!(store.element_color(3), Some(over_filled));

        assert!(store.enable_unique_colors());
        assert_eq!(store.element_color(3), Some(GREEN));
    }

    #[test]
    fn test_disable_two_tone_keeps_nested_unique() {
        let mut store = DesignStore::default();
        store.enable_two_tone();
        store.enable_unique_colors();
        store.set_unique_element_color(FillQuadrant::First, RED);

        store.disable_two_tone();
        assert_eq!(
            store.shadow().unique.map(|u| u.element_color_over_quadrant0_fill),
            Some(RED)
        );

        store.enable_two_tone();
        assert_eq!(store.element_color(0), Some(RED));
    }

    #[test]
    fn test_swap_elements() {
        let mut store = DesignStore::default();
        assert!(store.swap_elements(0, 2));
        assert_eq!(store.design().quadrants[0].element_id, ElementId::Dollar);
        assert_eq!(store.design().quadrants[2].element_id, ElementId::Briefcase);
        // Fill flags stay with the position
        assert!(store.design().quadrants[0].is_filled);
        assert!(!store.design().quadrants[2].is_filled);

        assert!(!store.swap_elements(0, 4));
    }

    #[test]
    fn test_reorder_quadrants() {
        let mut store = DesignStore::default();
        assert!(store.reorder_quadrants([3, 2, 1, 0]));
        assert_eq!(store.design().quadrants[0].element_id, ElementId::Leaf);
        assert_eq!(store.design().quadrants[3].element_id, ElementId::Briefcase);

        let before = store.clone();
        assert!(!store.reorder_quadrants([0, 0, 1, 2]));
        assert!(!store.reorder_quadrants([0, 1, 2, 9]));
        assert_eq!(store, before);
    }

    #[test]
    fn test_scale_offset_and_filled() {
        let mut store = DesignStore::default();
        assert!(store.set_element_scale(1, 5.0));
        assert!((store.design().quadrants[1].element_scale - 2.0).abs() < f64::EPSILON);
        assert!(store.set_element_scale(1, 0.0));
        assert!((store.design().quadrants[1].element_scale - 0.5).abs() < f64::EPSILON);
        assert!(!store.set_element_scale(9, 1.0));

        assert!(store.set_center_offset(2, Offset::new(-4.5, 12.0)));
        assert_eq!(store.design().quadrants[2].center_offset, Offset::new(-4.5, 12.0));
        assert!(!store.set_center_offset(2, Offset::new(f64::NAN, 0.0)));

        assert!(store.set_filled(0, false));
        assert_eq!(store.fill_color(0), None);
    }

    #[test]
    fn test_export_excludes_shadow() {
        let mut store = DesignStore::default();
        store.enable_two_tone();
        store.disable_two_tone();
        let json = store.export_json(true).unwrap();
        assert!(!json.contains("Copy"));
        assert!(json.contains("\"twoToneDesign\": null"));
    }

    #[test]
    fn test_import_failure_leaves_state_unchanged() {
        let mut store = DesignStore::default();
        store.set_base_color(RED);
        store.enable_two_tone();
        store.disable_two_tone();
        let before = store.clone();

        assert!(store.import_json(r#"{"name":"x"}"#).is_err());
        assert!(store.import_json("not json").is_err());
        assert!(store.import_json("[1, 2]").is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_invalid_values_leaves_state_unchanged() {
        let mut store = DesignStore::default();
        let mut value = serde_json::to_value(DesignConfiguration::default()).unwrap();
        value["baseColor"]["h"] = serde_json::json!(999);
        let before = store.clone();
        assert!(store.import_json(&value.to_string()).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_replaces_design_and_clears_shadow() {
        let mut source = DesignStore::default();
        source.set_name("Imported");
        source.set_base_color(GREEN);
        let json = source.export_json(false).unwrap();

        let mut store = DesignStore::default();
        store.enable_two_tone();
        store.disable_two_tone();
        assert!(!store.shadow().is_empty());

        store.import_json(&json).unwrap();
        assert_eq!(store.design().name, "Imported");
        assert_eq!(store.design().base_color, GREEN);
        assert!(store.shadow().is_empty());
    }

    #[test]
    fn test_import_upgrades_legacy_payload() {
        let mut value = serde_json::to_value(DesignConfiguration::default()).unwrap();
        let base = value["baseDesign"].as_object_mut().unwrap();
        let over_base = base.remove("elementColorOverBase").unwrap();
        base.insert("elementColorOverGold".to_string(), over_base);

        let mut store = DesignStore::default();
        store.import_json(&value.to_string()).unwrap();
        assert_eq!(
            store.design().base_design.element_color_over_base,
            HslColor::WHITE
        );
    }

    #[test]
    fn test_import_stamps_blank_version() {
        let mut value = serde_json::to_value(DesignConfiguration::default()).unwrap();
        value["version"] = serde_json::json!("  ");

        let mut store = DesignStore::default();
        store.import_json(&value.to_string()).unwrap();
        assert_eq!(store.design().version, FORMAT_VERSION);
    }

    #[test]
    fn test_discard_invalid_shadow_copies() {
        let mut shadow = ShadowTable {
            two_tone: Some(TwoToneDesign::uniform(HslColor::new(999.0, 500.0, -5.0))),
            unique: Some(UniqueElementColors::uniform(RED)),
        };
        shadow.discard_invalid();
        assert!(shadow.two_tone.is_none());
        assert_eq!(shadow.unique, Some(UniqueElementColors::uniform(RED)));

        let mut nested = TwoToneDesign::uniform(GREEN);
        nested.unique_element_colors =
            Some(UniqueElementColors::uniform(HslColor::new(0.0, 0.0, 101.0)));
        let mut shadow = ShadowTable {
            two_tone: Some(nested),
            unique: Some(UniqueElementColors::uniform(HslColor::new(-1.0, 0.0, 0.0))),
        };
        shadow.discard_invalid();
        assert!(shadow.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut store = DesignStore::default();
        store.set_base_color(RED);
        store.enable_two_tone();
        store.disable_two_tone();
        store.reset();
        assert_eq!(store, DesignStore::default());
    }
}
