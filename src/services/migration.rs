//! Upgrades persisted designs of older shapes to the current schema.
//!
//! Migration is an ordered list of independent rewrite rules over the raw JSON
//! value followed by a schema validation gate. Every rule is idempotent: it
//! only fires when the legacy shape is present and the current shape is not.

use crate::models::DesignConfiguration;
use anyhow::Result;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// A single structural rewrite.
#[derive(Debug, Clone, Copy)]
pub struct MigrationRule {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Applies the rewrite in place and reports whether anything changed
    pub apply: fn(&mut Value) -> bool,
}

/// Rewrite rules in the order they are applied.
pub const RULES: &[MigrationRule] = &[
    MigrationRule {
        name: "numeric-version-to-string",
        apply: stringify_version,
    },
    MigrationRule {
        name: "rename-base-design-colors",
        apply: rename_base_design_colors,
    },
    MigrationRule {
        name: "rename-element-offset",
        apply: rename_element_offset,
    },
    MigrationRule {
        name: "drop-obsolete-quadrant-fields",
        apply: drop_obsolete_quadrant_fields,
    },
    MigrationRule {
        name: "available-elements-to-ids",
        apply: available_elements_to_ids,
    },
];

/// How a migrated design was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Input already matched the current schema
    Current,
    /// Input was rewritten and then validated
    Migrated,
    /// Input could not be recovered; the built-in default was substituted
    FallbackToDefault,
}

/// Result of [`migrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// The adopted design
    pub design: DesignConfiguration,
    /// How it was obtained
    pub outcome: MigrationOutcome,
}

/// Applies every rule in order and returns the names of the rules that fired.
pub fn apply_rules(value: &mut Value) -> Vec<&'static str> {
    RULES
        .iter()
        .filter_map(|rule| {
            let changed = (rule.apply)(value);
            if changed {
                debug!(rule = rule.name, "Applied migration rule");
            }
            changed.then_some(rule.name)
        })
        .collect()
}

/// Rewrites a legacy value and validates it against the current schema.
///
/// Unlike [`migrate`] this never substitutes the default.
pub fn try_upgrade(mut value: Value) -> Result<DesignConfiguration> {
    apply_rules(&mut value);
    DesignConfiguration::from_value(value)
}

/// Migrates a persisted value of unknown shape into the current schema.
///
/// Never fails: unrecoverable input yields the built-in default design.
pub fn migrate(value: Value, storage_version: u32) -> Migration {
    info!(storage_version, "Migrating stored design");

    let value = match DesignConfiguration::from_value(value.clone()) {
        Ok(design) => {
            return Migration {
                design,
                outcome: MigrationOutcome::Current,
            }
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "Stored design failed validation, attempting migration");
            value
        }
    };

    match try_upgrade(value) {
        Ok(design) => {
            info!("Stored design validated after migration");
            Migration {
                design,
                outcome: MigrationOutcome::Migrated,
            }
        }
        Err(err) => {
            error!(
                error = %format!("{err:#}"),
                "Stored design still invalid after migration, falling back to default"
            );
            Migration {
                design: DesignConfiguration::default(),
                outcome: MigrationOutcome::FallbackToDefault,
            }
        }
    }
}

fn is_missing(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_none_or(Value::is_null)
}

fn is_present(object: &Map<String, Value>, key: &str) -> bool {
    !is_missing(object, key)
}

/// Moves `old` to `new` when `old` is set and `new` is not.
fn rename_field(object: &mut Map<String, Value>, old: &str, new: &str) -> bool {
    if is_present(object, old) && is_missing(object, new) {
        if let Some(value) = object.remove(old) {
            object.insert(new.to_string(), value);
            return true;
        }
    }
    false
}

/// `version: 1` (number) becomes `version: "1"`.
fn stringify_version(value: &mut Value) -> bool {
    let Some(Value::Number(number)) = value.get("version") else {
        return false;
    };
    let version = Value::String(number.to_string());
    if let Some(object) = value.as_object_mut() {
        object.insert("version".to_string(), version);
    }
    true
}

/// `elementColorOverGold` / `elementColorOverFill` in the base design.
fn rename_base_design_colors(value: &mut Value) -> bool {
    let Some(base) = value.get_mut("baseDesign").and_then(Value::as_object_mut) else {
        return false;
    };
    let over_base = rename_field(base, "elementColorOverGold", "elementColorOverBase");
    let over_filled = rename_field(
        base,
        "elementColorOverFill",
        "elementColorOverFilledQuadrants",
    );
    over_base || over_filled
}

fn quadrant_objects(value: &mut Value) -> impl Iterator<Item = (usize, &mut Map<String, Value>)> {
    value
        .get_mut("quadrants")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, quadrant)| quadrant.as_object_mut().map(|object| (i, object)))
}

/// `elementOffset` becomes `centerOffset` on every quadrant.
fn rename_element_offset(value: &mut Value) -> bool {
    let mut changed = false;
    for (position, quadrant) in quadrant_objects(value) {
        if rename_field(quadrant, "elementOffset", "centerOffset") {
            debug!(position, "Renamed elementOffset to centerOffset");
            changed = true;
        }
    }
    changed
}

/// Removes `quadrantCenter` and `position`; the array index is the position.
fn drop_obsolete_quadrant_fields(value: &mut Value) -> bool {
    let mut changed = false;
    for (position, quadrant) in quadrant_objects(value) {
        for key in ["quadrantCenter", "position"] {
            if quadrant.remove(key).is_some() {
                debug!(position, field = key, "Removed obsolete quadrant field");
                changed = true;
            }
        }
    }
    changed
}

/// Element descriptor objects become their identifiers.
fn available_elements_to_ids(value: &mut Value) -> bool {
    let Some(elements) = value
        .get_mut("availableElements")
        .and_then(Value::as_array_mut)
    else {
        return false;
    };

    let is_legacy = elements
        .first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("id"));
    if !is_legacy {
        return false;
    }

    for element in elements.iter_mut() {
        if let Some(id) = element.get("id").cloned() {
            *element = id;
        }
    }
    true
}
