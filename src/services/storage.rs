//! Persistence of the current design in the data directory.
//!
//! The file holds a versioned envelope:
//!
//! ```json
//! { "version": 2, "state": { "...design fields", "twoToneDesignCopy": null, "uniqueElementColorsCopy": null } }
//! ```

use crate::constants::{STORAGE_FILE_NAME, STORAGE_VERSION};
use crate::models::DesignConfiguration;
use crate::services::migration::{self, MigrationOutcome};
use crate::services::store::{DesignStore, ShadowTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Serialize)]
struct PersistedState<'a> {
    #[serde(flatten)]
    design: &'a DesignConfiguration,
    #[serde(flatten)]
    shadow: &'a ShadowTable,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    state: PersistedState<'a>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    version: u32,
    state: Value,
}

/// Loads and saves the current design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignStorage {
    path: PathBuf,
}

impl DesignStorage {
    /// Storage rooted in the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORAGE_FILE_NAME),
        }
    }

    /// Full path of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a design has been saved before.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the stored design, migrating older shapes.
    ///
    /// A missing file yields the default design. A file that is not valid JSON,
    /// or whose design cannot be recovered, also yields the default design and
    /// logs an error. Shadow copies are restored only when the design itself
    /// was recovered.
    pub fn load(&self) -> Result<DesignStore> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No stored design, using default");
            return Ok(DesignStore::default());
        }

        info!(path = %self.path.display(), "Rehydrating stored design");
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read design storage: {}", self.path.display()))?;

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "Stored design is not valid JSON, using default");
                return Ok(DesignStore::default());
            }
        };

        Ok(Self::rehydrate(value))
    }

    fn rehydrate(value: Value) -> DesignStore {
        let (version, state) = if value.get("state").is_some() {
            match serde_json::from_value::<RawEnvelope>(value) {
                Ok(envelope) => (envelope.version, envelope.state),
                Err(err) => {
                    error!(error = %err, "Malformed storage envelope, using default");
                    return DesignStore::default();
                }
            }
        } else {
            // Bare design without envelope
            (0, value)
        };

        let mut shadow = match serde_json::from_value::<ShadowTable>(state.clone()) {
            Ok(shadow) => shadow,
            Err(err) => {
                warn!(error = %err, "Discarding unreadable shadow copies");
                ShadowTable::default()
            }
        };
        shadow.discard_invalid();

        let migration = migration::migrate(state, version);
        let store = if migration.outcome == MigrationOutcome::FallbackToDefault {
            DesignStore::new(migration.design)
        } else {
            DesignStore::with_shadow(migration.design, shadow)
        };

        info!(
            name = %store.design().name,
            version = %store.design().version,
            outcome = ?migration.outcome,
            remembered_tiers = !store.shadow().is_empty(),
            "Stored design rehydrated"
        );
        store
    }

    /// Saves the design and its shadow copies.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self, store: &DesignStore) -> Result<()> {
        let envelope = Envelope {
            version: STORAGE_VERSION,
            state: PersistedState {
                design: store.design(),
                shadow: store.shadow(),
            },
        };
        let content =
            serde_json::to_string_pretty(&envelope).context("Failed to serialize design storage")?;

        write_atomic(&self.path, &content)?;
        debug!(path = %self.path.display(), "Design saved");
        Ok(())
    }
}

/// Writes a file through a temp file + rename so it is never left half-written.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create data directory: {}", parent.display())
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}
