//! Locally persisted gallery of saved designs.

use crate::constants::{GALLERY_FILE_NAME, GALLERY_VERSION, IMPORTED_DESIGN_NAME};
use crate::models::DesignConfiguration;
use crate::services::migration;
use crate::services::storage::write_atomic;
use crate::services::store::parse_import;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A design snapshot kept in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// When the entry was created
    pub timestamp: DateTime<Utc>,
    /// Full design snapshot
    pub state: DesignConfiguration,
    /// Marked as favorite
    pub is_favorite: bool,
    /// Shipped with the application rather than saved by the user
    pub is_system_preset: bool,
}

impl SavedDesign {
    fn new(name: impl Into<String>, state: DesignConfiguration) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            timestamp: Utc::now(),
            state,
            is_favorite: false,
            is_system_preset: false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GalleryFile<'a> {
    version: u32,
    designs: &'a [SavedDesign],
    active_design_id: Option<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGalleryFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    designs: Vec<RawSavedDesign>,
    #[serde(default)]
    active_design_id: Option<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSavedDesign {
    id: Uuid,
    name: String,
    timestamp: DateTime<Utc>,
    state: Value,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default)]
    is_system_preset: bool,
}

/// Saved designs plus the id of the one last loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    path: PathBuf,
    designs: Vec<SavedDesign>,
    active_design_id: Option<Uuid>,
}

impl Gallery {
    /// Empty gallery stored in the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(GALLERY_FILE_NAME),
            designs: Vec::new(),
            active_design_id: None,
        }
    }

    /// Opens the gallery stored in the given data directory.
    ///
    /// A missing file yields an empty gallery. Entries whose design cannot
    /// be upgraded to the current schema are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a gallery.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let mut gallery = Self::new(data_dir);
        if !gallery.path.exists() {
            debug!(path = %gallery.path.display(), "No gallery file, starting empty");
            return Ok(gallery);
        }

        let content = fs::read_to_string(&gallery.path)
            .with_context(|| format!("Failed to read gallery: {}", gallery.path.display()))?;
        let raw: RawGalleryFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse gallery: {}", gallery.path.display()))?;

        if raw.version > GALLERY_VERSION {
            warn!(
                version = raw.version,
                supported = GALLERY_VERSION,
                "Gallery was written by a newer version"
            );
        }

        for entry in raw.designs {
            match migration::try_upgrade(entry.state) {
                Ok(state) => gallery.designs.push(SavedDesign {
                    id: entry.id,
                    name: entry.name,
                    timestamp: entry.timestamp,
                    state,
                    is_favorite: entry.is_favorite,
                    is_system_preset: entry.is_system_preset,
                }),
                Err(err) => {
                    warn!(id = %entry.id, name = %entry.name, error = %format!("{err:#}"), "Skipping unreadable gallery entry");
                }
            }
        }

        gallery.active_design_id = raw
            .active_design_id
            .filter(|id| gallery.get(*id).is_some());

        info!(count = gallery.designs.len(), "Gallery loaded");
        Ok(gallery)
    }

    /// Writes the gallery back to disk.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        let file = GalleryFile {
            version: GALLERY_VERSION,
            designs: &self.designs,
            active_design_id: self.active_design_id,
        };
        let content =
            serde_json::to_string_pretty(&file).context("Failed to serialize gallery")?;
        write_atomic(&self.path, &content)?;
        debug!(path = %self.path.display(), "Gallery saved");
        Ok(())
    }

    /// Full path of the gallery file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved designs in insertion order.
    #[must_use]
    pub fn designs(&self) -> &[SavedDesign] {
        &self.designs
    }

    /// Id of the design last saved, loaded or imported.
    #[must_use]
    pub const fn active_design_id(&self) -> Option<Uuid> {
        self.active_design_id
    }

    /// Looks up a design by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&SavedDesign> {
        self.designs.iter().find(|design| design.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut SavedDesign> {
        self.designs.iter_mut().find(|design| design.id == id)
    }

    /// Resolves a user-supplied key: a full id, or else the first design with that exact name.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<Uuid> {
        if let Ok(id) = Uuid::parse_str(key) {
            return self.get(id).map(|design| design.id);
        }
        self.designs
            .iter()
            .find(|design| design.name == key)
            .map(|design| design.id)
    }

    /// Adds a snapshot and makes it the active design.
    pub fn save_design(&mut self, name: impl Into<String>, state: DesignConfiguration) -> Uuid {
        let design = SavedDesign::new(name, state);
        let id = design.id;
        info!(%id, name = %design.name, "Design saved to gallery");
        self.designs.push(design);
        self.active_design_id = Some(id);
        id
    }

    /// Returns a copy of the snapshot and makes it the active design.
    pub fn load_design(&mut self, id: Uuid) -> Option<DesignConfiguration> {
        let state = self.get(id)?.state.clone();
        self.active_design_id = Some(id);
        info!(%id, "Design loaded from gallery");
        Some(state)
    }

    /// Removes a design, clearing the active id if it pointed at it.
    pub fn delete_design(&mut self, id: Uuid) -> bool {
        let before = self.designs.len();
        self.designs.retain(|design| design.id != id);
        if self.active_design_id == Some(id) {
            self.active_design_id = None;
        }
        let removed = self.designs.len() != before;
        if removed {
            info!(%id, "Design deleted from gallery");
        }
        removed
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Option<bool> {
        let design = self.get_mut(id)?;
        design.is_favorite = !design.is_favorite;
        Some(design.is_favorite)
    }

    /// Copies a design under a new id with `" (Copy)"` appended to its name.
    ///
    /// The copy is never a favorite or a system preset.
    pub fn duplicate_design(&mut self, id: Uuid) -> Option<Uuid> {
        let original = self.get(id)?;
        let duplicate = SavedDesign::new(format!("{} (Copy)", original.name), original.state.clone());
        let new_id = duplicate.id;
        self.designs.push(duplicate);
        info!(from = %id, to = %new_id, "Design duplicated");
        Some(new_id)
    }

    /// Renames a design.
    pub fn rename_design(&mut self, id: Uuid, name: impl Into<String>) -> bool {
        self.get_mut(id).map(|design| design.name = name.into()).is_some()
    }

    /// Serializes a design's snapshot, or `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn export_design(&self, id: Uuid, pretty: bool) -> Result<Option<String>> {
        let Some(design) = self.get(id) else {
            return Ok(None);
        };
        let json = if pretty {
            serde_json::to_string_pretty(&design.state)
        } else {
            serde_json::to_string(&design.state)
        }
        .context("Failed to serialize design")?;
        Ok(Some(json))
    }

    /// Adds an exported design as a new active entry named after the design.
    ///
    /// # Errors
    ///
    /// Returns error if the payload is not a valid design; the gallery is left unchanged.
    pub fn import_design(&mut self, json: &str) -> Result<Uuid> {
        let state = parse_import(json).inspect_err(|err| {
            error!(error = %format!("{err:#}"), "Failed to import design into gallery");
        })?;
        let name = if state.name.trim().is_empty() {
            IMPORTED_DESIGN_NAME.to_string()
        } else {
            state.name.clone()
        };
        Ok(self.save_design(name, state))
    }
}
