//! Design gallery commands.

use crate::cli::common::{
    data_dir, load_config, load_store, open_gallery, print_json, save_store, CliError, CliResult,
};
use crate::services::{DesignStorage, DesignStore, Gallery, SavedDesign};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Design gallery commands
#[derive(Args, Debug)]
pub struct GalleryArgs {
    #[command(subcommand)]
    command: GalleryCommand,
}

#[derive(Subcommand, Debug)]
enum GalleryCommand {
    /// Save the current design to the gallery
    Save {
        /// Display name (defaults to the design's name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List saved designs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Make a saved design the current design
    Load {
        /// Design id or name
        design: String,
    },
    /// Delete a saved design
    Delete {
        /// Design id or name
        design: String,
    },
    /// Toggle a design's favorite flag
    Favorite {
        /// Design id or name
        design: String,
    },
    /// Copy a saved design
    Duplicate {
        /// Design id or name
        design: String,
    },
    /// Rename a saved design
    Rename {
        /// Design id or name
        design: String,
        /// New name
        name: String,
    },
    /// Export a saved design as JSON
    Export {
        /// Design id or name
        design: String,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Add an exported design to the gallery
    Import {
        /// Exported design JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GalleryEntryOutput<'a> {
    id: Uuid,
    name: &'a str,
    timestamp: String,
    is_favorite: bool,
    is_system_preset: bool,
    is_active: bool,
}

impl GalleryArgs {
    /// Execute gallery subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let mut gallery = open_gallery(&config)?;

        match &self.command {
            GalleryCommand::Save { name } => {
                let (_, _, store) = load_store()?;
                let state = store.design().clone();
                let name = name.clone().unwrap_or_else(|| state.name.clone());
                let id = gallery.save_design(name.as_str(), state);
                save_gallery(&gallery)?;
                println!("Saved '{name}' ({id})");
            }
            GalleryCommand::List { json, favorites } => {
                let entries: Vec<&SavedDesign> = gallery
                    .designs()
                    .iter()
                    .filter(|design| !favorites || design.is_favorite)
                    .collect();
                list(&gallery, &entries, *json)?;
            }
            GalleryCommand::Load { design } => {
                let id = resolve(&gallery, design)?;
                let state = gallery
                    .load_design(id)
                    .ok_or_else(|| CliError::not_found(format!("Design not found: {design}")))?;
                let storage = DesignStorage::new(&data_dir(&config)?);
                let name = state.name.clone();
                save_store(&storage, &DesignStore::new(state))?;
                save_gallery(&gallery)?;
                println!("Loaded '{name}'");
            }
            GalleryCommand::Delete { design } => {
                let id = resolve(&gallery, design)?;
                gallery.delete_design(id);
                save_gallery(&gallery)?;
                println!("Deleted {id}");
            }
            GalleryCommand::Favorite { design } => {
                let id = resolve(&gallery, design)?;
                let favorite = gallery
                    .toggle_favorite(id)
                    .ok_or_else(|| CliError::not_found(format!("Design not found: {design}")))?;
                save_gallery(&gallery)?;
                println!(
                    "{id} {}",
                    if favorite { "marked as favorite" } else { "unmarked" }
                );
            }
            GalleryCommand::Duplicate { design } => {
                let id = resolve(&gallery, design)?;
                let copy = gallery
                    .duplicate_design(id)
                    .ok_or_else(|| CliError::not_found(format!("Design not found: {design}")))?;
                save_gallery(&gallery)?;
                println!("Duplicated as {copy}");
            }
            GalleryCommand::Rename { design, name } => {
                let id = resolve(&gallery, design)?;
                gallery.rename_design(id, name.as_str());
                save_gallery(&gallery)?;
                println!("Renamed {id} to '{name}'");
            }
            GalleryCommand::Export { design, output } => {
                let id = resolve(&gallery, design)?;
                let json = gallery
                    .export_design(id, config.ui.pretty_json)
                    .map_err(|e| CliError::io(format!("Failed to export design: {e:#}")))?
                    .ok_or_else(|| CliError::not_found(format!("Design not found: {design}")))?;
                match output {
                    Some(path) => {
                        fs::write(path, format!("{json}\n")).map_err(|e| {
                            CliError::io(format!("Failed to write {}: {e}", path.display()))
                        })?;
                        println!("Design exported to {}", path.display());
                    }
                    None => println!("{json}"),
                }
            }
            GalleryCommand::Import { file } => {
                if !file.exists() {
                    return Err(CliError::not_found(format!(
                        "File not found: {}",
                        file.display()
                    )));
                }
                let json = fs::read_to_string(file)
                    .map_err(|e| CliError::io(format!("Failed to read {}: {e}", file.display())))?;
                let id = gallery
                    .import_design(&json)
                    .map_err(|e| CliError::validation(format!("Import failed: {e:#}")))?;
                save_gallery(&gallery)?;
                println!("Imported as {id}");
            }
        }

        Ok(())
    }
}

fn resolve(gallery: &Gallery, key: &str) -> CliResult<Uuid> {
    gallery
        .resolve(key)
        .ok_or_else(|| CliError::not_found(format!("Design not found: {key}")))
}

fn save_gallery(gallery: &Gallery) -> CliResult<()> {
    gallery
        .save()
        .map_err(|e| CliError::io(format!("Failed to save gallery: {e:#}")))
}

fn list(gallery: &Gallery, entries: &[&SavedDesign], json: bool) -> CliResult<()> {
    let active = gallery.active_design_id();

    if json {
        let output: Vec<GalleryEntryOutput<'_>> = entries
            .iter()
            .map(|design| GalleryEntryOutput {
                id: design.id,
                name: &design.name,
                timestamp: design.timestamp.to_rfc3339(),
                is_favorite: design.is_favorite,
                is_system_preset: design.is_system_preset,
                is_active: active == Some(design.id),
            })
            .collect();
        return print_json(&output);
    }

    if entries.is_empty() {
        println!("No saved designs");
        return Ok(());
    }

    for design in entries {
        println!(
            "{} {} {}  {}  {}",
            if active == Some(design.id) { "*" } else { " " },
            if design.is_favorite { "★" } else { " " },
            design.id,
            design.timestamp.format("%Y-%m-%d %H:%M"),
            design.name
        );
    }
    Ok(())
}
