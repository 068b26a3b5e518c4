//! Current design commands: show, export, import, reset and resolve.

use crate::cli::common::{load_store, print_json, save_store, CliError, CliResult};
use crate::models::{HslColor, QUADRANT_COUNT};
use crate::services::DesignStore;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Current design commands
#[derive(Args, Debug)]
pub struct DesignArgs {
    #[command(subcommand)]
    command: DesignCommand,
}

#[derive(Subcommand, Debug)]
enum DesignCommand {
    /// Display the current design
    Show(DesignShowArgs),
    /// Export the current design as JSON
    Export(DesignExportArgs),
    /// Replace the current design with an exported one
    Import(DesignImportArgs),
    /// Restore the built-in default design
    Reset,
    /// Show the effective colors of every quadrant
    Resolve(DesignResolveArgs),
}

/// Display the current design
#[derive(Args, Debug)]
pub struct DesignShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Export the current design
#[derive(Args, Debug)]
pub struct DesignExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Import a design file
#[derive(Args, Debug)]
pub struct DesignImportArgs {
    /// Exported design JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Show effective colors
#[derive(Args, Debug)]
pub struct DesignResolveArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResolvedColor {
    hsl: HslColor,
    hex: String,
    css: String,
}

impl From<HslColor> for ResolvedColor {
    fn from(color: HslColor) -> Self {
        Self {
            hsl: color,
            hex: color.to_hex(),
            css: color.to_css(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResolvedQuadrant {
    index: usize,
    element_id: String,
    is_filled: bool,
    fill_color: Option<ResolvedColor>,
    element_color: Option<ResolvedColor>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResolvedDesign {
    name: String,
    base_color: ResolvedColor,
    two_tone: bool,
    unique_element_colors: bool,
    quadrants: Vec<ResolvedQuadrant>,
}

impl DesignArgs {
    /// Execute design subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            DesignCommand::Show(args) => args.execute(),
            DesignCommand::Export(args) => args.execute(),
            DesignCommand::Import(args) => args.execute(),
            DesignCommand::Reset => execute_reset(),
            DesignCommand::Resolve(args) => args.execute(),
        }
    }
}

impl DesignShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let (_, _, store) = load_store()?;
        let design = store.design();

        if self.json {
            return print_json(design);
        }

        println!("Name:     {}", design.name);
        println!("Version:  {}", design.version);
        println!("Base:     {}", design.base_color);
        println!("Fill:     {}", design.base_design.fill_color_for_filled_quadrants);
        println!("Over base:   {}", design.base_design.element_color_over_base);
        println!(
            "Over filled: {}",
            design.base_design.element_color_over_filled_quadrants
        );
        match &design.two_tone_design {
            Some(two_tone) => {
                println!(
                    "Two-tone: {} / {}",
                    two_tone.fill_color_quadrant0, two_tone.fill_color_quadrant3
                );
                match &two_tone.unique_element_colors {
                    Some(unique) => println!(
                        "Unique:   {} / {}",
                        unique.element_color_over_quadrant0_fill,
                        unique.element_color_over_quadrant3_fill
                    ),
                    None => println!("Unique:   off"),
                }
            }
            None => println!("Two-tone: off"),
        }
        println!();
        for (index, quadrant) in design.quadrants.iter().enumerate() {
            println!(
                "  [{index}] {:<10} scale {:.2}  offset ({}, {}){}",
                quadrant.element_id.as_str(),
                quadrant.element_scale,
                quadrant.center_offset.x,
                quadrant.center_offset.y,
                if quadrant.is_filled { "  filled" } else { "" }
            );
        }
        Ok(())
    }
}

impl DesignExportArgs {
    /// Execute export command
    pub fn execute(&self) -> CliResult<()> {
        let (config, _, store) = load_store()?;
        let json = store
            .export_json(config.ui.pretty_json)
            .map_err(|e| CliError::io(format!("Failed to export design: {e:#}")))?;

        match &self.output {
            Some(path) => {
                fs::write(path, format!("{json}\n")).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Design exported to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

impl DesignImportArgs {
    /// Execute import command
    pub fn execute(&self) -> CliResult<()> {
        if !self.file.exists() {
            return Err(CliError::not_found(format!(
                "File not found: {}",
                self.file.display()
            )));
        }
        let json = fs::read_to_string(&self.file)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.file.display())))?;

        let (_, storage, mut store) = load_store()?;
        store
            .import_json(&json)
            .map_err(|e| CliError::validation(format!("Import failed: {e:#}")))?;
        save_store(&storage, &store)?;

        println!("Imported design '{}'", store.design().name);
        Ok(())
    }
}

fn execute_reset() -> CliResult<()> {
    let (_, storage, mut store) = load_store()?;
    store.reset();
    save_store(&storage, &store)?;
    println!("Design reset to default");
    Ok(())
}

impl DesignResolveArgs {
    /// Execute resolve command
    pub fn execute(&self) -> CliResult<()> {
        let (_, _, store) = load_store()?;
        let resolved = resolve(&store);

        if self.json {
            return print_json(&resolved);
        }

        println!("Base: {}", resolved.base_color.css);
        for quadrant in &resolved.quadrants {
            let fill = quadrant
                .fill_color
                .as_ref()
                .map_or_else(|| "-".to_string(), |color| color.css.clone());
            let element = quadrant
                .element_color
                .as_ref()
                .map_or_else(|| "-".to_string(), |color| color.css.clone());
            println!(
                "  [{}] {:<10} fill {fill:<22} element {element}",
                quadrant.index, quadrant.element_id
            );
        }
        Ok(())
    }
}

fn resolve(store: &DesignStore) -> ResolvedDesign {
    let design = store.design();
    let quadrants = (0..QUADRANT_COUNT)
        .map(|index| {
            let quadrant = &design.quadrants[index];
            ResolvedQuadrant {
                index,
                element_id: quadrant.element_id.to_string(),
                is_filled: quadrant.is_filled,
                fill_color: store.fill_color(index).map(ResolvedColor::from),
                element_color: store.element_color(index).map(ResolvedColor::from),
            }
        })
        .collect();

    ResolvedDesign {
        name: design.name.clone(),
        base_color: store.base_fragment_color().into(),
        two_tone: design.two_tone_design.is_some(),
        unique_element_colors: design
            .two_tone_design
            .as_ref()
            .is_some_and(|two_tone| two_tone.unique_element_colors.is_some()),
        quadrants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_design() {
        let resolved = resolve(&DesignStore::default());
        assert!(!resolved.two_tone);
        assert_eq!(resolved.quadrants.len(), 4);
        assert!(resolved.quadrants[0].fill_color.is_some());
        assert!(resolved.quadrants[1].fill_color.is_none());
        assert_eq!(
            resolved.quadrants[3].element_color.as_ref().unwrap().hex,
            "#ffffff"
        );
    }
}
