//! Artwork recoloring command.

use crate::cli::common::{parse_color_arg, print_json, CliError, CliResult};
use crate::services::{
    extract_group_content, recolor_fragment, unwrap_fragment, ColorTargets, FragmentCategory,
};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Recolor a vector artwork fragment
#[derive(Args, Debug)]
pub struct RecolorArgs {
    /// Artwork fragment file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Fragment category (base, overlay, quadrant-fill, decorative-element)
    #[arg(short, long, value_name = "CATEGORY", value_parser = parse_category)]
    category: FragmentCategory,

    /// Fill color
    #[arg(long, value_name = "COLOR")]
    fill: Option<String>,

    /// Stroke color
    #[arg(long, value_name = "COLOR")]
    stroke: Option<String>,

    /// Text fill color (decorative elements)
    #[arg(long, value_name = "COLOR")]
    text_fill: Option<String>,

    /// Strip the svg and logo wrappers before recoloring
    #[arg(long)]
    unwrap: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the resulting group's id, attributes and inner markup as JSON
    #[arg(long)]
    group_json: bool,
}

fn parse_category(input: &str) -> Result<FragmentCategory, String> {
    input.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl RecolorArgs {
    /// Execute the recolor command
    pub fn execute(&self) -> CliResult<()> {
        if self.fill.is_none() && self.stroke.is_none() && self.text_fill.is_none() {
            return Err(CliError::validation(
                "At least one color must be specified: --fill, --stroke, or --text-fill",
            ));
        }

        let targets = ColorTargets {
            fill: self.fill.as_deref().map(parse_color_arg).transpose()?,
            stroke: self.stroke.as_deref().map(parse_color_arg).transpose()?,
            text_fill: self.text_fill.as_deref().map(parse_color_arg).transpose()?,
        };

        if !self.input.exists() {
            return Err(CliError::not_found(format!(
                "File not found: {}",
                self.input.display()
            )));
        }
        let markup = fs::read_to_string(&self.input)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.input.display())))?;

        let markup = if self.unwrap {
            unwrap_fragment(&markup)
        } else {
            markup
        };
        let recolored = recolor_fragment(&markup, self.category, &targets);

        if self.group_json {
            let content = extract_group_content(&recolored).ok_or_else(|| {
                CliError::validation("Result does not contain a group element")
            })?;
            return print_json(&content);
        }

        match &self.output {
            Some(path) => {
                fs::write(path, &recolored).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Recolored fragment written to {}", path.display());
            }
            None => println!("{recolored}"),
        }
        Ok(())
    }
}
