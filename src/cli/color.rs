//! Color commands for the three design tiers.

use crate::cli::common::{ensure_applied, load_store, parse_color_arg, save_store, CliResult};
use crate::models::{FillQuadrant, HslColor};
use crate::services::DesignStore;
use clap::{Args, Subcommand};

/// Color commands
#[derive(Args, Debug)]
pub struct ColorArgs {
    #[command(subcommand)]
    command: ColorCommand,
}

#[derive(Subcommand, Debug)]
enum ColorCommand {
    /// Set the base (emblem body) color
    Base(ColorValueArgs),
    /// Set the shared fill color of filled quadrants
    Fill(ColorValueArgs),
    /// Set the element color over the base
    OverBase(ColorValueArgs),
    /// Set the element color over filled quadrants
    OverFilled(ColorValueArgs),
    /// Separate fill colors for quadrants 0 and 3
    TwoTone(TierArgs),
    /// Separate element colors over quadrants 0 and 3 (requires two-tone)
    Unique(TierArgs),
}

/// A single color value
#[derive(Args, Debug)]
pub struct ColorValueArgs {
    /// Color as #rrggbb, #rgb, rgb(), hsl() or a color name
    #[arg(value_name = "COLOR")]
    color: String,
}

/// Tier toggle and per-quadrant color
#[derive(Args, Debug)]
pub struct TierArgs {
    #[command(subcommand)]
    command: TierCommand,
}

#[derive(Subcommand, Debug)]
enum TierCommand {
    /// Turn the tier on, restoring its last colors
    Enable,
    /// Turn the tier off, remembering its colors
    Disable,
    /// Set the color for quadrant 0 or 3
    Set(TierSetArgs),
}

/// Per-quadrant tier color
#[derive(Args, Debug)]
pub struct TierSetArgs {
    /// Quadrant: 0 (first) or 3 (last)
    #[arg(value_name = "QUADRANT", value_parser = parse_fill_quadrant)]
    quadrant: FillQuadrant,
    /// Color as #rrggbb, #rgb, rgb(), hsl() or a color name
    #[arg(value_name = "COLOR")]
    color: String,
}

#[derive(Clone, Copy)]
enum Tier {
    TwoTone,
    Unique,
}

fn parse_fill_quadrant(input: &str) -> Result<FillQuadrant, String> {
    match input.to_ascii_lowercase().as_str() {
        "first" => Ok(FillQuadrant::First),
        "last" => Ok(FillQuadrant::Last),
        other => other
            .parse::<usize>()
            .ok()
            .and_then(FillQuadrant::from_index)
            .ok_or_else(|| format!("'{input}' is not a two-tone quadrant (use 0 or 3)")),
    }
}

impl ColorArgs {
    /// Execute color subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ColorCommand::Base(args) => args.apply("Base color", DesignStore::set_base_color),
            ColorCommand::Fill(args) => args.apply("Fill color", DesignStore::set_base_fill_color),
            ColorCommand::OverBase(args) => args.apply(
                "Element color over base",
                DesignStore::set_element_color_over_base,
            ),
            ColorCommand::OverFilled(args) => args.apply(
                "Element color over filled quadrants",
                DesignStore::set_element_color_over_filled,
            ),
            ColorCommand::TwoTone(args) => args.execute(Tier::TwoTone),
            ColorCommand::Unique(args) => args.execute(Tier::Unique),
        }
    }
}

impl ColorValueArgs {
    fn apply(&self, label: &str, set: fn(&mut DesignStore, HslColor)) -> CliResult<()> {
        let color = parse_color_arg(&self.color)?;
        let (_, storage, mut store) = load_store()?;
        set(&mut store, color);
        save_store(&storage, &store)?;
        println!("{label} set to {color}");
        Ok(())
    }
}

impl TierArgs {
    fn execute(&self, tier: Tier) -> CliResult<()> {
        let (_, storage, mut store) = load_store()?;

        match (&self.command, tier) {
            (TierCommand::Enable, Tier::TwoTone) => {
                store.enable_two_tone();
                println!("Two-tone enabled");
            }
            (TierCommand::Disable, Tier::TwoTone) => {
                store.disable_two_tone();
                println!("Two-tone disabled");
            }
            (TierCommand::Enable, Tier::Unique) => {
                ensure_applied(
                    store.enable_unique_colors(),
                    "Unique element colors require two-tone to be enabled",
                )?;
                println!("Unique element colors enabled");
            }
            (TierCommand::Disable, Tier::Unique) => {
                ensure_applied(
                    store.disable_unique_colors(),
                    "Unique element colors require two-tone to be enabled",
                )?;
                println!("Unique element colors disabled");
            }
            (TierCommand::Set(args), Tier::TwoTone) => {
                let color = parse_color_arg(&args.color)?;
                ensure_applied(
                    store.set_two_tone_fill(args.quadrant, color),
                    "Two-tone is not enabled",
                )?;
                println!(
                    "Two-tone fill for quadrant {} set to {color}",
                    args.quadrant.index()
                );
            }
            (TierCommand::Set(args), Tier::Unique) => {
                let color = parse_color_arg(&args.color)?;
                ensure_applied(
                    store.set_unique_element_color(args.quadrant, color),
                    "Unique element colors are not enabled",
                )?;
                println!(
                    "Unique element color for quadrant {} set to {color}",
                    args.quadrant.index()
                );
            }
        }

        save_store(&storage, &store)
    }
}
