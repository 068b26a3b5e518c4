//! Crestforge - four-quadrant emblem designer
//!
//! This binary edits the persisted current design, manages the design
//! gallery and recolors vector artwork fragments from the command line.
//!
//! # Usage
//!
//! ```bash
//! crestforge design show
//! crestforge color two-tone enable
//! crestforge color two-tone set 3 "#3366cc"
//! crestforge recolor --input leaf.svg --category decorative-element --fill gold --unwrap
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crestforge::cli::{
    ColorArgs, ConfigArgs, DesignArgs, ExitCode, GalleryArgs, QuadrantArgs, RecolorArgs,
};
use crestforge::config::Config;

/// Crestforge - four-quadrant emblem designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show, export, import, reset or resolve the current design
    Design(DesignArgs),
    /// Edit design colors and color tiers
    Color(ColorArgs),
    /// Edit quadrant elements, scale, offset and fill
    Quadrant(QuadrantArgs),
    /// Recolor a vector artwork fragment
    Recolor(RecolorArgs),
    /// Manage saved designs
    Gallery(GalleryArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr so command output on stdout stays parseable
    let filter = if verbose {
        "debug".to_string()
    } else {
        Config::load()
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| "warn".to_string())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Design(args) => args.execute(),
        Command::Color(args) => args.execute(),
        Command::Quadrant(args) => args.execute(),
        Command::Recolor(args) => args.execute(),
        Command::Gallery(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
