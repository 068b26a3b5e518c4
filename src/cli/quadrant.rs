//! Quadrant editing commands.

use crate::cli::common::{ensure_applied, load_store, save_store, CliError, CliResult};
use crate::models::{Offset, QUADRANT_COUNT};
use clap::{Args, Subcommand};

/// Quadrant commands
#[derive(Args, Debug)]
pub struct QuadrantArgs {
    #[command(subcommand)]
    command: QuadrantCommand,
}

#[derive(Subcommand, Debug)]
enum QuadrantCommand {
    /// Set an element's scale (clamped to 0.5-2.0)
    Scale {
        /// Quadrant index (0-3)
        index: usize,
        /// Scale factor
        scale: f64,
    },
    /// Set an element's offset from its anchor
    #[command(allow_negative_numbers = true)]
    Offset {
        /// Quadrant index (0-3)
        index: usize,
        /// Horizontal offset
        x: f64,
        /// Vertical offset
        y: f64,
    },
    /// Swap the elements of two quadrants
    Swap {
        /// First quadrant index
        from: usize,
        /// Second quadrant index
        to: usize,
    },
    /// Rearrange quadrants: new quadrant k takes old quadrant ORDER[k]
    Reorder {
        /// Permutation of 0 1 2 3
        #[arg(num_args = QUADRANT_COUNT, value_name = "ORDER")]
        order: Vec<usize>,
    },
    /// Show or hide a quadrant's colored disk
    Filled {
        /// Quadrant index (0-3)
        index: usize,
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        filled: bool,
    },
}

impl QuadrantArgs {
    /// Execute quadrant subcommand
    pub fn execute(&self) -> CliResult<()> {
        let (_, storage, mut store) = load_store()?;

        match &self.command {
            QuadrantCommand::Scale { index, scale } => {
                ensure_applied(
                    store.set_element_scale(*index, *scale),
                    format!("Quadrant index {index} is out of range"),
                )?;
                let applied = store.design().quadrants[*index].element_scale;
                println!("Quadrant {index} scale set to {applied}");
            }
            QuadrantCommand::Offset { index, x, y } => {
                ensure_applied(
                    store.set_center_offset(*index, Offset::new(*x, *y)),
                    format!("Invalid offset for quadrant {index}"),
                )?;
                println!("Quadrant {index} offset set to ({x}, {y})");
            }
            QuadrantCommand::Swap { from, to } => {
                ensure_applied(
                    store.swap_elements(*from, *to),
                    format!("Cannot swap quadrants {from} and {to}"),
                )?;
                println!("Swapped elements of quadrants {from} and {to}");
            }
            QuadrantCommand::Reorder { order } => {
                let permutation: [usize; QUADRANT_COUNT] =
                    order.as_slice().try_into().map_err(|_| {
                        CliError::validation(format!("Expected {QUADRANT_COUNT} quadrant indices"))
                    })?;
                ensure_applied(
                    store.reorder_quadrants(permutation),
                    format!("{order:?} is not a permutation of 0-3"),
                )?;
                println!("Quadrants reordered to {order:?}");
            }
            QuadrantCommand::Filled { index, filled } => {
                ensure_applied(
                    store.set_filled(*index, *filled),
                    format!("Quadrant index {index} is out of range"),
                )?;
                println!(
                    "Quadrant {index} {}",
                    if *filled { "filled" } else { "unfilled" }
                );
            }
        }

        save_store(&storage, &store)
    }
}
