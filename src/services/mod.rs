//! Service layer for business logic.
//!
//! This module contains services that encapsulate the design rules:
//! tiered color resolution, schema migration, persistence and artwork
//! processing.

pub mod gallery;
pub mod migration;
pub mod recolor;
pub mod storage;
pub mod store;
pub mod unwrap;

// Re-export commonly used types and functions
pub use gallery::{Gallery, SavedDesign};
pub use migration::{Migration, MigrationOutcome};
pub use recolor::{recolor_fragment, ColorTargets, FragmentCategory};
pub use storage::DesignStorage;
pub use store::{DesignStore, ShadowTable};
pub use unwrap::{extract_group_content, extract_svg_content, unwrap_fragment, GroupContent};
