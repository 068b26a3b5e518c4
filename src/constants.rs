//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the binary name, storage keys and format versions.

/// The binary name of the application (used in command examples and directory names).
pub const APP_BINARY_NAME: &str = "crestforge";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "CRESTFORGE_CONFIG_DIR";

/// File name of the persisted current design.
pub const STORAGE_FILE_NAME: &str = "crestforge-storage.json";

/// File name of the persisted design gallery.
pub const GALLERY_FILE_NAME: &str = "crestforge-gallery.json";

/// Version of the persisted storage envelope.
///
/// Bumped whenever the persisted shape changes in a way the migration
/// pipeline has to know about.
pub const STORAGE_VERSION: u32 = 2;

/// Version of the gallery file.
pub const GALLERY_VERSION: u32 = 1;

/// Format version tag stamped into every design configuration.
pub const FORMAT_VERSION: &str = "1.0";

/// Name given to the built-in default design.
pub const DEFAULT_DESIGN_NAME: &str = "Default Design";

/// Name given to gallery imports that carry no name.
pub const IMPORTED_DESIGN_NAME: &str = "Imported Design";

/// Id of the outer group wrapping every artwork fragment.
pub const LOGO_GROUP_ID: &str = "emblem-logo";

/// Id of the group wrapping decorative elements inside the logo group.
pub const ELEMENTS_GROUP_ID: &str = "elements";
