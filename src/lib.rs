//! Crestforge Library
//!
//! This library provides the core of the Crestforge emblem designer: the
//! four-quadrant design model, tiered color resolution, schema migration,
//! persistence, and recoloring of vector artwork fragments.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
