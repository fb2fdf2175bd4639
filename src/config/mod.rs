//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the engine settings (organisation, Bradford window,
//! server address) and the seed data for the in-memory store from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded organisation: {}", config.config().organisation.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BradfordSettings, EngineConfig, OrganisationConfig, SeedData, ServerSettings};
