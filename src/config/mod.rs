//! Configuration module
//!
//! This module provides configuration management including:
//! - Path resolution (env override or platform config directory)
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::CartaPaths;
pub use settings::Settings;
