//! Application configuration module
//!
//! Handles the startup configuration document and application-wide
//! constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{Config, DbConfig};
