//! Application module for Mural
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment

pub mod config;
mod loader;

pub use loader::load_config;
