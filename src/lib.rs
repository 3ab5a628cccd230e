//! Stash library crate
//!
//! This crate provides both a CLI binary and a library API for programmatic use

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod sequence;
pub mod theme;
pub mod validators;

pub use cache::{get_user_data, load_cache, save_cache, Cache};
pub use error::{StashError, StashResult};
pub use sequence::find_max;
