//! Utility module with configuration and checkpoint handling
//!
//! This module provides:
//! - Model parameters, train arguments and the on-disk configuration file
//! - Weight snapshot naming, saving and lookup

pub mod checkpoint;
pub(crate) mod config;

pub use checkpoint::{save_checkpoint, NetworkRole, DEFAULT_CACHE_DIR};
pub use config::{Config, ModelParameters, TrainArguments};
