//! Model module containing the WGAN architecture components
//!
//! This module provides:
//! - Generator network mapping noise vectors to synthetic records
//! - Critic network scoring records as real or fake
//! - Weight constraints applied after critic updates
//! - WGAN wrapper combining both networks

mod constraint;
mod critic;
mod generator;
mod wgan;

pub use constraint::{constrain_vars, ClipConstraint, PostUpdateConstraint, DEFAULT_CLIP_VALUE};
pub use critic::{Critic, FrozenCritic};
pub use generator::Generator;
pub use wgan::Wgan;
