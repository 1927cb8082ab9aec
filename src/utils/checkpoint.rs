//! Weight snapshot naming, saving and lookup.
//!
//! Checkpoints are bare weight files named
//! `{prefix}_{role}_model_weights_step_{epoch}.h5`. The epoch number is
//! part of the file name, so snapshots from different epochs never
//! overwrite each other.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, WganError};
use crate::model::Wgan;

/// Default checkpoint directory.
pub const DEFAULT_CACHE_DIR: &str = "./cache";

const GENERATOR_MARKER: &str = "_generator_model_weights_step_";

/// Which network a snapshot file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRole {
    Generator,
    Critic,
}

impl NetworkRole {
    fn as_str(self) -> &'static str {
        match self {
            NetworkRole::Generator => "generator",
            NetworkRole::Critic => "critic",
        }
    }
}

impl fmt::Display for NetworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name for a weight snapshot.
pub fn weights_file_name(prefix: &str, role: NetworkRole, epoch: usize) -> String {
    format!("{prefix}_{role}_model_weights_step_{epoch}.h5")
}

/// Full path of a weight snapshot inside `dir`.
pub fn weights_path(dir: &Path, prefix: &str, role: NetworkRole, epoch: usize) -> PathBuf {
    dir.join(weights_file_name(prefix, role, epoch))
}

/// Snapshot both networks' weights for `epoch`, creating `dir` if missing.
pub fn save_checkpoint(
    model: &Wgan,
    dir: &Path,
    prefix: &str,
    epoch: usize,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let gen_path = weights_path(dir, prefix, NetworkRole::Generator, epoch);
    let critic_path = weights_path(dir, prefix, NetworkRole::Critic, epoch);
    model.save(&gen_path, &critic_path)?;

    info!("Saved checkpoint for epoch {} to {}", epoch, dir.display());
    Ok((gen_path, critic_path))
}

/// Most recent generator snapshot in `dir` (highest epoch number).
pub fn latest_generator_weights(dir: &Path) -> Result<PathBuf> {
    let mut latest: Option<(usize, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(epoch) = parse_generator_epoch(name) else {
            continue;
        };
        if latest.as_ref().map_or(true, |(best, _)| epoch > *best) {
            latest = Some((epoch, entry.path()));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| {
        WganError::Config(format!(
            "no generator weight snapshot found in {}",
            dir.display()
        ))
    })
}

fn parse_generator_epoch(file_name: &str) -> Option<usize> {
    let stem = file_name.strip_suffix(".h5")?;
    let (_, epoch) = stem.split_once(GENERATOR_MARKER)?;
    epoch.parse().ok()
}
