//! Checkpoint discovery and named-tensor restore.
//!
//! A checkpoint root holds numbered `ckpt-<N>` subdirectories; the highest
//! `N` is the most recent snapshot. Each snapshot stores one JSON tensor map
//! per network (`name -> {shape, data}`). Restore is partial-match tolerant:
//! names absent from the snapshot keep their initialized values, but a
//! present name with the wrong shape is a startup error.

use crate::error::{Result, StartupError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Checkpoint subdirectory name prefix.
pub const CKPT_PREFIX: &str = "ckpt-";

/// A single persisted tensor.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TensorData {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Named tensors of one network within a snapshot.
pub type TensorMap = HashMap<String, TensorData>;

/// Find the most recent `ckpt-<N>` snapshot under a checkpoint root.
///
/// A missing root or a root without any snapshot is a fatal
/// [`StartupError::NoCheckpoint`].
pub fn latest_checkpoint(root: &Path) -> Result<PathBuf> {
    let no_checkpoint = || StartupError::NoCheckpoint(root.display().to_string());

    let entries = std::fs::read_dir(root).map_err(|_| no_checkpoint())?;

    let mut latest: Option<(u64, PathBuf)> = None;

    for entry in entries {
        let entry = entry.map_err(StartupError::Io)?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        let Some(number) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.strip_prefix(CKPT_PREFIX))
            .and_then(|suffix| suffix.parse::<u64>().ok())
        else {
            continue;
        };

        if latest.as_ref().is_none_or(|(n, _)| number > *n) {
            latest = Some((number, path));
        }
    }

    let (number, path) = latest.ok_or_else(no_checkpoint)?;
    tracing::debug!(number, path = %path.display(), "selected checkpoint");

    Ok(path)
}

/// Load a named-tensor map from a snapshot file.
pub fn load_tensors(path: &Path) -> Result<TensorMap> {
    let raw = std::fs::read_to_string(path)?;
    let tensors = serde_json::from_str(&raw)?;
    Ok(tensors)
}

/// Restore a matrix parameter by name, keeping the initialized value when
/// the name is absent from the snapshot.
pub fn restore2(tensors: &TensorMap, name: &str, target: &mut Array2<f32>) -> Result<()> {
    let Some(tensor) = tensors.get(name) else {
        tracing::debug!(name, "tensor not in checkpoint, keeping initialized value");
        return Ok(());
    };

    if tensor.shape != target.shape() {
        return Err(StartupError::TensorShape {
            name: name.to_string(),
            expected: target.shape().to_vec(),
            got: tensor.shape.clone(),
        }
        .into());
    }

    let restored = Array2::from_shape_vec((tensor.shape[0], tensor.shape[1]), tensor.data.clone())
        .map_err(crate::error::ModelError::Shape)?;
    target.assign(&restored);

    Ok(())
}

/// Restore a vector parameter by name, keeping the initialized value when
/// the name is absent from the snapshot.
pub fn restore1(tensors: &TensorMap, name: &str, target: &mut Array1<f32>) -> Result<()> {
    let Some(tensor) = tensors.get(name) else {
        tracing::debug!(name, "tensor not in checkpoint, keeping initialized value");
        return Ok(());
    };

    if tensor.shape != [target.len()] {
        return Err(StartupError::TensorShape {
            name: name.to_string(),
            expected: vec![target.len()],
            got: tensor.shape.clone(),
        }
        .into());
    }

    target.assign(&Array1::from_vec(tensor.data.clone()));

    Ok(())
}
