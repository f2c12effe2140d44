//! Per-boundary train/validation assignment.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ArdError;

/// Dataset split of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Used for fitting and for the normalization statistics.
    Train,
    /// Held out.
    Validation,
}

impl Split {
    /// Lower-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns each boundary to a split with one seeded uniform draw per
/// boundary, in the given order: `u < train_fraction` is train.
///
/// # Errors
///
/// Returns [`ArdError::InvalidConfig`] if `train_fraction` is not in
/// `[0, 1]`.
pub fn assign_splits(
    ids: &[String],
    train_fraction: f64,
    seed: u64,
) -> Result<Vec<(String, Split)>, ArdError> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(ArdError::InvalidConfig {
            reason: format!("train_fraction must be in [0, 1], got {train_fraction}"),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(ids
        .iter()
        .map(|id| {
            let u: f64 = rng.random();
            let split = if u < train_fraction {
                Split::Train
            } else {
                Split::Validation
            };
            (id.clone(), split)
        })
        .collect())
}
