//! Neighbour weighting: how the distances to the matching seeds among a vertex's
//! k nearest are folded into one score (lower is a better match).
//!
//! Only `sum_inverse_distance` ships; other schemes plug in by implementing
//! [`NeighborWeighting`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{NominationError, Result};

pub trait NeighborWeighting: Sync {
    fn name(&self) -> &str;

    /// Folds the distances to the matching neighbours into a score.
    ///
    /// `None` means no evidence: no matching neighbour among the k nearest.
    fn aggregate(&self, distances: &[f64]) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weighting {
    /// `(Σ 1/d)^-1` over matching neighbours.
    ///
    /// More close neighbours give a lower score, a neighbour at distance 0 gives
    /// score 0. With one neighbour per attribute this is the plain distance.
    #[default]
    SumInverseDistance,
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weighting {
    type Err = NominationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum_inverse_distance" => Ok(Weighting::SumInverseDistance),
            other => Err(NominationError::NotImplemented(format!(
                "neighbor function {:?}",
                other
            ))),
        }
    }
}

impl NeighborWeighting for Weighting {
    fn name(&self) -> &str {
        match self {
            Weighting::SumInverseDistance => "sum_inverse_distance",
        }
    }

    fn aggregate(&self, distances: &[f64]) -> Option<f64> {
        if distances.is_empty() {
            return None;
        }
        match self {
            Weighting::SumInverseDistance => {
                let inverse_sum: f64 = distances.iter().map(|d| d.recip()).sum();
                Some(inverse_sum.recip())
            }
        }
    }
}
