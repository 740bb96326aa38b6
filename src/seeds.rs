//! Seed normalisation.
//!
//! A seed arrives either as a flat list of vertex indices (unattributed: every
//! seed vertex is its own attribute class) or as `(vertex, label)` pairs
//! (attributed: several seeds may share a label). Both are canonicalised into
//! [`Seeds`], a list of `(vertex, label)` pairs.

use log::{debug, trace};

use crate::errors::{NominationError, Result};
use crate::input::ArrayInput;

/// Seed specification as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SeedInput {
    /// Shape `(n,)`: vertex indices only.
    Indices(Vec<i64>),
    /// Shape `(n, 2)`: `(vertex, label)` pairs.
    Labelled(Vec<(i64, i64)>),
    /// Untyped array of shape `(n,)`, `(n, 1)` or `(n, 2)`.
    Array(ArrayInput),
}

/// Normalised seed: one `(vertex, label)` pair per seed entry, input order kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seeds {
    pairs: Vec<(i64, i64)>,
}

impl Seeds {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.pairs
    }

    /// Column 0: seed vertex indices.
    pub fn vertices(&self) -> Vec<i64> {
        self.pairs.iter().map(|&(v, _)| v).collect()
    }

    /// Column 1: attribute label of each seed entry.
    pub fn labels(&self) -> Vec<i64> {
        self.pairs.iter().map(|&(_, l)| l).collect()
    }

    /// Distinct labels, ascending.
    pub fn unique_labels(&self) -> Vec<i64> {
        let mut labels = self.labels();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Checks every vertex index lies in `0..n_vertices` and returns them as `usize`.
    pub fn vertex_indices(&self, n_vertices: usize) -> Result<Vec<usize>> {
        self.pairs
            .iter()
            .map(|&(v, _)| {
                if v < 0 || v as usize >= n_vertices {
                    Err(NominationError::Index(format!(
                        "seed vertex {} out of range for a graph of {} vertices",
                        v, n_vertices
                    )))
                } else {
                    Ok(v as usize)
                }
            })
            .collect()
    }
}

impl SeedInput {
    /// Canonicalises the seed into `(vertex, label)` pairs.
    ///
    /// Unattributed input gets the synthetic label `i` for the `i`-th entry.
    pub fn normalize(&self) -> Result<Seeds> {
        let pairs = match self {
            SeedInput::Indices(indices) => with_positional_labels(indices),
            SeedInput::Labelled(pairs) => pairs.clone(),
            SeedInput::Array(array) => normalize_array(array)?,
        };
        debug!("Normalised seed into {} (vertex, label) pairs", pairs.len());
        Ok(Seeds { pairs })
    }
}

fn with_positional_labels(indices: &[i64]) -> Vec<(i64, i64)> {
    indices
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i as i64))
        .collect()
}

fn normalize_array(array: &ArrayInput) -> Result<Vec<(i64, i64)>> {
    if !array.is_integral() {
        return Err(NominationError::Type("seed must be of integer type".into()));
    }
    let ints: Vec<i64> = array.values.iter().map(|&v| v as i64).collect();
    match array.shape.as_slice() {
        [_] | [_, 1] => {
            trace!("Unattributed seed array of shape {:?}", array.shape);
            Ok(with_positional_labels(&ints))
        }
        [_, 2] => {
            trace!("Attributed seed array of shape {:?}", array.shape);
            Ok(ints.chunks_exact(2).map(|c| (c[0], c[1])).collect())
        }
        shape => Err(NominationError::Index(format!(
            "seed must have shape (n), (n, 1) or (n, 2), got {:?}",
            shape
        ))),
    }
}
