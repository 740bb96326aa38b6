//! # Attribute-aware weighted k-NN ranking
//!
//! Given the vertex × seed distance matrix, the label of every seed entry and the
//! sorted distinct labels, every vertex is scored against every attribute:
//!
//! 1. order the seed entries of each vertex by distance and keep the `k` nearest;
//! 2. for each attribute, collect the distances of those neighbours carrying it;
//! 3. fold them with a [`NeighborWeighting`] (by default `(Σ 1/d)^-1`);
//! 4. a vertex with no matching neighbour has no evidence and scores `+∞`;
//! 5. per attribute, sort vertices by ascending score, ties by vertex index.
//!
//! Memory is `O(vertices × attributes)` for the scores plus `O(k)` scratch per
//! vertex.

use std::cmp::Ordering;

use log::{debug, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::{NominationError, Result};
use crate::weighting::NeighborWeighting;

/// Default number of neighbours.
pub const DEFAULT_K: usize = 5;

/// A validated, strictly positive neighbour count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NeighborCount(usize);

impl NeighborCount {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for NeighborCount {
    fn default() -> Self {
        NeighborCount(DEFAULT_K)
    }
}

impl TryFrom<usize> for NeighborCount {
    type Error = NominationError;

    fn try_from(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(NominationError::Value("k must be greater than 0".into()));
        }
        Ok(NeighborCount(k))
    }
}

impl TryFrom<i64> for NeighborCount {
    type Error = NominationError;

    fn try_from(k: i64) -> Result<Self> {
        if k <= 0 {
            return Err(NominationError::Value(format!(
                "k must be greater than 0, got {}",
                k
            )));
        }
        NeighborCount::try_from(k as usize)
    }
}

impl TryFrom<i32> for NeighborCount {
    type Error = NominationError;

    fn try_from(k: i32) -> Result<Self> {
        NeighborCount::try_from(k as i64)
    }
}

impl TryFrom<f64> for NeighborCount {
    type Error = NominationError;

    /// Whole-valued floats are accepted, anything else is a type error.
    fn try_from(k: f64) -> Result<Self> {
        if !k.is_finite() || k.fract() != 0.0 {
            return Err(NominationError::Type(format!(
                "k must be an integer, got {}",
                k
            )));
        }
        NeighborCount::try_from(k as i64)
    }
}

/// Ranking of all vertices for each attribute of the seed.
///
/// Both tables have shape `(n_vertices, n_attributes)`. Column `c` belongs to
/// `attributes()[c]`; row `r` of that column is the `r`-th best vertex and its
/// score. Scores are non-negative, lower is better, `+∞` means no evidence.
#[derive(Clone, Debug, PartialEq)]
pub struct Nomination {
    attributes: Vec<i64>,
    n_vertices: usize,
    // column-major: column c occupies [c * n_vertices, (c + 1) * n_vertices)
    order: Vec<usize>,
    scores: Vec<f64>,
}

impl Nomination {
    /// `(n_vertices, n_attributes)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_vertices, self.attributes.len())
    }

    /// Attribute label of each column, ascending.
    pub fn attributes(&self) -> &[i64] {
        &self.attributes
    }

    pub fn column_of(&self, label: i64) -> Option<usize> {
        self.attributes.binary_search(&label).ok()
    }

    /// Vertex indices of column `col`, best match first.
    ///
    /// # Panics
    ///
    /// If `col >= self.shape().1`. Use [`Nomination::order_for`] to look up by label.
    pub fn order(&self, col: usize) -> &[usize] {
        &self.order[col * self.n_vertices..(col + 1) * self.n_vertices]
    }

    /// Scores of column `col`, aligned with [`Nomination::order`].
    ///
    /// # Panics
    ///
    /// If `col >= self.shape().1`.
    pub fn scores(&self, col: usize) -> &[f64] {
        &self.scores[col * self.n_vertices..(col + 1) * self.n_vertices]
    }

    /// Nomination list for an attribute label, if that label is in the seed.
    pub fn order_for(&self, label: i64) -> Option<&[usize]> {
        self.column_of(label).map(|c| self.order(c))
    }

    pub fn scores_for(&self, label: i64) -> Option<&[f64]> {
        self.column_of(label).map(|c| self.scores(c))
    }

    /// The `n` best `(vertex, score)` pairs for a label.
    pub fn top(&self, label: i64, n: usize) -> Vec<(usize, f64)> {
        match self.column_of(label) {
            Some(c) => self
                .order(c)
                .iter()
                .copied()
                .zip(self.scores(c).iter().copied())
                .take(n)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Position of `vertex` in the nomination list of column `col`.
    pub fn rank_of(&self, col: usize, vertex: usize) -> Option<usize> {
        self.order(col).iter().position(|&v| v == vertex)
    }

    /// Sorted scores as a `(n_vertices, n_attributes)` matrix.
    pub fn scores_matrix(&self) -> DenseMatrix<f64> {
        let (n, m) = self.shape();
        let values = (0..n).flat_map(|r| (0..m).map(move |c| self.scores[c * n + r]));
        DenseMatrix::from_iterator(values, n, m, 0)
    }
}

/// Orders `(score, index)` ascending by score, then by index. NaN sorts last.
fn by_score_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

/// Scores and ranks every vertex against every attribute.
///
/// - `distances`: `(n_vertices, n_seeds)` vertex-to-seed distances.
/// - `labels`: attribute label of each seed column.
/// - `attributes`: distinct labels, sorted ascending.
/// - `k`: neighbours per vertex; clipped to `n_seeds`.
pub fn rank_vertices(
    distances: &DenseMatrix<f64>,
    labels: &[i64],
    attributes: &[i64],
    k: usize,
    weighting: &dyn NeighborWeighting,
) -> Result<Nomination> {
    let (n_vertices, n_seeds) = distances.shape();
    if labels.len() != n_seeds {
        return Err(NominationError::Index(format!(
            "{} labels for {} seed columns",
            labels.len(),
            n_seeds
        )));
    }
    if k == 0 {
        return Err(NominationError::Value("k must be greater than 0".into()));
    }
    let k = k.min(n_seeds);
    let n_attributes = attributes.len();
    debug!(
        "Ranking {} vertices against {} attributes with k={} ({})",
        n_vertices,
        n_attributes,
        k,
        weighting.name()
    );

    // attribute column of every seed entry
    let seed_column: Vec<usize> = labels
        .iter()
        .map(|l| {
            attributes.binary_search(l).map_err(|_| {
                NominationError::Value(format!("seed label {} missing from attribute set", l))
            })
        })
        .collect::<Result<_>>()?;

    // per vertex: one optional score per attribute
    let vertex_scores: Vec<Vec<Option<f64>>> = (0..n_vertices)
        .into_par_iter()
        .map(|v| {
            let mut neighbours: Vec<(f64, usize)> =
                (0..n_seeds).map(|s| (*distances.get((v, s)), s)).collect();
            neighbours.sort_by(by_score_then_index);
            neighbours.truncate(k);

            let mut evidence: Vec<Vec<f64>> = vec![Vec::new(); n_attributes];
            for &(d, s) in &neighbours {
                evidence[seed_column[s]].push(d);
            }
            evidence
                .iter()
                .map(|e| weighting.aggregate(e).filter(|score| !score.is_nan()))
                .collect()
        })
        .collect();

    let columns: Vec<(Vec<usize>, Vec<f64>)> = (0..n_attributes)
        .into_par_iter()
        .map(|c| {
            let mut scored: Vec<(f64, usize)> = vertex_scores
                .iter()
                .enumerate()
                .map(|(v, s)| (s[c].unwrap_or(f64::INFINITY), v))
                .collect();
            scored.sort_by(by_score_then_index);
            trace!(
                "Attribute {}: best vertex {:?}",
                attributes[c],
                scored.first()
            );
            scored.into_iter().map(|(s, v)| (v, s)).unzip()
        })
        .collect();

    let mut order = Vec::with_capacity(n_vertices * n_attributes);
    let mut scores = Vec::with_capacity(n_vertices * n_attributes);
    for (o, s) in columns {
        order.extend(o);
        scores.extend(s);
    }

    Ok(Nomination {
        attributes: attributes.to_vec(),
        n_vertices,
        order,
        scores,
    })
}
