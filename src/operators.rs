//! Distance metrics and pairwise distance between point sets.
//!
//! - Named registry: `Metric::from_str("euclidean")`, unknown names fail with
//!   `NominationError::UnknownMetric`.
//! - `pairwise_distance(points, queries, metric)` returns the `|points| × |queries|`
//!   matrix; rows are computed in parallel.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::{NominationError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Metric {
    #[default]
    Euclidean,
    SqEuclidean,
    /// L1, also known as Manhattan.
    Cityblock,
    Chebyshev,
    /// `1 - cos(u, v)`; a zero vector is treated as orthogonal to everything.
    Cosine,
    Minkowski(f64),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::SqEuclidean => write!(f, "sqeuclidean"),
            Metric::Cityblock => write!(f, "cityblock"),
            Metric::Chebyshev => write!(f, "chebyshev"),
            Metric::Cosine => write!(f, "cosine"),
            Metric::Minkowski(p) => write!(f, "minkowski(p={})", p),
        }
    }
}

impl FromStr for Metric {
    type Err = NominationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Metric::Cityblock),
            "chebyshev" => Ok(Metric::Chebyshev),
            "cosine" => Ok(Metric::Cosine),
            "minkowski" => Ok(Metric::Minkowski(2.0)),
            _ => Err(NominationError::UnknownMetric(s.to_string())),
        }
    }
}

impl Metric {
    /// Distance between two equally long vectors.
    #[inline]
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
        match *self {
            Metric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Metric::SqEuclidean => diffs.map(|d| d * d).sum(),
            Metric::Cityblock => diffs.sum(),
            Metric::Chebyshev => diffs.fold(0.0, f64::max),
            Metric::Minkowski(p) => diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p),
            Metric::Cosine => {
                let denom = norm(a) * norm(b);
                let cos = if denom > 1e-15 {
                    (dot(a, b) / denom).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                1.0 - cos
            }
        }
    }
}

#[inline]
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Rows of a dense matrix as owned vectors.
pub fn rows_of(matrix: &DenseMatrix<f64>) -> Vec<Vec<f64>> {
    let (nrows, _) = matrix.shape();
    (0..nrows)
        .map(|i| matrix.get_row(i).iterator(0).copied().collect())
        .collect()
}

/// Distance from every row of `points` to every row of `queries`.
///
/// Entry `(i, j)` is `metric(points[i], queries[j])`.
pub fn pairwise_distance(
    points: &DenseMatrix<f64>,
    queries: &DenseMatrix<f64>,
    metric: &Metric,
) -> Result<DenseMatrix<f64>> {
    let (n_points, dim) = points.shape();
    let (n_queries, query_dim) = queries.shape();
    if dim != query_dim {
        return Err(NominationError::Index(format!(
            "points have {} columns but queries have {}",
            dim, query_dim
        )));
    }
    if dim == 0 {
        return Err(NominationError::Index(
            "cannot compute distances between points with no coordinates".into(),
        ));
    }
    if let Metric::Minkowski(p) = metric {
        if *p < 1.0 {
            return Err(NominationError::Value(format!(
                "minkowski p must be >= 1, got {}",
                p
            )));
        }
    }
    debug!(
        "Computing {} distances: {} points x {} queries in {} dimensions",
        metric, n_points, n_queries, dim
    );

    let point_rows = rows_of(points);
    let query_rows = rows_of(queries);

    let distance_rows: Vec<Vec<f64>> = point_rows
        .par_iter()
        .map(|p| query_rows.iter().map(|q| metric.distance(p, q)).collect())
        .collect();
    trace!("Computed {} distance rows", distance_rows.len());

    let mut flat = Vec::with_capacity(n_points * n_queries);
    for row in distance_rows {
        flat.extend(row);
    }
    Ok(DenseMatrix::from_iterator(flat.into_iter(), n_points, n_queries, 0))
}
