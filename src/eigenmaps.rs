//! # Spectral embeddings
//!
//! The nominator consumes embeddings only through the [`Embedder`] capability:
//! `fit_transform(adjacency) -> embedding`, rows are vertices and columns are
//! coordinates. Two built-in methods are provided:
//!
//! - [`AdjacencySpectralEmbed`] (**ASE**): decomposes the (diagonally augmented)
//!   adjacency matrix.
//! - [`LaplacianSpectralEmbed`] (**LSE**): decomposes a normalised Laplacian, see
//!   [`crate::laplacian`].
//!
//! Both keep the `d` eigenpairs of largest magnitude and scale each eigenvector
//! by `sqrt(|λ|)`. When `d` is not given it is picked with the Zhu & Ghodsi
//! profile-likelihood elbow on the sorted magnitudes (see [`select_dimension`]).
//!
//! Any other method (precomputed node2vec vectors, an external solver...) plugs
//! in by implementing [`Embedder`] and passing it as [`EmbedderChoice::Custom`].

use std::str::FromStr;

use log::{debug, info, trace, warn};
use smartcore::linalg::basic::arrays::{Array, Array2, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linalg::traits::evd::EVDDecomposable;

use crate::errors::{NominationError, Result};
use crate::graph::is_symmetric;
use crate::laplacian::{to_laplacian, LaplacianForm};

/// Maps an adjacency matrix to one point per vertex.
pub trait Embedder {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Embeds a validated, square adjacency matrix.
    fn fit_transform(&mut self, adjacency: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>;
}

/// Parameters shared by the built-in spectral embedders.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralParams {
    /// Embedding dimension; `None` selects it from the spectrum.
    pub n_components: Option<usize>,
    /// Number of successive elbows to find when `n_components` is `None`.
    pub n_elbows: usize,
}

impl Default for SpectralParams {
    fn default() -> Self {
        Self { n_components: None, n_elbows: 2 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AdjacencySpectralEmbed {
    pub params: SpectralParams,
    /// Add `degree / (n - 1)` to the diagonal before decomposing.
    pub diag_aug: bool,
    /// Dimension used by the last `fit_transform`.
    pub selected_dim: Option<usize>,
}

impl AdjacencySpectralEmbed {
    pub fn new() -> Self {
        Self { diag_aug: true, ..Default::default() }
    }

    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.params.n_components = Some(n_components);
        self
    }

    pub fn with_diag_aug(mut self, diag_aug: bool) -> Self {
        self.diag_aug = diag_aug;
        self
    }
}

impl Embedder for AdjacencySpectralEmbed {
    fn name(&self) -> &str {
        "ASE"
    }

    fn fit_transform(&mut self, adjacency: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let mut matrix = symmetrise(adjacency);
        if self.diag_aug {
            augment_diagonal(&mut matrix);
        }
        let (embedding, dim) = spectral_embed(&matrix, &self.params)?;
        self.selected_dim = Some(dim);
        Ok(embedding)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LaplacianSpectralEmbed {
    pub params: SpectralParams,
    pub form: LaplacianForm,
    pub selected_dim: Option<usize>,
}

impl LaplacianSpectralEmbed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.params.n_components = Some(n_components);
        self
    }

    pub fn with_form(mut self, form: LaplacianForm) -> Self {
        self.form = form;
        self
    }
}

impl Embedder for LaplacianSpectralEmbed {
    fn name(&self) -> &str {
        "LSE"
    }

    fn fit_transform(&mut self, adjacency: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let matrix = symmetrise(adjacency);
        let laplacian = to_laplacian(&matrix, self.form)?;
        let (embedding, dim) = spectral_embed(&laplacian, &self.params)?;
        self.selected_dim = Some(dim);
        Ok(embedding)
    }
}

/// Embedding algorithm selection: a built-in by name, or any [`Embedder`].
pub enum EmbedderChoice {
    Ase(AdjacencySpectralEmbed),
    Lse(LaplacianSpectralEmbed),
    Custom(Box<dyn Embedder>),
}

impl Default for EmbedderChoice {
    fn default() -> Self {
        EmbedderChoice::Ase(AdjacencySpectralEmbed::new())
    }
}

impl FromStr for EmbedderChoice {
    type Err = NominationError;

    /// Accepts `"ASE"` or `"LSE"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ASE" => Ok(EmbedderChoice::Ase(AdjacencySpectralEmbed::new())),
            "LSE" => Ok(EmbedderChoice::Lse(LaplacianSpectralEmbed::new())),
            other => Err(NominationError::Type(format!(
                "unknown embedder {:?}, expected \"ASE\", \"LSE\" or an Embedder instance",
                other
            ))),
        }
    }
}

impl EmbedderChoice {
    pub fn into_embedder(self) -> Box<dyn Embedder> {
        match self {
            EmbedderChoice::Ase(e) => Box::new(e),
            EmbedderChoice::Lse(e) => Box::new(e),
            EmbedderChoice::Custom(e) => e,
        }
    }
}

fn symmetrise(adjacency: &DenseMatrix<f64>) -> DenseMatrix<f64> {
    if is_symmetric(adjacency, 1e-12) {
        return adjacency.clone();
    }
    warn!("Adjacency matrix is not symmetric: embedding (A + A^T) / 2");
    let n = adjacency.shape().0;
    let values = (0..n).flat_map(move |i| {
        (0..n).map(move |j| 0.5 * (adjacency.get((i, j)) + adjacency.get((j, i))))
    });
    DenseMatrix::from_iterator(values, n, n, 0)
}

/// Adds the mean of absolute in/out degree over `n - 1` to each diagonal entry.
fn augment_diagonal(matrix: &mut DenseMatrix<f64>) {
    let n = matrix.shape().0;
    if n < 2 {
        return;
    }
    let divisor = (n - 1) as f64;
    let extra: Vec<f64> = (0..n)
        .map(|i| {
            let out_deg: f64 = (0..n).map(|j| matrix.get((i, j)).abs()).sum();
            let in_deg: f64 = (0..n).map(|j| matrix.get((j, i)).abs()).sum();
            0.5 * (in_deg + out_deg) / divisor
        })
        .collect();
    for (i, e) in extra.into_iter().enumerate() {
        let current = *matrix.get((i, i));
        matrix.set((i, i), current + e);
    }
    trace!("Augmented diagonal of {}x{} matrix", n, n);
}

/// Decomposes a symmetric matrix and returns `U_d · diag(sqrt|λ_d|)` with its dimension.
fn spectral_embed(matrix: &DenseMatrix<f64>, params: &SpectralParams) -> Result<(DenseMatrix<f64>, usize)> {
    let n = matrix.shape().0;
    if n == 0 {
        return Err(NominationError::Value("cannot embed an empty graph".into()));
    }
    info!("Computing spectral decomposition of {}x{} matrix", n, n);
    let evd = matrix.evd(true)?;

    // eigenpair indices by decreasing magnitude
    let mut order: Vec<usize> = (0..evd.d.len()).collect();
    order.sort_by(|&a, &b| {
        evd.d[b]
            .abs()
            .total_cmp(&evd.d[a].abs())
            .then_with(|| a.cmp(&b))
    });
    let magnitudes: Vec<f64> = order.iter().map(|&i| evd.d[i].abs()).collect();

    let dim = match params.n_components {
        Some(0) => {
            return Err(NominationError::Value(
                "n_components must be greater than 0".into(),
            ))
        }
        Some(d) if d > n => {
            return Err(NominationError::Value(format!(
                "n_components ({}) exceeds the number of vertices ({})",
                d, n
            )))
        }
        Some(d) => d,
        None => select_dimension(&magnitudes, params.n_elbows)
            .last()
            .copied()
            .unwrap_or(1),
    };
    debug!(
        "Keeping {} components, leading magnitudes {:?}",
        dim,
        &magnitudes[..dim.min(magnitudes.len())]
    );

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(dim);
    for &idx in order.iter().take(dim) {
        let scale = evd.d[idx].abs().sqrt();
        let mut column: Vec<f64> = (0..n).map(|row| *evd.V.get((row, idx))).collect();
        canonical_sign(&mut column);
        column.iter_mut().for_each(|x| *x *= scale);
        columns.push(column);
    }

    let values = (0..n).flat_map(|row| columns.iter().map(move |c| c[row]));
    let embedding = DenseMatrix::from_iterator(values, n, dim, 0);
    info!("Spectral embedding computed: {}x{}", n, dim);
    Ok((embedding, dim))
}

/// Flips `v` so that its largest-magnitude entry is positive.
fn canonical_sign(v: &mut [f64]) {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.iter_mut().for_each(|x| *x = -*x);
    }
}

/// Zhu & Ghodsi automatic dimensionality selection.
///
/// `values` must be sorted in decreasing order. Each pass splits the remaining
/// values into two Gaussian groups with pooled variance and keeps the split of
/// maximum profile likelihood; the next pass continues on the tail. Returns the
/// cumulative elbow positions (1-based counts of leading values).
pub fn select_dimension(values: &[f64], n_elbows: usize) -> Vec<usize> {
    let mut elbows = Vec::with_capacity(n_elbows);
    let mut start = 0;
    for _ in 0..n_elbows {
        let tail = &values[start..];
        if tail.len() <= 1 {
            break;
        }
        let likelihoods = profile_likelihood(tail);
        let best = likelihoods
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bl), (i, &l)| {
                if l > bl {
                    (i, l)
                } else {
                    (bi, bl)
                }
            })
            .0;
        start += best + 1;
        elbows.push(start);
    }
    trace!("Profile likelihood elbows: {:?}", elbows);
    elbows
}

fn profile_likelihood(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    (1..=n)
        .map(|q| {
            let (head, tail) = values.split_at(q);
            let mu1 = mean(head);
            let mu2 = if tail.is_empty() { 0.0 } else { mean(tail) };
            let ss = sum_sq(head, mu1) + sum_sq(tail, mu2);
            let dof = if q < n { n.saturating_sub(2) } else { n - 1 };
            let variance = (ss / dof.max(1) as f64).max(1e-12);
            log_pdf_sum(head, mu1, variance) + log_pdf_sum(tail, mu2, variance)
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_sq(values: &[f64], mu: f64) -> f64 {
    values.iter().map(|x| (x - mu).powi(2)).sum()
}

fn log_pdf_sum(values: &[f64], mu: f64, variance: f64) -> f64 {
    let norm = -0.5 * (2.0 * std::f64::consts::PI * variance).ln();
    values
        .iter()
        .map(|x| norm - (x - mu).powi(2) / (2.0 * variance))
        .sum()
}
