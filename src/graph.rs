use smartcore::linalg::basic::arrays::{Array, Array2, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;
use sprs::CsMat;

use log::{debug, trace};

use crate::errors::{NominationError, Result};
use crate::input::ArrayInput;

/// Adjacency matrix of the graph to nominate on.
#[derive(Clone, Debug)]
pub enum Adjacency {
    Dense(DenseMatrix<f64>),
    /// CSR adjacency, densified before embedding.
    Sparse(CsMat<f64>),
    /// Untyped array; must turn out to be a square 2-D numeric matrix.
    Array(ArrayInput),
    /// One adjacency layer per edge type. Not supported.
    Multigraph(Vec<DenseMatrix<f64>>),
}

impl Adjacency {
    /// Validates the input and returns it as a dense square matrix.
    ///
    /// Fails with `NotImplemented` for multigraphs, `Index` when the matrix is
    /// not 2-D or not square, `Type` when entries are not finite numbers.
    pub fn to_dense(&self) -> Result<DenseMatrix<f64>> {
        let matrix = match self {
            Adjacency::Multigraph(_) => {
                return Err(NominationError::NotImplemented(
                    "multigraph vertex nomination".into(),
                ))
            }
            Adjacency::Dense(m) => m.clone(),
            Adjacency::Sparse(m) => densify(m),
            Adjacency::Array(a) => a.to_matrix("adjacency matrix")?,
        };
        validate_square(&matrix)?;
        Ok(matrix)
    }

    /// Runs the checks of [`Adjacency::to_dense`] without densifying and
    /// returns the vertex count.
    pub fn validate(&self) -> Result<usize> {
        match self {
            Adjacency::Multigraph(_) => {
                return Err(NominationError::NotImplemented(
                    "multigraph vertex nomination".into(),
                ))
            }
            Adjacency::Dense(m) => {
                let (rows, cols) = m.shape();
                validate_entries(rows, cols, m.iterator(0))?;
            }
            Adjacency::Sparse(m) => validate_entries(m.rows(), m.cols(), m.data().iter())?,
            Adjacency::Array(a) => {
                if a.ndim() != 2 {
                    return Err(NominationError::Index(format!(
                        "adjacency matrix must have dimension 2, got shape {:?}",
                        a.shape
                    )));
                }
                validate_entries(a.shape[0], a.shape[1], a.values.iter())?;
            }
        }
        self.n_vertices().ok_or_else(|| {
            NominationError::Index("adjacency matrix has no vertex dimension".into())
        })
    }

    /// Number of vertices, without densifying.
    pub fn n_vertices(&self) -> Option<usize> {
        match self {
            Adjacency::Dense(m) => Some(m.shape().0),
            Adjacency::Sparse(m) => Some(m.rows()),
            Adjacency::Array(a) => a.shape.first().copied(),
            Adjacency::Multigraph(layers) => layers.first().map(|m| m.shape().0),
        }
    }
}

fn densify(sparse: &CsMat<f64>) -> DenseMatrix<f64> {
    let (rows, cols) = (sparse.rows(), sparse.cols());
    trace!("Densifying {}x{} sparse adjacency with {} non-zeros", rows, cols, sparse.nnz());
    let mut dense = DenseMatrix::<f64>::zeros(rows, cols);
    for (&w, (i, j)) in sparse.iter() {
        dense.set((i, j), w);
    }
    dense
}

fn validate_square(matrix: &DenseMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    validate_entries(rows, cols, matrix.iterator(0))
}

fn validate_entries<'a>(
    rows: usize,
    cols: usize,
    mut entries: impl Iterator<Item = &'a f64>,
) -> Result<()> {
    if rows != cols {
        return Err(NominationError::Index(format!(
            "adjacency matrix should be square, got {}x{}",
            rows, cols
        )));
    }
    if entries.any(|w| !w.is_finite()) {
        return Err(NominationError::Type(
            "adjacency matrix should have finite numeric entries".into(),
        ));
    }
    debug!("Validated {}x{} adjacency matrix", rows, cols);
    Ok(())
}

/// True when `matrix` equals its transpose within `tol`.
pub fn is_symmetric(matrix: &DenseMatrix<f64>, tol: f64) -> bool {
    let (n, m) = matrix.shape();
    n == m
        && (0..n).all(|i| (i + 1..n).all(|j| (matrix.get((i, j)) - matrix.get((j, i))).abs() <= tol))
}

/// Row sums (weighted out-degrees).
pub fn degrees(matrix: &DenseMatrix<f64>) -> Vec<f64> {
    let (n, m) = matrix.shape();
    (0..n)
        .map(|i| (0..m).map(|j| *matrix.get((i, j))).sum())
        .collect()
}
