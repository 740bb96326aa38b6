//! Untyped n-dimensional numeric input.
//!
//! Seeds, adjacency matrices and embeddings often arrive from outside as a flat
//! buffer plus a shape (a deserialised array, a column read from a file...).
//! `ArrayInput` keeps both so shape and element-type checks can be reported
//! precisely before the data is turned into a `DenseMatrix`.

use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::{NominationError, Result};

/// Row-major values with an explicit shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayInput {
    pub values: Vec<f64>,
    pub shape: Vec<usize>,
}

impl ArrayInput {
    /// Builds an input, checking that `shape` accounts for every value.
    pub fn new(values: Vec<f64>, shape: Vec<usize>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(NominationError::Index(format!(
                "shape {:?} expects {} values, got {}",
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self { values, shape })
    }

    /// One-dimensional input of shape `(n,)`.
    pub fn vector(values: Vec<f64>) -> Self {
        let n = values.len();
        Self { values, shape: vec![n] }
    }

    /// Two-dimensional input from equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(NominationError::Index(format!(
                "row {} has {} columns, expected {}",
                i,
                r.len(),
                ncols
            )));
        }
        let values = rows.iter().flatten().copied().collect();
        Ok(Self { values, shape: vec![rows.len(), ncols] })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// True when every value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.values.iter().all(|v| v.is_finite() && v.fract() == 0.0)
    }

    /// Converts a two-dimensional input into a dense matrix.
    ///
    /// `what` names the argument in the error message.
    pub fn to_matrix(&self, what: &str) -> Result<DenseMatrix<f64>> {
        if self.ndim() != 2 {
            return Err(NominationError::Index(format!(
                "{} must have dimension 2, got shape {:?}",
                what, self.shape
            )));
        }
        let (nrows, ncols) = (self.shape[0], self.shape[1]);
        Ok(DenseMatrix::from_iterator(
            self.values.iter().copied(),
            nrows,
            ncols,
            0,
        ))
    }
}
