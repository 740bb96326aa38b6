use std::cell::Cell;
use std::rc::Rc;

use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::eigenmaps::Embedder;
use crate::errors::Result;

/// Four points on the unit square, in ring order 0-1-2-3.
pub fn unit_square() -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
    ])
    .unwrap()
}

/// Adjacency of the 4-cycle 0-1-2-3-0.
pub fn ring4() -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&vec![
        vec![0.0, 1.0, 0.0, 1.0],
        vec![1.0, 0.0, 1.0, 0.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![1.0, 0.0, 1.0, 0.0],
    ])
    .unwrap()
}

/// Points on a line at the given positions.
pub fn line(positions: &[f64]) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = positions.iter().map(|&x| vec![x]).collect();
    DenseMatrix::from_2d_vec(&rows).unwrap()
}

/// Returns a fixed embedding and counts how often it was asked for one.
pub struct FixedEmbedder {
    pub embedding: DenseMatrix<f64>,
    pub calls: Rc<Cell<usize>>,
}

impl FixedEmbedder {
    pub fn new(embedding: DenseMatrix<f64>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (Self { embedding, calls: calls.clone() }, calls)
    }
}

impl Embedder for FixedEmbedder {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fit_transform(&mut self, _adjacency: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.embedding.clone())
    }
}
