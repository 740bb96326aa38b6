//! Seeded random graph generators.
//!
//! Undirected, loop-free, unweighted adjacency matrices drawn from a ChaCha RNG,
//! so the same seed always yields the same graph.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::{NominationError, Result};

/// Erdős–Rényi `G(n, p)`.
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Result<DenseMatrix<f64>> {
    sbm(&[n], &[vec![p]], seed)
}

/// Stochastic block model.
///
/// Vertices `0..sizes[0]` form block 0, the next `sizes[1]` block 1, and so on.
/// An edge between a vertex of block `a` and one of block `b` appears with
/// probability `probs[a][b]`; `probs` must be square and symmetric.
pub fn sbm(sizes: &[usize], probs: &[Vec<f64>], seed: u64) -> Result<DenseMatrix<f64>> {
    let n_blocks = sizes.len();
    if probs.len() != n_blocks || probs.iter().any(|row| row.len() != n_blocks) {
        return Err(NominationError::Index(format!(
            "probability matrix must be {}x{}",
            n_blocks, n_blocks
        )));
    }
    for a in 0..n_blocks {
        for b in 0..n_blocks {
            let p = probs[a][b];
            if !(0.0..=1.0).contains(&p) {
                return Err(NominationError::Value(format!(
                    "edge probability {} outside [0, 1]",
                    p
                )));
            }
            if (p - probs[b][a]).abs() > 1e-12 {
                return Err(NominationError::Value(
                    "probability matrix must be symmetric".into(),
                ));
            }
        }
    }

    let block_of: Vec<usize> = sizes
        .iter()
        .enumerate()
        .flat_map(|(b, &size)| std::iter::repeat(b).take(size))
        .collect();
    let n = block_of.len();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut values = vec![0.0; n * n];
    let mut n_edges = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random::<f64>() < probs[block_of[i]][block_of[j]] {
                values[i * n + j] = 1.0;
                values[j * n + i] = 1.0;
                n_edges += 1;
            }
        }
    }
    debug!("Sampled SBM with {} vertices, {} blocks, {} edges", n, n_blocks, n_edges);

    Ok(DenseMatrix::from_iterator(values.into_iter(), n, n, 0))
}

/// Block index of every vertex for the given block sizes.
pub fn block_labels(sizes: &[usize]) -> Vec<i64> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(b, &size)| std::iter::repeat(b as i64).take(size))
        .collect()
}
