use approx::assert_abs_diff_eq;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::eigenmaps::{
    select_dimension, AdjacencySpectralEmbed, Embedder, EmbedderChoice, LaplacianSpectralEmbed,
};
use crate::errors::NominationError;
use crate::laplacian::LaplacianForm;
use crate::operators::{rows_of, Metric};
use crate::sampling::{block_labels, sbm};

use super::test_helpers::ring4;

fn two_block_graph() -> (DenseMatrix<f64>, Vec<i64>) {
    let sizes = [20, 20];
    let probs = vec![vec![0.9, 0.05], vec![0.05, 0.9]];
    (sbm(&sizes, &probs, 42).unwrap(), block_labels(&sizes))
}

/// Mean distance between vertices of the same block and of different blocks.
fn block_separation(embedding: &DenseMatrix<f64>, blocks: &[i64]) -> (f64, f64) {
    let rows = rows_of(embedding);
    let (mut within, mut n_within, mut between, mut n_between) = (0.0, 0, 0.0, 0);
    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let d = Metric::Euclidean.distance(&rows[i], &rows[j]);
            if blocks[i] == blocks[j] {
                within += d;
                n_within += 1;
            } else {
                between += d;
                n_between += 1;
            }
        }
    }
    (within / n_within as f64, between / n_between as f64)
}

#[test]
fn test_ase_shape_and_block_structure() {
    let (adjacency, blocks) = two_block_graph();
    let mut ase = AdjacencySpectralEmbed::new().with_n_components(2);
    let embedding = ase.fit_transform(&adjacency).unwrap();

    assert_eq!(embedding.shape(), (40, 2));
    assert_eq!(ase.selected_dim, Some(2));

    let (within, between) = block_separation(&embedding, &blocks);
    assert!(
        within < between,
        "same-block vertices should be closer: within={:.4}, between={:.4}",
        within,
        between
    );
}

#[test]
fn test_lse_shape_and_block_structure() {
    let (adjacency, blocks) = two_block_graph();
    for form in [LaplacianForm::Dad, LaplacianForm::RDad(None)] {
        let mut lse = LaplacianSpectralEmbed::new().with_n_components(2).with_form(form);
        let embedding = lse.fit_transform(&adjacency).unwrap();
        assert_eq!(embedding.shape(), (40, 2));

        let (within, between) = block_separation(&embedding, &blocks);
        assert!(within < between, "{}: within={:.4}, between={:.4}", form, within, between);
    }
}

#[test]
fn test_ase_columns_scaled_by_eigenvalue_magnitude() {
    // each column has squared norm |λ|; the 4-cycle has eigenvalues 2, 0, 0, -2
    let mut ase = AdjacencySpectralEmbed::new()
        .with_n_components(2)
        .with_diag_aug(false);
    let x = ase.fit_transform(&ring4()).unwrap();

    let norms: Vec<f64> = (0..2)
        .map(|c| (0..4).map(|r| x.get((r, c)).powi(2)).sum::<f64>())
        .collect();
    assert_abs_diff_eq!(norms[0], 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(norms[1], 2.0, epsilon = 1e-8);
}

#[test]
fn test_embedding_is_deterministic() {
    let (adjacency, _) = two_block_graph();
    let a = AdjacencySpectralEmbed::new().with_n_components(3).fit_transform(&adjacency).unwrap();
    let b = AdjacencySpectralEmbed::new().with_n_components(3).fit_transform(&adjacency).unwrap();
    for r in 0..40 {
        for c in 0..3 {
            assert_abs_diff_eq!(*a.get((r, c)), *b.get((r, c)), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_automatic_dimension_on_two_blocks() {
    let (adjacency, _) = two_block_graph();
    let mut ase = AdjacencySpectralEmbed::new();
    let embedding = ase.fit_transform(&adjacency).unwrap();

    let dim = ase.selected_dim.unwrap();
    assert!((1..=40).contains(&dim), "selected dimension {}", dim);
    assert_eq!(embedding.shape(), (40, dim));
}

#[test]
fn test_select_dimension_elbows() {
    let values = [10.0, 9.0, 1.0, 0.9, 0.8, 0.1];
    assert_eq!(select_dimension(&values, 1), vec![2]);
    assert_eq!(select_dimension(&values, 2), vec![2, 5]);
    assert!(select_dimension(&[3.0], 2).is_empty());
}

#[test]
fn test_invalid_n_components() {
    let err = AdjacencySpectralEmbed::new()
        .with_n_components(0)
        .fit_transform(&ring4())
        .unwrap_err();
    assert!(matches!(err, NominationError::Value(_)));

    let err = AdjacencySpectralEmbed::new()
        .with_n_components(5)
        .fit_transform(&ring4())
        .unwrap_err();
    assert!(matches!(err, NominationError::Value(_)));
}

#[test]
fn test_directed_input_is_symmetrised() {
    let directed = DenseMatrix::from_2d_vec(&vec![
        vec![0.0, 2.0, 0.0],
        vec![0.0, 0.0, 2.0],
        vec![2.0, 0.0, 0.0],
    ])
    .unwrap();
    let undirected = DenseMatrix::from_2d_vec(&vec![
        vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
    ])
    .unwrap();
    let a = AdjacencySpectralEmbed::new().with_n_components(1).fit_transform(&directed).unwrap();
    let b = AdjacencySpectralEmbed::new().with_n_components(1).fit_transform(&undirected).unwrap();
    for r in 0..3 {
        assert_abs_diff_eq!(*a.get((r, 0)), *b.get((r, 0)), epsilon = 1e-10);
    }
}

#[test]
fn test_embedder_names() {
    assert_eq!("ASE".parse::<EmbedderChoice>().unwrap().into_embedder().name(), "ASE");
    assert_eq!("LSE".parse::<EmbedderChoice>().unwrap().into_embedder().name(), "LSE");
    assert!(matches!(
        "PCA".parse::<EmbedderChoice>(),
        Err(NominationError::Type(_))
    ));
}
