use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use sprs::TriMat;

use crate::errors::NominationError;
use crate::graph::{degrees, is_symmetric, Adjacency};
use crate::input::ArrayInput;

use super::test_helpers::ring4;

#[test]
fn test_dense_square_adjacency_is_accepted() {
    let dense = Adjacency::Dense(ring4()).to_dense().unwrap();
    assert_eq!(dense.shape(), (4, 4));
    assert!(is_symmetric(&dense, 1e-12));
    assert_eq!(degrees(&dense), vec![2.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_non_square_adjacency_is_index_error() {
    let rect = DenseMatrix::from_2d_vec(&vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 1.0]]).unwrap();
    let err = Adjacency::Dense(rect).to_dense().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);
}

#[test]
fn test_array_adjacency_must_be_two_dimensional() {
    let cube = ArrayInput::new(vec![0.0; 8], vec![2, 2, 2]).unwrap();
    let err = Adjacency::Array(cube).to_dense().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);

    let flat = ArrayInput::vector(vec![0.0, 1.0, 1.0, 0.0]);
    assert!(matches!(
        Adjacency::Array(flat).to_dense(),
        Err(NominationError::Index(_))
    ));
}

#[test]
fn test_non_finite_adjacency_is_type_error() {
    let array = ArrayInput::new(vec![0.0, f64::NAN, 1.0, 0.0], vec![2, 2]).unwrap();
    let err = Adjacency::Array(array).to_dense().unwrap_err();
    assert!(matches!(err, NominationError::Type(_)), "got {:?}", err);
}

#[test]
fn test_multigraph_not_implemented() {
    let err = Adjacency::Multigraph(vec![ring4(), ring4()]).to_dense().unwrap_err();
    assert!(matches!(err, NominationError::NotImplemented(_)), "got {:?}", err);
}

#[test]
fn test_sparse_adjacency_densified() {
    let mut tri = TriMat::new((4, 4));
    for &(i, j) in &[(0, 1), (1, 2), (2, 3), (3, 0)] {
        tri.add_triplet(i, j, 1.0);
        tri.add_triplet(j, i, 1.0);
    }
    let sparse = Adjacency::Sparse(tri.to_csr());
    assert_eq!(sparse.n_vertices(), Some(4));

    let dense = sparse.to_dense().unwrap();
    let expected = ring4();
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(dense.get((i, j)), expected.get((i, j)), "entry ({}, {})", i, j);
        }
    }
}

#[test]
fn test_validate_matches_to_dense() {
    assert_eq!(Adjacency::Dense(ring4()).validate().unwrap(), 4);

    let mut tri = TriMat::new((3, 3));
    tri.add_triplet(0, 1, 1.0);
    tri.add_triplet(1, 0, 1.0);
    assert_eq!(Adjacency::Sparse(tri.to_csr()).validate().unwrap(), 3);

    let mut rect = TriMat::new((3, 2));
    rect.add_triplet(0, 1, 1.0);
    let err = Adjacency::Sparse(rect.to_csr()).validate().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);

    let mut bad = TriMat::new((2, 2));
    bad.add_triplet(0, 1, f64::INFINITY);
    let err = Adjacency::Sparse(bad.to_csr()).validate().unwrap_err();
    assert!(matches!(err, NominationError::Type(_)), "got {:?}", err);

    let vector = ArrayInput::vector(vec![0.0, 1.0]);
    let err = Adjacency::Array(vector).validate().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);

    let err = Adjacency::Multigraph(vec![ring4()]).validate().unwrap_err();
    assert!(matches!(err, NominationError::NotImplemented(_)), "got {:?}", err);
}

#[test]
fn test_asymmetric_detected() {
    let directed = DenseMatrix::from_2d_vec(&vec![vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
    assert!(!is_symmetric(&directed, 1e-12));
}
