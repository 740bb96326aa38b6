use crate::errors::NominationError;
use crate::input::ArrayInput;
use crate::seeds::SeedInput;

#[test]
fn test_flat_indices_get_positional_labels() {
    let seeds = SeedInput::Indices(vec![4, 9, 2, 7]).normalize().unwrap();

    assert_eq!(seeds.len(), 4);
    assert_eq!(seeds.vertices(), vec![4, 9, 2, 7]);
    assert_eq!(seeds.labels(), vec![0, 1, 2, 3]);
}

#[test]
fn test_column_array_is_unattributed() {
    let array = ArrayInput::new(vec![3.0, 1.0, 5.0], vec![3, 1]).unwrap();
    let seeds = SeedInput::Array(array).normalize().unwrap();

    assert_eq!(seeds.pairs(), &[(3, 0), (1, 1), (5, 2)]);
}

#[test]
fn test_pairs_pass_through_unchanged() {
    let pairs = vec![(0, 5), (3, 5), (8, 2)];
    let seeds = SeedInput::Labelled(pairs.clone()).normalize().unwrap();
    assert_eq!(seeds.pairs(), pairs.as_slice());

    let array = ArrayInput::from_rows(&[vec![0.0, 5.0], vec![3.0, 5.0], vec![8.0, 2.0]]).unwrap();
    let seeds = SeedInput::Array(array).normalize().unwrap();
    assert_eq!(seeds.pairs(), pairs.as_slice());
}

#[test]
fn test_unique_labels_sorted_without_duplicates() {
    let seeds = SeedInput::Labelled(vec![(0, 5), (1, -1), (2, 5), (3, 2)])
        .normalize()
        .unwrap();
    assert_eq!(seeds.unique_labels(), vec![-1, 2, 5]);
}

#[test]
fn test_fractional_seed_is_type_error() {
    let array = ArrayInput::vector(vec![0.0, 1.5, 2.0]);
    let err = SeedInput::Array(array).normalize().unwrap_err();
    assert!(matches!(err, NominationError::Type(_)), "got {:?}", err);
}

#[test]
fn test_three_columns_is_index_error() {
    let array = ArrayInput::new(vec![0.0; 15], vec![5, 3]).unwrap();
    let err = SeedInput::Array(array).normalize().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);
}

#[test]
fn test_three_dimensions_is_index_error() {
    let array = ArrayInput::new(vec![0.0; 8], vec![2, 2, 2]).unwrap();
    let err = SeedInput::Array(array).normalize().unwrap_err();
    assert!(matches!(err, NominationError::Index(_)), "got {:?}", err);
}

#[test]
fn test_type_checked_before_shape() {
    let array = ArrayInput::new(vec![0.5; 15], vec![5, 3]).unwrap();
    let err = SeedInput::Array(array).normalize().unwrap_err();
    assert!(matches!(err, NominationError::Type(_)), "got {:?}", err);
}

#[test]
fn test_vertex_indices_range_checked() {
    let seeds = SeedInput::Indices(vec![0, 3]).normalize().unwrap();
    assert_eq!(seeds.vertex_indices(4).unwrap(), vec![0, 3]);
    assert!(matches!(
        seeds.vertex_indices(3),
        Err(NominationError::Index(_))
    ));

    let negative = SeedInput::Indices(vec![-1]).normalize().unwrap();
    assert!(matches!(
        negative.vertex_indices(10),
        Err(NominationError::Index(_))
    ));
}

#[test]
fn test_array_input_shape_mismatch() {
    assert!(matches!(
        ArrayInput::new(vec![1.0, 2.0, 3.0], vec![2, 2]),
        Err(NominationError::Index(_))
    ));
    assert!(matches!(
        ArrayInput::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
        Err(NominationError::Index(_))
    ));
}
