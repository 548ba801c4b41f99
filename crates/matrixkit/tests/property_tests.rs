//! Property tests for the algebraic laws Matrix is expected to satisfy.

use matrixkit::Matrix;
use proptest::prelude::*;

fn matrix_strategy(max_dim: usize) -> impl Strategy<Value = Matrix> {
    (0..=max_dim, 0..=max_dim).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(-1.0e6..1.0e6f64, cols), rows)
            .prop_map(|literal| Matrix::from_rows(&literal).unwrap())
    })
}

fn same_shape_pair(max_dim: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
        let cell = -1.0e3..1.0e3f64;
        (
            prop::collection::vec(prop::collection::vec(cell.clone(), cols), rows),
            prop::collection::vec(prop::collection::vec(cell, cols), rows),
        )
            .prop_map(|(a, b)| {
                (
                    Matrix::from_rows(&a).unwrap(),
                    Matrix::from_rows(&b).unwrap(),
                )
            })
    })
}

proptest! {
    #[test]
    fn zeros_shape_and_values(rows in 0usize..16, cols in 0usize..16) {
        let z = Matrix::zeros(rows, cols);
        prop_assert_eq!(z.shape(), (rows, cols));
        prop_assert!(z.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn transpose_is_an_involution(a in matrix_strategy(8)) {
        let mut b = a.clone();
        b.transpose().transpose();
        prop_assert_eq!(b, a);
    }

    #[test]
    fn static_transpose_does_not_mutate(a in matrix_strategy(8)) {
        let before = a.clone();
        let t = Matrix::transposed(&a);
        prop_assert_eq!(&a, &before);
        prop_assert_eq!(t.shape(), (a.ncols(), a.nrows()));
    }

    #[test]
    fn scalar_add_subtract_round_trip(a in matrix_strategy(8), k in -1.0e3..1.0e3f64) {
        let mut b = a.clone();
        b.add_scalar(k).sub_scalar(k);
        prop_assert!(b.approx_eq(&a, 1e-6));
    }

    #[test]
    fn literal_round_trips(a in matrix_strategy(8)) {
        let rebuilt = Matrix::from_rows(&a.to_rows()).unwrap();
        // A matrix with zero rows loses its column count in row form.
        if a.nrows() > 0 {
            prop_assert_eq!(rebuilt, a);
        }
    }

    #[test]
    fn randomize_stays_in_range(
        rows in 1usize..8,
        cols in 1usize..8,
        lo in -100.0..100.0f64,
        width in 0.001..50.0f64,
    ) {
        let mut m = Matrix::zeros(rows, cols);
        let hi = lo + width;
        m.randomize(lo, hi);
        prop_assert!(m.as_slice().iter().all(|&v| v >= lo && v < hi));
    }

    #[test]
    fn add_then_sub_matrix_round_trip((a, b) in same_shape_pair(6)) {
        let mut c = a.clone();
        c.add_matrix(&b).unwrap().sub_matrix(&b).unwrap();
        prop_assert!(c.approx_eq(&a, 1e-9));
    }

    #[test]
    fn product_transpose_identity((a, b) in same_shape_pair(5)) {
        // (A * B^T)^T == B * A^T
        let bt = Matrix::transposed(&b);
        let mut left = Matrix::matmul(&a, &bt).unwrap();
        left.transpose();
        let right = Matrix::matmul(&b, &Matrix::transposed(&a)).unwrap();
        prop_assert!(left.approx_eq(&right, 1e-6));
    }
}
