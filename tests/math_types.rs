//! Integration tests for the Matrix type and its strided views.

use rand::rngs::StdRng;
use rand::SeedableRng;
use weft::math::Matrix;

// ---------------------------------------------------------------------------
// Matrix basics
// ---------------------------------------------------------------------------

#[test]
fn matrix_from_shape_vec() {
    let m = Matrix::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(m.nrows(), 2);
    assert_eq!(m.ncols(), 3);
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.stride(), 3);
}

#[test]
fn matrix_shape_mismatch_errors() {
    let result = Matrix::<f32>::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn matrix_indexing() {
    let m = Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    assert_eq!(m[(0, 0)], 1);
    assert_eq!(m[(0, 1)], 2);
    assert_eq!(m[(1, 0)], 3);
    assert_eq!(m[(1, 1)], 4);
}

#[test]
fn matrix_row_slice() {
    let m = Matrix::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(m.row_slice(0), &[1, 2, 3]);
    assert_eq!(m.row_slice(1), &[4, 5, 6]);
}

#[test]
fn matrix_fill_then_read_everywhere() {
    let mut m = Matrix::<f32>::zeros(2, 3);
    m.fill(0.25);
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(m[(i, j)], 0.25);
        }
    }
}

#[test]
fn matrix_zeros_ones_from_elem() {
    let z = Matrix::<f32>::zeros(2, 2);
    assert!(z.as_slice().iter().all(|&v| v == 0.0));
    let o = Matrix::<f32>::ones(2, 2);
    assert!(o.as_slice().iter().all(|&v| v == 1.0));
    let e = Matrix::from_elem(2, 2, 42);
    assert!(e.as_slice().iter().all(|&v| v == 42));
}

#[test]
#[should_panic(expected = "row index")]
fn matrix_row_out_of_bounds_panics() {
    let m = Matrix::<f32>::zeros(2, 2);
    let _ = m[(2, 0)];
}

// ---------------------------------------------------------------------------
// Views and strides
// ---------------------------------------------------------------------------

#[test]
fn row_view_aliases_parent() {
    let mut m = Matrix::from_shape_vec((2, 3), vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    m[(1, 2)] = 60.0;
    let row = m.row(1);
    assert_eq!(row.shape(), (1, 3));
    assert_eq!(row[(0, 0)], 4.0);
    assert_eq!(row[(0, 2)], 60.0);
}

#[test]
fn row_mut_writes_through_to_parent() {
    let mut m = Matrix::<f32>::zeros(2, 3);
    m.row_mut(1).fill(9.0);
    assert_eq!(m.row_slice(0), &[0.0, 0.0, 0.0]);
    assert_eq!(m.row_slice(1), &[9.0, 9.0, 9.0]);

    let mut row = m.row_mut(0);
    row[(0, 2)] = 5.0;
    assert_eq!(m[(0, 2)], 5.0);
}

#[test]
fn columns_view_keeps_parent_stride() {
    let data: Vec<f32> = (1..=12).map(|v| v as f32).collect();
    let m = Matrix::from_shape_vec((3, 4), data).unwrap();
    let v = m.columns(1..3);
    assert_eq!(v.shape(), (3, 2));
    // Rows of the window are 4 elements apart in the parent buffer.
    assert_eq!(v.stride(), 4);
    assert_eq!(v[(0, 0)], 2.0);
    assert_eq!(v[(1, 1)], 7.0);
    assert_eq!(v[(2, 1)], 11.0);
    assert_eq!(v.row_slice(1), &[6.0, 7.0]);
}

#[test]
fn row_of_columns_view() {
    let data: Vec<f32> = (1..=12).map(|v| v as f32).collect();
    let m = Matrix::from_shape_vec((3, 4), data).unwrap();
    let row = m.columns(1..3).row(2);
    assert_eq!(row.shape(), (1, 2));
    assert_eq!(row.row_slice(0), &[10.0, 11.0]);
}

#[test]
fn columns_view_to_matrix_copies_window() {
    let data: Vec<f32> = (1..=12).map(|v| v as f32).collect();
    let m = Matrix::from_shape_vec((3, 4), data).unwrap();
    let dense = m.columns(1..3).to_matrix();
    let expected =
        Matrix::from_shape_vec((3, 2), vec![2.0, 3.0, 6.0, 7.0, 10.0, 11.0]).unwrap();
    assert_eq!(dense, expected);
    assert_eq!(dense.stride(), 2);
}

#[test]
fn columns_mut_writes_through_to_parent() {
    let mut m = Matrix::<f32>::ones(3, 4);
    m.columns_mut(2..).fill(0.0);
    for i in 0..3 {
        assert_eq!(m.row_slice(i), &[1.0, 1.0, 0.0, 0.0]);
    }
}

#[test]
#[should_panic(expected = "column range must be non-empty")]
fn columns_empty_range_panics() {
    let m = Matrix::<f32>::zeros(2, 4);
    let _ = m.columns(2..2);
}

// ---------------------------------------------------------------------------
// Elementwise operations
// ---------------------------------------------------------------------------

#[test]
fn copy_from_leaves_source_independent() {
    let src = Matrix::from_shape_vec((2, 2), vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let mut dst = Matrix::<f32>::zeros(2, 2);
    dst.copy_from(&src);
    assert_eq!(dst, src);
    dst[(0, 0)] = 99.0;
    assert_eq!(src[(0, 0)], 1.0);
}

#[test]
fn sum_of_ones_doubles_and_keeps_source() {
    let mut a = Matrix::<f32>::ones(2, 2);
    let b = Matrix::<f32>::ones(2, 2);
    a += &b;
    assert!(a.as_slice().iter().all(|&v| v == 2.0));
    assert!(b.as_slice().iter().all(|&v| v == 1.0));
}

#[test]
fn sum_accepts_strided_right_hand_side() {
    let data: Vec<f32> = (1..=8).map(|v| v as f32).collect();
    let table = Matrix::from_shape_vec((2, 4), data).unwrap();
    let mut acc = Matrix::<f32>::zeros(2, 2);
    acc += table.columns(0..2);
    acc += table.columns(2..4);
    assert_eq!(acc.row_slice(0), &[4.0, 6.0]);
    assert_eq!(acc.row_slice(1), &[12.0, 14.0]);
}

#[test]
#[should_panic(expected = "elementwise add requires matching shapes")]
fn sum_shape_mismatch_panics() {
    let mut a = Matrix::<f32>::zeros(2, 2);
    let b = Matrix::<f32>::zeros(2, 3);
    a += &b;
}

#[test]
fn map_inplace_applies_everywhere() {
    let mut m = Matrix::from_shape_vec((2, 2), vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    m.map_inplace(|x| x * -1.0);
    assert_eq!(m.as_slice(), &[-1.0, -2.0, -3.0, -4.0]);
}

#[test]
fn sigmoid_stays_in_open_unit_interval() {
    let mut m = Matrix::from_shape_vec((1, 3), vec![-10.0f32, 0.0, 10.0]).unwrap();
    m.sigmoid();
    for &v in m.as_slice() {
        assert!(v > 0.0 && v < 1.0);
    }
    // Midpoint is exact, and the map preserves the input ordering.
    assert_eq!(m[(0, 1)], 0.5);
    assert!(m[(0, 0)] < m[(0, 1)]);
    assert!(m[(0, 1)] < m[(0, 2)]);
}

#[test]
fn fill_uniform_respects_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut m = Matrix::<f32>::zeros(4, 4);
    m.fill_uniform(-2.0, 3.0, &mut rng);
    for &v in m.as_slice() {
        assert!(v >= -2.0 && v < 3.0);
    }
}

#[test]
fn fill_uniform_is_reproducible_per_seed() {
    let mut a = Matrix::<f32>::zeros(3, 3);
    let mut b = Matrix::<f32>::zeros(3, 3);
    a.fill_uniform(0.0, 1.0, &mut StdRng::seed_from_u64(42));
    b.fill_uniform(0.0, 1.0, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Matrix multiply
// ---------------------------------------------------------------------------

#[test]
fn matmul_row_times_column() {
    let a = Matrix::from_shape_vec((1, 3), vec![1.0f32, 2.0, 3.0]).unwrap();
    let b = Matrix::<f32>::ones(3, 1);
    let out = a.matmul(&b);
    assert_eq!(out.shape(), (1, 1));
    assert_eq!(out[(0, 0)], 6.0);
}

#[test]
fn matmul_known_two_by_two() {
    let a = Matrix::from_shape_vec((2, 2), vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_shape_vec((2, 2), vec![5.0f32, 6.0, 7.0, 8.0]).unwrap();
    let out = a.matmul(&b);
    assert_eq!(out.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn add_matmul_accumulates_into_destination() {
    let a = Matrix::from_shape_vec((1, 1), vec![2.0f32]).unwrap();
    let b = Matrix::from_shape_vec((1, 1), vec![3.0f32]).unwrap();
    let mut dst = Matrix::<f32>::ones(1, 1);
    dst.add_matmul(a.view(), b.view());
    assert_eq!(dst[(0, 0)], 7.0);
}

#[test]
fn matmul_accepts_strided_operands() {
    let data: Vec<f32> = (1..=8).map(|v| v as f32).collect();
    let table = Matrix::from_shape_vec((2, 4), data).unwrap();
    let lhs = table.columns(0..3);
    let rhs = Matrix::<f32>::ones(3, 1);
    let out = lhs.matmul(rhs.view());
    assert_eq!(out.shape(), (2, 1));
    assert_eq!(out[(0, 0)], 1.0 + 2.0 + 3.0);
    assert_eq!(out[(1, 0)], 5.0 + 6.0 + 7.0);
}

#[test]
fn matmul_chains_associate_within_tolerance() {
    let a = Matrix::from_shape_vec((2, 3), vec![0.5f32, -1.5, 2.0, 1.0, 0.25, -0.75]).unwrap();
    let b = Matrix::from_shape_vec((3, 2), vec![1.5f32, 0.5, -2.0, 1.0, 0.25, -1.25]).unwrap();
    let c = Matrix::from_shape_vec((2, 2), vec![0.75f32, -0.5, 1.25, 2.0]).unwrap();
    let left = a.matmul(&b).matmul(&c);
    let right = a.matmul(&b.matmul(&c));
    assert_eq!(left.shape(), right.shape());
    for (l, r) in left.as_slice().iter().zip(right.as_slice()) {
        assert!((l - r).abs() < 1e-4, "left {} right {}", l, r);
    }
}

#[test]
#[should_panic(expected = "inner dimensions must agree")]
fn matmul_inner_dimension_mismatch_panics() {
    let a = Matrix::<f32>::zeros(2, 3);
    let b = Matrix::<f32>::zeros(2, 2);
    let _ = a.matmul(&b);
}
