//! Non-owning matrix views.
//!
//! A view is a window into someone else's buffer: a slice plus a shape and
//! a row stride. `stride` is the distance in elements between the starts of
//! consecutive rows, which lets a view skip over columns that belong to the
//! parent but not to the window. All mutating element-wise and matrix
//! operations are implemented here, on [`MatrixViewMut`]; [`super::Matrix`]
//! forwards to them.

use std::ops::{AddAssign, Index, IndexMut, RangeBounds};

use rand::Rng;

use crate::math::matrix::Matrix;

/// Resolves a column range against a matrix `cols` columns wide into a
/// half-open `(start, end)` pair.
pub(crate) fn resolve_column_range<R>(range: &R, cols: usize) -> (usize, usize)
where
    R: RangeBounds<usize> + ?Sized,
{
    use std::ops::Bound;

    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e + 1,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => cols,
    };
    assert!(start <= end && end <= cols, "column range out of bounds");
    assert!(start < end, "column range must be non-empty");
    (start, end)
}

/// Read-only window into a row-major buffer.
#[derive(Clone, Copy, Debug)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

/// Mutable window into a row-major buffer. Holding one exclusively borrows
/// the parent, so no other reference can observe the buffer mid-mutation.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a, T> MatrixView<'a, T> {
    /// The slice must be tight: exactly `(rows - 1) * stride + cols` long,
    /// starting at element `(0, 0)` of the window.
    pub(crate) fn from_raw_parts(data: &'a [T], rows: usize, cols: usize, stride: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        debug_assert!(stride >= cols);
        debug_assert_eq!(data.len(), (rows - 1) * stride + cols);
        MatrixView {
            data,
            rows,
            cols,
            stride,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows,
            "row index {} out of bounds for {} rows",
            row,
            self.rows
        );
        assert!(
            col < self.cols,
            "column index {} out of bounds for {} columns",
            col,
            self.cols
        );
        row * self.stride + col
    }

    pub fn row_slice(&self, row: usize) -> &'a [T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Single-row window. Keeps this view's stride and lifetime, so the
    /// result may outlive `self` (though not the underlying buffer).
    pub fn row(&self, row: usize) -> MatrixView<'a, T> {
        MatrixView::from_raw_parts(self.row_slice(row), 1, self.cols, self.stride)
    }

    /// Narrows the window to a contiguous block of columns.
    pub fn columns<R: RangeBounds<usize>>(&self, range: R) -> MatrixView<'a, T> {
        let (start, end) = resolve_column_range(&range, self.cols);
        let width = end - start;
        let len = (self.rows - 1) * self.stride + width;
        MatrixView::from_raw_parts(&self.data[start..start + len], self.rows, width, self.stride)
    }

    pub fn to_matrix(&self) -> Matrix<T>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row_slice(row));
        }
        Matrix::from_shape_vec((self.rows, self.cols), data).expect("length matches rows * cols")
    }
}

impl<'a> MatrixView<'a, f32> {
    /// Allocating matrix product; see [`MatrixViewMut::add_matmul`] for the
    /// accumulating in-place form.
    pub fn matmul(&self, rhs: MatrixView<'_, f32>) -> Matrix<f32> {
        let mut out = Matrix::zeros(self.rows, rhs.ncols());
        out.add_matmul(*self, rhs);
        out
    }
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// Same tight-slice contract as [`MatrixView::from_raw_parts`].
    pub(crate) fn from_raw_parts(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        debug_assert!(stride >= cols);
        debug_assert_eq!(data.len(), (rows - 1) * stride + cols);
        MatrixViewMut {
            data,
            rows,
            cols,
            stride,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::from_raw_parts(&self.data[..], self.rows, self.cols, self.stride)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows,
            "row index {} out of bounds for {} rows",
            row,
            self.rows
        );
        assert!(
            col < self.cols,
            "column index {} out of bounds for {} columns",
            col,
            self.cols
        );
        row * self.stride + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }
}

impl<'a, T: Copy> MatrixViewMut<'a, T> {
    pub fn fill(&mut self, value: T) {
        for row in 0..self.rows {
            self.row_slice_mut(row).fill(value);
        }
    }

    /// Copies `src` element by element. Shapes must match; strides may
    /// differ, since each row is copied through its own slice.
    pub fn copy_from(&mut self, src: MatrixView<'_, T>) {
        assert_eq!(self.shape(), src.shape(), "copy requires matching shapes");
        for row in 0..self.rows {
            self.row_slice_mut(row).copy_from_slice(src.row_slice(row));
        }
    }

    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> T,
    {
        for row in 0..self.rows {
            for value in self.row_slice_mut(row) {
                *value = f(*value);
            }
        }
    }
}

impl<'a> MatrixViewMut<'a, f32> {
    pub fn fill_uniform<R>(&mut self, low: f32, high: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let span = high - low;
        self.map_inplace(|_| low + span * rng.gen::<f32>());
    }

    /// Accumulates the product `a * b` on top of the current contents:
    /// `self[i, j] += sum_k a[i, k] * b[k, j]`. Callers wanting a plain
    /// product zero the destination first (or use [`MatrixView::matmul`]).
    ///
    /// `self` is exclusively borrowed, so neither operand can alias the
    /// destination.
    pub fn add_matmul(&mut self, a: MatrixView<'_, f32>, b: MatrixView<'_, f32>) {
        assert_eq!(
            a.ncols(),
            b.nrows(),
            "inner dimensions must agree for matrix multiply"
        );
        assert_eq!(
            self.rows,
            a.nrows(),
            "destination rows must match left operand"
        );
        assert_eq!(
            self.cols,
            b.ncols(),
            "destination columns must match right operand"
        );
        // ikj order: the inner loop runs along contiguous rows of `b` and
        // the destination.
        for i in 0..self.rows {
            for k in 0..a.ncols() {
                let scale = a[(i, k)];
                let dst = self.row_slice_mut(i);
                let src = b.row_slice(k);
                #[cfg(all(feature = "simd", target_arch = "x86_64"))]
                {
                    unsafe { axpy_simd_f32(dst, src, scale) }
                }
                #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
                {
                    axpy_scalar_f32(dst, src, scale)
                }
            }
        }
    }

    pub fn sigmoid(&mut self) {
        self.map_inplace(|x| 1.0 / (1.0 + (-x).exp()));
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let idx = self.offset(row, col);
        &mut self.data[idx]
    }
}

impl AddAssign<MatrixView<'_, f32>> for MatrixViewMut<'_, f32> {
    fn add_assign(&mut self, rhs: MatrixView<'_, f32>) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "elementwise add requires matching shapes"
        );
        for row in 0..self.rows {
            let dst = self.row_slice_mut(row);
            for (d, s) in dst.iter_mut().zip(rhs.row_slice(row)) {
                *d += *s;
            }
        }
    }
}

fn axpy_scalar_f32(dst: &mut [f32], src: &[f32], scale: f32) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d += scale * *s;
    }
}

/// SSE `dst += scale * src` over four lanes at a time, with a scalar tail.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
unsafe fn axpy_simd_f32(dst: &mut [f32], src: &[f32], scale: f32) {
    use std::arch::x86_64::*;

    let len = dst.len();
    let factor = _mm_set1_ps(scale);
    let mut i = 0;
    while i + 4 <= len {
        let d = _mm_loadu_ps(dst.as_ptr().add(i));
        let s = _mm_loadu_ps(src.as_ptr().add(i));
        _mm_storeu_ps(dst.as_mut_ptr().add(i), _mm_add_ps(d, _mm_mul_ps(factor, s)));
        i += 4;
    }
    if i < len {
        axpy_scalar_f32(&mut dst[i..], &src[i..], scale);
    }
}
