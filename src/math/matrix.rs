use std::error::Error;
use std::fmt;
use std::ops::{AddAssign, Index, IndexMut, RangeBounds};

use num_traits::{One, Zero};
use rand::Rng;

use crate::math::view::{MatrixView, MatrixViewMut};

/// Owning, row-major matrix. Element `(i, j)` lives at `data[i * cols + j]`,
/// so an owning matrix is always tightly packed; strided layouts only ever
/// appear behind [`MatrixView`] and [`MatrixViewMut`].
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Builds a matrix from a flat row-major buffer. This is the one
    /// constructor that validates shape; every other constructor funnels
    /// through it.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive");
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Matrix { data, rows, cols })
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

    /// Distance in elements between the starts of consecutive rows. An
    /// owning matrix is tightly packed, so this always equals `ncols()`.
    pub fn stride(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
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
        row * self.cols + col
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

    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView::from_raw_parts(&self.data, self.rows, self.cols, self.cols)
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut::from_raw_parts(&mut self.data, self.rows, self.cols, self.cols)
    }

    /// Read-only view of a single row. The view aliases this matrix's
    /// buffer; no elements are copied.
    pub fn row(&self, row: usize) -> MatrixView<'_, T> {
        MatrixView::from_raw_parts(self.row_slice(row), 1, self.cols, self.cols)
    }

    /// Mutable view of a single row. Writes through the view land in this
    /// matrix's buffer.
    pub fn row_mut(&mut self, row: usize) -> MatrixViewMut<'_, T> {
        let cols = self.cols;
        MatrixViewMut::from_raw_parts(self.row_slice_mut(row), 1, cols, cols)
    }

    /// Read-only view of a contiguous block of columns. The resulting view
    /// keeps this matrix's row stride, so its rows are no longer adjacent
    /// in memory.
    pub fn columns<R: RangeBounds<usize>>(&self, range: R) -> MatrixView<'_, T> {
        self.view().columns(range)
    }

    /// Mutable counterpart of [`Matrix::columns`].
    pub fn columns_mut<R: RangeBounds<usize>>(&mut self, range: R) -> MatrixViewMut<'_, T> {
        let (start, end) = crate::math::view::resolve_column_range(&range, self.cols);
        let width = end - start;
        let stride = self.cols;
        let len = (self.rows - 1) * stride + width;
        MatrixViewMut::from_raw_parts(&mut self.data[start..start + len], self.rows, width, stride)
    }
}

impl<T: Copy> Matrix<T> {
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Matrix::from_shape_vec((rows, cols), vec![value; rows * cols])
            .expect("length matches rows * cols")
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.view_mut().fill(value);
    }

    /// Copies every element of `src` into this matrix. Shapes must match.
    /// Accepts anything convertible to a view, `&Matrix` included.
    pub fn copy_from<'s>(&mut self, src: impl Into<MatrixView<'s, T>>)
    where
        T: 's,
    {
        self.view_mut().copy_from(src.into());
    }

    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: FnMut(T) -> T,
    {
        self.view_mut().map_inplace(f);
    }
}

impl<T: Copy + Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::from_elem(rows, cols, T::zero())
    }
}

impl<T: Copy + One> Matrix<T> {
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix::from_elem(rows, cols, T::one())
    }
}

impl Matrix<f32> {
    /// Overwrites every element with an independent draw from the uniform
    /// distribution over `[low, high)`.
    pub fn fill_uniform<R>(&mut self, low: f32, high: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.view_mut().fill_uniform(low, high, rng);
    }

    /// Accumulates `a * b` into this matrix without zeroing it first; see
    /// [`MatrixViewMut::add_matmul`].
    pub fn add_matmul(&mut self, a: MatrixView<'_, f32>, b: MatrixView<'_, f32>) {
        self.view_mut().add_matmul(a, b);
    }

    /// Allocating convenience over [`Matrix::add_matmul`].
    pub fn matmul(&self, rhs: &Matrix<f32>) -> Matrix<f32> {
        self.view().matmul(rhs.view())
    }

    /// Applies the logistic function `1 / (1 + e^-x)` to every element.
    pub fn sigmoid(&mut self) {
        self.view_mut().sigmoid();
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let idx = self.offset(row, col);
        &mut self.data[idx]
    }
}

impl AddAssign<MatrixView<'_, f32>> for Matrix<f32> {
    fn add_assign(&mut self, rhs: MatrixView<'_, f32>) {
        let mut dst = self.view_mut();
        dst += rhs;
    }
}

impl AddAssign<&Matrix<f32>> for Matrix<f32> {
    fn add_assign(&mut self, rhs: &Matrix<f32>) {
        *self += rhs.view();
    }
}

impl<'a, T> From<&'a Matrix<T>> for MatrixView<'a, T> {
    fn from(m: &'a Matrix<T>) -> Self {
        m.view()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeError {
    pub rows: usize,
    pub cols: usize,
    pub len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape ({}, {}) does not fit a buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
