//! Dense row-major matrix types and their strided, non-owning views.

pub mod matrix;
pub mod view;

pub use matrix::{Matrix, ShapeError};
pub use view::{MatrixView, MatrixViewMut};
