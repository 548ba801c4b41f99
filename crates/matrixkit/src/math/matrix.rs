use std::fmt;
use std::ops::{Index, IndexMut};

use log::{debug, warn};
use rand::distributions::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::display::{render, DisplayOptions};
use crate::error::{MatrixError, Result};

/// Dense row-major matrix of `f64`.
///
/// Elementwise mutators all go through [`Matrix::map`]. Operations that take a
/// second matrix check shapes before touching any cell, so a failed call leaves
/// both operands exactly as they were.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Right-hand side of [`Matrix::add`], [`Matrix::subtract`] and [`Matrix::multiply`].
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Scalar(f64),
    Matrix(&'a Matrix),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(matrix: &'a Matrix) -> Self {
        Operand::Matrix(matrix)
    }
}

impl Matrix {
    /// A `rows x cols` matrix filled with zeros.
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows.checked_mul(cols).expect("matrix size overflows usize");
        Self {
            data: vec![0.0; len],
            rows,
            cols,
        }
    }

    /// Square identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.to_identity();
        m
    }

    /// Copies a rectangular literal into a new matrix.
    ///
    /// Every row must be as long as the first one, otherwise
    /// [`MatrixError::InvalidMatrix`] is returned. An empty literal gives a
    /// `0 x 0` matrix.
    pub fn from_rows<R>(literal: &[R]) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let rows = literal.len();
        let cols = literal.first().map_or(0, |r| r.as_ref().len());

        let mut data = Vec::with_capacity(rows * cols);
        for (row, values) in literal.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(MatrixError::InvalidMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self { data, rows, cols })
    }

    /// Deep copy of `source`. Equivalent to `source.clone()`.
    pub fn copy(source: &Matrix) -> Matrix {
        source.clone()
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

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    /// Nested-row view of the data, the inverse of [`Matrix::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row_slice(r).to_vec()).collect()
    }

    /// Shape equality plus every cell within `tol` of its counterpart.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// Replaces every cell with `f(row, col, value)`, in row-major order.
    ///
    /// No shape checks happen here; callers combining two matrices validate
    /// first.
    pub fn map<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(usize, usize, f64) -> f64,
    {
        let cols = self.cols;
        for (idx, value) in self.data.iter_mut().enumerate() {
            *value = f(idx / cols, idx % cols, *value);
        }
        self
    }

    /// Fills every cell with a uniform sample from `[lower, upper)`.
    pub fn randomize(&mut self, lower: f64, upper: f64) -> &mut Self {
        self.randomize_with(&mut rand::thread_rng(), lower, upper)
    }

    /// [`Matrix::randomize`] over `[0, 1)`.
    pub fn randomize_unit(&mut self) -> &mut Self {
        self.randomize(0.0, 1.0)
    }

    /// Like [`Matrix::randomize`] but drawing from the given generator.
    ///
    /// Bounds are not validated. With `lower >= upper` or a non-finite bound
    /// every cell ends up as `lower + (upper - lower) * u` for `u` in `[0, 1)`,
    /// which is degenerate but does not fail. Finite bounds whose difference
    /// overflows `f64` are interpolated as `lower * (1 - u) + upper * u`.
    pub fn randomize_with<R>(&mut self, rng: &mut R, lower: f64, upper: f64) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        let span = upper - lower;
        if lower < upper && span.is_finite() {
            let dist = Uniform::new(lower, upper);
            return self.map(|_, _, _| rng.sample(dist));
        }

        if lower >= upper {
            warn!(
                "randomize called with lower ({}) >= upper ({}); filling a degenerate range",
                lower, upper
            );
        }
        if lower < upper && lower.is_finite() && upper.is_finite() {
            self.map(|_, _, _| {
                let u = rng.gen::<f64>();
                lower * (1.0 - u) + upper * u
            })
        } else {
            self.map(|_, _, _| lower + span * rng.gen::<f64>())
        }
    }

    /// Rounds every cell to the nearest integer, halfway cases away from zero.
    pub fn round(&mut self) -> &mut Self {
        self.map(|_, _, v| v.round())
    }

    pub fn to_zero(&mut self) -> &mut Self {
        self.map(|_, _, _| 0.0)
    }

    /// Ones on the main diagonal, zeros elsewhere. Works for any shape.
    pub fn to_identity(&mut self) -> &mut Self {
        self.map(|i, j, _| if i == j { 1.0 } else { 0.0 })
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::Mismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    pub fn add_scalar(&mut self, k: f64) -> &mut Self {
        self.map(|_, _, v| v + k)
    }

    pub fn add_matrix(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_same_shape(other, "add")?;
        Ok(self.map(|i, j, v| v + other[(i, j)]))
    }

    pub fn sub_scalar(&mut self, k: f64) -> &mut Self {
        self.map(|_, _, v| v - k)
    }

    pub fn sub_matrix(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_same_shape(other, "subtract")?;
        Ok(self.map(|i, j, v| v - other[(i, j)]))
    }

    pub fn mul_scalar(&mut self, k: f64) -> &mut Self {
        self.map(|_, _, v| v * k)
    }

    /// Elementwise (Hadamard) product with `other`, in place.
    pub fn hadamard(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_same_shape(other, "hadamard-multiply")?;
        Ok(self.map(|i, j, v| v * other[(i, j)]))
    }

    /// Adds a scalar or a same-shaped matrix.
    pub fn add<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Scalar(k) => Ok(self.add_scalar(k)),
            Operand::Matrix(other) => self.add_matrix(other),
        }
    }

    /// Subtracts a scalar or a same-shaped matrix.
    pub fn subtract<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Scalar(k) => Ok(self.sub_scalar(k)),
            Operand::Matrix(other) => self.sub_matrix(other),
        }
    }

    /// Scales by a scalar, or multiplies elementwise by a matrix.
    ///
    /// A matrix operand gives the Hadamard product, not the matrix product;
    /// use [`Matrix::matmul`] for that.
    pub fn multiply<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Scalar(k) => Ok(self.mul_scalar(k)),
            Operand::Matrix(other) => self.hadamard(other),
        }
    }

    /// Matrix product `a x b`, returned as a new `a.nrows() x b.ncols()` matrix.
    pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(MatrixError::Mismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }
        debug!(
            "matmul: ({}, {}) x ({}, {})",
            a.rows, a.cols, b.rows, b.cols
        );

        let mut product = Matrix::zeros(a.rows, b.cols);
        product.map(|i, j, _| (0..a.cols).fold(0.0, |acc, k| acc + a[(i, k)] * b[(k, j)]));
        Ok(product)
    }

    /// Transposes in place and returns `self` for chaining.
    pub fn transpose(&mut self) -> &mut Self {
        let mut staged = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                staged.push(self[(row, col)]);
            }
        }
        debug!("transpose: ({}, {}) -> ({}, {})", self.rows, self.cols, self.cols, self.rows);

        self.data = staged;
        std::mem::swap(&mut self.rows, &mut self.cols);
        self
    }

    /// Transposed copy of `input`; `input` itself is left alone.
    pub fn transposed(input: &Matrix) -> Matrix {
        let mut copy = input.clone();
        copy.transpose();
        copy
    }

    /// Writes the default table rendering to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(literal: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(&literal)
    }
}

impl TryFrom<&[Vec<f64>]> for Matrix {
    type Error = MatrixError;

    fn try_from(literal: &[Vec<f64>]) -> Result<Self> {
        Matrix::from_rows(literal)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, &DisplayOptions::default()))
    }
}
