//! The dense [`Matrix`] type and its operations.
pub mod matrix;

pub use matrix::{Matrix, Operand};
