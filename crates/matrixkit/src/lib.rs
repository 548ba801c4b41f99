//! matrixkit: small dense-matrix arithmetic.
//!
//! The crate centres on [`Matrix`], a row-major `f64` matrix with in-place
//! elementwise transforms, scalar and Hadamard arithmetic, the matrix product
//! and transposition. Binary operations check shapes up front and report
//! [`MatrixError`] without touching either operand.
//!
//! [`config::InitConfig`] describes serializable fill strategies and
//! [`display`] holds the console rendering used by `Display` and the CLI.
pub mod config;
pub mod display;
pub mod error;
pub mod math;

pub use error::{MatrixError, Result};
pub use math::{Matrix, Operand};
