use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::math::Matrix;

/// Describes how a freshly allocated matrix is filled.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InitConfig {
    pub rows: usize,
    pub cols: usize,

    /// Seed for uniform fills. `None` draws from the thread-local generator.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub kind: InitKind,
}

/// Supported fill strategies.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum InitKind {
    Zero,
    Identity,
    Uniform { lower: f64, upper: f64 },
}

impl Default for InitKind {
    fn default() -> Self {
        InitKind::Uniform {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl FromStr for InitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" | "zeros" => Ok(InitKind::Zero),
            "identity" => Ok(InitKind::Identity),
            "uniform" => Ok(InitKind::default()),
            _ => Err(format!(
                "Unknown init kind: {}. Expected one of: zero, identity, uniform",
                s
            )),
        }
    }
}

impl InitConfig {
    pub fn new(rows: usize, cols: usize, kind: InitKind) -> Self {
        Self {
            rows,
            cols,
            seed: None,
            kind,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Allocates a `rows x cols` matrix and fills it according to `kind`.
    pub fn build(&self) -> Matrix {
        log::trace!(
            "building {}x{} matrix with {:?} (seed: {:?})",
            self.rows,
            self.cols,
            self.kind,
            self.seed
        );

        let mut m = Matrix::zeros(self.rows, self.cols);
        match self.kind {
            InitKind::Zero => {}
            InitKind::Identity => {
                m.to_identity();
            }
            InitKind::Uniform { lower, upper } => match self.seed {
                Some(seed) => {
                    m.randomize_with(&mut StdRng::seed_from_u64(seed), lower, upper);
                }
                None => {
                    m.randomize(lower, upper);
                }
            },
        }
        m
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self::new(1, 1, InitKind::default())
    }
}
