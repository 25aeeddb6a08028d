//! The estimated model: label spaces plus transition and emission matrices.
//!
//! An [`HmmModel`] is never mutated after construction, so it can be shared
//! read-only (`&HmmModel` or `Arc<HmmModel>`) across any number of decodes.

use crate::error::{HmmError, Result};
use crate::labels::{Label, LabelIndex};
use crate::matrix::{format_row, DenseMatrix};
use std::io::Write;

/// Decimal places used when matrices are rendered as text.
pub const DEFAULT_PRECISION: usize = 5;

/// Discrete HMM over sorted label spaces.
///
/// Invariants:
/// - `transition` is `N x N`, `emission` is `N x M`;
/// - every entry is finite and non-negative;
/// - count vectors (if present) have length `N`.
#[derive(Clone, Debug, PartialEq)]
pub struct HmmModel {
    states: LabelIndex,
    observations: LabelIndex,
    transition: DenseMatrix<f64>,
    emission: DenseMatrix<f64>,
    /// Training occurrences per state.
    state_occurrences: Vec<u64>,
    /// Number of training runs starting with each state.
    run_starts: Vec<u64>,
}

impl HmmModel {
    /// Assemble a model from explicit matrices, checking the shape invariants.
    ///
    /// Models built this way carry no training statistics: occurrence and
    /// run-start counts are all zero.
    pub fn from_parts(
        states: LabelIndex,
        observations: LabelIndex,
        transition: DenseMatrix<f64>,
        emission: DenseMatrix<f64>,
    ) -> Result<Self> {
        let n = states.len();
        Self::with_counts(
            states,
            observations,
            transition,
            emission,
            vec![0; n],
            vec![0; n],
        )
    }

    pub(crate) fn with_counts(
        states: LabelIndex,
        observations: LabelIndex,
        transition: DenseMatrix<f64>,
        emission: DenseMatrix<f64>,
        state_occurrences: Vec<u64>,
        run_starts: Vec<u64>,
    ) -> Result<Self> {
        let n = states.len();
        let m = observations.len();
        if transition.n_rows() != n || transition.n_cols() != n {
            return Err(HmmError::Shape(format!(
                "transition matrix is {}x{}, expected {n}x{n}",
                transition.n_rows(),
                transition.n_cols()
            )));
        }
        if emission.n_rows() != n || emission.n_cols() != m {
            return Err(HmmError::Shape(format!(
                "emission matrix is {}x{}, expected {n}x{m}",
                emission.n_rows(),
                emission.n_cols()
            )));
        }
        let bad = transition
            .as_slice()
            .iter()
            .chain(emission.as_slice())
            .find(|v| !v.is_finite() || **v < 0.0);
        if let Some(v) = bad {
            return Err(HmmError::Shape(format!(
                "probabilities must be finite and non-negative, found {v}"
            )));
        }
        if state_occurrences.len() != n || run_starts.len() != n {
            return Err(HmmError::Shape("count vectors must have one entry per state".into()));
        }
        Ok(Self {
            states,
            observations,
            transition,
            emission,
            state_occurrences,
            run_starts,
        })
    }

    /// Sorted state space (row order of both matrices).
    pub fn states(&self) -> &LabelIndex {
        &self.states
    }

    /// Sorted observation alphabet (column order of the emission matrix).
    pub fn observations(&self) -> &LabelIndex {
        &self.observations
    }

    /// Transition matrix `A`, indexed by state index.
    pub fn transition(&self) -> &DenseMatrix<f64> {
        &self.transition
    }

    /// Emission matrix `B`, indexed by state index then observation index.
    pub fn emission(&self) -> &DenseMatrix<f64> {
        &self.emission
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn n_observations(&self) -> usize {
        self.observations.len()
    }

    /// `A[from][to]` looked up by label.
    pub fn transition_prob(&self, from: Label, to: Label) -> Option<f64> {
        let i = self.states.index_of(from)?;
        let j = self.states.index_of(to)?;
        Some(self.transition.get(i, j))
    }

    /// `B[state][obs]` looked up by label.
    pub fn emission_prob(&self, state: Label, obs: Label) -> Option<f64> {
        let i = self.states.index_of(state)?;
        let j = self.observations.index_of(obs)?;
        Some(self.emission.get(i, j))
    }

    /// How often `state` occurred in training (0 for unknown labels).
    pub fn state_occurrences(&self, state: Label) -> u64 {
        self.states
            .index_of(state)
            .map_or(0, |i| self.state_occurrences[i])
    }

    /// How many training runs began with `state` (0 for unknown labels).
    pub fn run_starts(&self, state: Label) -> u64 {
        self.states.index_of(state).map_or(0, |i| self.run_starts[i])
    }

    /// Text rendering: the `N` rows of `A`, then the `N` rows of `B`, each
    /// value with `precision` decimals, one row per line.
    pub fn render_matrices(&self, precision: usize) -> String {
        let mut out = String::new();
        for row in self.transition.rows().chain(self.emission.rows()) {
            out.push_str(&format_row(row, precision));
            out.push('\n');
        }
        out
    }

    /// Write [`render_matrices`](Self::render_matrices) with the default precision.
    pub fn write_matrices<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.render_matrices(DEFAULT_PRECISION).as_bytes())
    }
}
