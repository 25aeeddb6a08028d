//! Supervised parameter estimation from a labeled corpus.
//!
//! Estimation is a pure aggregate over the corpus:
//! 1. Collect the sorted state space and observation alphabet.
//! 2. Count transitions `(s_t, s_{t+1})`, emissions `(s_t, o_t)` and state
//!    occurrences into dense count matrices indexed through those label maps.
//! 3. Normalise each row by its total. A row with a zero total stays all zero;
//!    it is *not* replaced with a uniform distribution.
//!
//! The resulting matrices keep full `f64` precision; rounding only happens
//! when they are rendered.

use crate::corpus::SequenceCorpus;
use crate::error::{HmmError, Result};
use crate::labels::{Label, LabelIndex};
use crate::matrix::DenseMatrix;
use crate::model::HmmModel;

/// Raw counts gathered in one pass over a corpus.
#[derive(Clone, Debug)]
pub struct Counts {
    pub states: LabelIndex,
    pub observations: LabelIndex,
    /// `transitions[i][j]` = number of `i -> j` steps.
    pub transitions: DenseMatrix<u64>,
    /// `emissions[i][k]` = number of times state `i` emitted symbol `k`.
    pub emissions: DenseMatrix<u64>,
    /// Occurrences of each state.
    pub occurrences: Vec<u64>,
    /// Runs whose first state is `i`.
    pub run_starts: Vec<u64>,
}

/// Turns a [`SequenceCorpus`] into an [`HmmModel`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParameterEstimator;

impl ParameterEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Count transitions, emissions and occurrences over every run.
    pub fn count(&self, corpus: &SequenceCorpus) -> Result<Counts> {
        corpus.validate()?;

        let states = corpus.state_space();
        let observations = corpus.observation_alphabet();
        let n = states.len();
        let m = observations.len();

        let mut transitions = DenseMatrix::<u64>::zeros(n, n);
        let mut emissions = DenseMatrix::<u64>::zeros(n, m);
        let mut occurrences = vec![0u64; n];
        let mut run_starts = vec![0u64; n];

        for run in corpus.runs() {
            let first = run.states()[0];
            run_starts[state_index(&states, first)?] += 1;

            for (from, to) in run.transitions() {
                transitions.increment(state_index(&states, from)?, state_index(&states, to)?);
            }
            for (s, o) in run.pairs() {
                let i = state_index(&states, s)?;
                let k = observations.index_of(o).ok_or_else(|| {
                    HmmError::Corpus(format!("observation {o} missing from alphabet"))
                })?;
                emissions.increment(i, k);
                occurrences[i] += 1;
            }
        }

        Ok(Counts {
            states,
            observations,
            transitions,
            emissions,
            occurrences,
            run_starts,
        })
    }

    /// Estimate `A` and `B` by row-normalising the corpus counts.
    pub fn estimate(&self, corpus: &SequenceCorpus) -> Result<HmmModel> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("estimate", runs = corpus.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let counts = self.count(corpus)?;
        let n = counts.states.len();
        let m = counts.observations.len();

        let mut transition = DenseMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            let total_out = counts.transitions.row_total(i);
            normalize_row(counts.transitions.row(i), total_out, transition.row_mut(i));
        }

        let mut emission = DenseMatrix::<f64>::zeros(n, m);
        for i in 0..n {
            normalize_row(counts.emissions.row(i), counts.occurrences[i], emission.row_mut(i));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            states = n,
            observations = m,
            positions = corpus.total_len(),
            "estimated transition and emission matrices"
        );

        HmmModel::with_counts(
            counts.states,
            counts.observations,
            transition,
            emission,
            counts.occurrences,
            counts.run_starts,
        )
    }
}

/// Estimate a model with the default estimator.
pub fn estimate(corpus: &SequenceCorpus) -> Result<HmmModel> {
    ParameterEstimator::new().estimate(corpus)
}

/// `out[j] = counts[j] / total`, or all zeros when `total == 0`.
fn normalize_row(counts: &[u64], total: u64, out: &mut [f64]) {
    debug_assert_eq!(counts.len(), out.len());
    if total == 0 {
        out.iter_mut().for_each(|v| *v = 0.0);
        return;
    }
    let denom = total as f64;
    for (dst, &c) in out.iter_mut().zip(counts) {
        *dst = c as f64 / denom;
    }
}

fn state_index(states: &LabelIndex, label: Label) -> Result<usize> {
    states
        .index_of(label)
        .ok_or_else(|| HmmError::Corpus(format!("state {label} missing from state space")))
}
