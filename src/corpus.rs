//! In-memory training corpus: ordered runs of aligned state/observation labels.

use crate::error::{HmmError, Result};
use crate::labels::{Label, LabelIndex};

/// One labeled training run: `states[t]` emitted `observations[t]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledRun {
    states: Vec<Label>,
    observations: Vec<Label>,
}

impl LabeledRun {
    /// Pair a state sequence with its observation sequence.
    ///
    /// Fails with [`HmmError::Corpus`] if the two lengths differ.
    pub fn new(states: Vec<Label>, observations: Vec<Label>) -> Result<Self> {
        if states.len() != observations.len() {
            return Err(HmmError::Corpus(format!(
                "run has {} states but {} observations",
                states.len(),
                observations.len()
            )));
        }
        Ok(Self {
            states,
            observations,
        })
    }

    pub fn states(&self) -> &[Label] {
        &self.states
    }

    pub fn observations(&self) -> &[Label] {
        &self.observations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Aligned `(state, observation)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Label, Label)> + '_ {
        self.states
            .iter()
            .copied()
            .zip(self.observations.iter().copied())
    }

    /// Consecutive `(from, to)` state pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (Label, Label)> + '_ {
        self.states.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Ordered collection of training runs.
///
/// Run order only matters for diagnostics; estimation is a pure aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceCorpus {
    runs: Vec<LabeledRun>,
}

impl SequenceCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: LabeledRun) {
        self.runs.push(run);
    }

    pub fn runs(&self) -> &[LabeledRun] {
        &self.runs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Check that the corpus can be estimated from: at least one run, and no
    /// run without labels.
    pub fn validate(&self) -> Result<()> {
        if self.runs.is_empty() {
            return Err(HmmError::Corpus("corpus contains no runs".into()));
        }
        if let Some(pos) = self.runs.iter().position(LabeledRun::is_empty) {
            return Err(HmmError::Corpus(format!("run {} is empty", pos + 1)));
        }
        Ok(())
    }

    /// Sorted set of every state label across all runs.
    pub fn state_space(&self) -> LabelIndex {
        self.runs
            .iter()
            .flat_map(|run| run.states.iter().copied())
            .collect()
    }

    /// Sorted set of every observation label across all runs.
    pub fn observation_alphabet(&self) -> LabelIndex {
        self.runs
            .iter()
            .flat_map(|run| run.observations.iter().copied())
            .collect()
    }

    /// Total number of labeled positions.
    pub fn total_len(&self) -> usize {
        self.runs.iter().map(LabeledRun::len).sum()
    }
}

impl FromIterator<LabeledRun> for SequenceCorpus {
    fn from_iter<I: IntoIterator<Item = LabeledRun>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
        }
    }
}
