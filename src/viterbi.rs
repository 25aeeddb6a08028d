//! Viterbi decoding over an estimated [`HmmModel`].
//!
//! The decoder works directly in probability space: scores are products of
//! transition and emission probabilities with no log transform. Long or
//! improbable sequences can therefore underflow to zero, at which point the
//! tie-break rule below decides the path.
//!
//! Layout of the search:
//! - the candidate set `S` is the sorted state space minus the start
//!   pseudo-state;
//! - `t = 0`: `score[0][s] = A[start][s] * B[s][o_0]`, predecessor = start;
//! - `t > 0`: `score[t][s] = max_p score[t-1][p] * A[p][s] * B[s][o_t]` over
//!   `p` in `S`, evaluated left to right;
//! - every maximisation (recurrence and termination) uses
//!   [`first_strict_max`]: the first candidate in sorted order wins ties;
//! - the path is recovered by following backpointers from the terminal state.

use crate::builder::{DecoderBuilder, DecoderConfig};
use crate::error::{HmmError, Result};
use crate::labels::Label;
use crate::matrix::DenseMatrix;
use crate::model::HmmModel;
use crate::traits::SequenceDecoder;
use crate::utils::first_strict_max;
use std::sync::Arc;

/// Most probable path plus the probability of that path.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub path: Vec<Label>,
    pub score: f64,
}

/// Full dynamic-programming table for one observation sequence.
///
/// Columns follow the decoder's candidate order (ascending labels).
#[derive(Clone, Debug)]
pub struct Trellis {
    candidates: Vec<Label>,
    start_state: Label,
    /// `scores[t][c]`: best path probability ending in candidate `c` at `t`.
    scores: DenseMatrix<f64>,
    /// `back[t][c]`: candidate column of the predecessor (unused at `t = 0`).
    back: DenseMatrix<usize>,
}

impl Trellis {
    /// Number of time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.n_rows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate state labels, in column order.
    pub fn candidates(&self) -> &[Label] {
        &self.candidates
    }

    /// Best score of a path ending in `state` at time `t`.
    pub fn score(&self, t: usize, state: Label) -> Option<f64> {
        let c = self.column(state)?;
        (t < self.len()).then(|| self.scores.get(t, c))
    }

    /// Predecessor label chosen for `state` at time `t`; the start
    /// pseudo-state for `t = 0`.
    pub fn predecessor(&self, t: usize, state: Label) -> Option<Label> {
        let c = self.column(state)?;
        if t >= self.len() {
            return None;
        }
        if t == 0 {
            return Some(self.start_state);
        }
        Some(self.candidates[self.back.get(t, c)])
    }

    /// Terminal argmax and backtrace.
    fn best_path(&self) -> Result<Decoded> {
        let last = self.len().checked_sub(1).ok_or(HmmError::EmptySequence)?;
        let (mut c, score) = first_strict_max(self.scores.row(last).iter().copied().enumerate())
            .ok_or(HmmError::NoCandidateStates)?;

        let mut path = Vec::with_capacity(self.len());
        path.push(self.candidates[c]);
        for t in (1..=last).rev() {
            c = self.back.get(t, c);
            path.push(self.candidates[c]);
        }
        path.reverse();
        Ok(Decoded { path, score })
    }

    fn column(&self, state: Label) -> Option<usize> {
        self.candidates.binary_search(&state).ok()
    }
}

/// Viterbi decoder bound to one model and start pseudo-state.
///
/// Build with [`ViterbiDecoder::new`] (default configuration) or through
/// [`DecoderBuilder`].
#[derive(Clone, Debug)]
pub struct ViterbiDecoder {
    model: Arc<HmmModel>,
    config: DecoderConfig,
    /// Dense index of the start pseudo-state.
    start: usize,
    /// Dense indices of all other states, ascending.
    candidates: Vec<usize>,
}

impl ViterbiDecoder {
    /// Decoder with the default start pseudo-state (label `0`).
    pub fn new(model: impl Into<Arc<HmmModel>>) -> Result<Self> {
        DecoderBuilder::new(model).build()
    }

    pub(crate) fn from_parts(
        model: Arc<HmmModel>,
        config: DecoderConfig,
        start: usize,
        candidates: Vec<usize>,
    ) -> Self {
        debug_assert!(!candidates.is_empty());
        debug_assert!(!candidates.contains(&start));
        Self {
            model,
            config,
            start,
            candidates,
        }
    }

    pub fn model(&self) -> &HmmModel {
        &self.model
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Labels that may appear in a decoded path, ascending.
    pub fn candidate_states(&self) -> Vec<Label> {
        let states = self.model.states();
        self.candidates.iter().map(|&i| states.label_at(i)).collect()
    }

    /// Most probable hidden-state path for `observations`.
    pub fn decode(&self, observations: &[Label]) -> Result<Vec<Label>> {
        self.decode_with_score(observations).map(|d| d.path)
    }

    /// Like [`decode`](Self::decode), also returning the path probability.
    pub fn decode_with_score(&self, observations: &[Label]) -> Result<Decoded> {
        self.trellis(observations)?.best_path()
    }

    /// Fill the complete score/backpointer table for `observations`.
    pub fn trellis(&self, observations: &[Label]) -> Result<Trellis> {
        let columns = self.observation_columns(observations)?;
        let a = self.model.transition();
        let b = self.model.emission();
        let k = self.candidates.len();

        let mut scores = DenseMatrix::<f64>::zeros(columns.len(), k);
        let mut back = DenseMatrix::<usize>::zeros(columns.len(), k);

        let o0 = columns[0];
        for (c, &s) in self.candidates.iter().enumerate() {
            scores.set(0, c, a.get(self.start, s) * b.get(s, o0));
        }

        for (t, &obs_col) in columns.iter().enumerate().skip(1) {
            for (c_to, &s_to) in self.candidates.iter().enumerate() {
                let emit = b.get(s_to, obs_col);
                let prev = scores.row(t - 1);
                let (arg, best) = first_strict_max(
                    self.candidates
                        .iter()
                        .enumerate()
                        .map(|(c_from, &s_from)| (c_from, prev[c_from] * a.get(s_from, s_to) * emit)),
                )
                .ok_or(HmmError::NoCandidateStates)?;
                scores.set(t, c_to, best);
                back.set(t, c_to, arg);
            }
        }

        Ok(Trellis {
            candidates: self.candidate_states(),
            start_state: self.config.start_state,
            scores,
            back,
        })
    }

    /// Map labels to emission columns, rejecting empty input and labels
    /// outside the training alphabet before any DP work is done.
    fn observation_columns(&self, observations: &[Label]) -> Result<Vec<usize>> {
        if observations.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        let alphabet = self.model.observations();
        observations
            .iter()
            .enumerate()
            .map(|(position, &label)| {
                alphabet
                    .index_of(label)
                    .ok_or(HmmError::UnknownObservation { label, position })
            })
            .collect()
    }
}

impl SequenceDecoder for ViterbiDecoder {
    fn decode(&self, observations: &[Label]) -> Result<Vec<Label>> {
        ViterbiDecoder::decode(self, observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelIndex;

    /// States {0 (start), 1, 2}, observations {5, 6}.
    fn two_state_model() -> HmmModel {
        HmmModel::from_parts(
            LabelIndex::from_labels([0, 1, 2]),
            LabelIndex::from_labels([5, 6]),
            DenseMatrix::from_rows(vec![
                vec![0.0, 0.6, 0.4],
                vec![0.0, 0.7, 0.3],
                vec![0.0, 0.4, 0.6],
            ])
            .unwrap(),
            DenseMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.9, 0.1], vec![0.2, 0.8]]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn init_column_seeds_from_start_state() {
        let dec = ViterbiDecoder::new(two_state_model()).unwrap();
        let tr = dec.trellis(&[5]).unwrap();
        assert!((tr.score(0, 1).unwrap() - 0.54).abs() < 1e-12);
        assert!((tr.score(0, 2).unwrap() - 0.08).abs() < 1e-12);
        assert_eq!(tr.predecessor(0, 2), Some(0));
        assert_eq!(tr.score(0, 0), None);
    }

    #[test]
    fn worked_example_two_steps() {
        let dec = ViterbiDecoder::new(two_state_model()).unwrap();
        let tr = dec.trellis(&[5, 6]).unwrap();
        // state 1 at t=1: max(0.54*0.7, 0.08*0.4) * 0.1 = 0.0378 via 1
        // state 2 at t=1: max(0.54*0.3, 0.08*0.6) * 0.8 = 0.1296 via 1
        assert!((tr.score(1, 1).unwrap() - 0.0378).abs() < 1e-12);
        assert!((tr.score(1, 2).unwrap() - 0.1296).abs() < 1e-12);
        assert_eq!(tr.predecessor(1, 1), Some(1));
        assert_eq!(tr.predecessor(1, 2), Some(1));

        let decoded = dec.decode_with_score(&[5, 6]).unwrap();
        assert_eq!(decoded.path, vec![1, 2]);
        assert!((decoded.score - 0.1296).abs() < 1e-12);
    }

    #[test]
    fn unknown_observation_reports_position() {
        let dec = ViterbiDecoder::new(two_state_model()).unwrap();
        let err = dec.decode(&[5, 6, 7]).unwrap_err();
        assert!(matches!(
            err,
            HmmError::UnknownObservation {
                label: 7,
                position: 2
            }
        ));
    }

    #[test]
    fn empty_sequence_rejected() {
        let dec = ViterbiDecoder::new(two_state_model()).unwrap();
        assert!(matches!(dec.decode(&[]), Err(HmmError::EmptySequence)));
    }

    #[test]
    fn all_zero_column_falls_back_to_first_candidate() {
        // Emission of 6 is zero everywhere: every score at t=1 is 0.
        let model = HmmModel::from_parts(
            LabelIndex::from_labels([0, 1, 2]),
            LabelIndex::from_labels([5, 6]),
            DenseMatrix::from_rows(vec![
                vec![0.0, 0.5, 0.5],
                vec![0.0, 0.5, 0.5],
                vec![0.0, 0.5, 0.5],
            ])
            .unwrap(),
            DenseMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![0.9, 0.0]]).unwrap(),
        )
        .unwrap();
        let dec = ViterbiDecoder::new(model).unwrap();
        let decoded = dec.decode_with_score(&[5, 6]).unwrap();
        assert_eq!(decoded.score, 0.0);
        assert_eq!(decoded.path, vec![1, 1]);
    }
}
