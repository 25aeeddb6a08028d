//! Batch decoding of many test cases against one read-only decoder.
//!
//! Test cases share no data except the decoder (and its immutable model), so
//! they can be decoded in any order or in parallel. Results are always
//! returned in submission order.
//!
//! With the `parallel` feature the per-case work is spread over the rayon
//! thread pool; otherwise it runs serially. Both paths produce identical
//! output.

use crate::error::Result;
use crate::labels::Label;
use crate::traits::SequenceDecoder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Drives a [`SequenceDecoder`] over an ordered list of observation sequences.
///
/// Typical usage:
/// ```
/// use hmm_decode::{
///     corpus::{LabeledRun, SequenceCorpus},
///     estimate::estimate,
///     BatchDecoder, ViterbiDecoder,
/// };
///
/// let corpus: SequenceCorpus = vec![
///     LabeledRun::new(vec![0, 1, 1, 2], vec![5, 5, 5, 6]).unwrap(),
///     LabeledRun::new(vec![0, 2, 1], vec![6, 6, 5]).unwrap(),
/// ]
/// .into_iter()
/// .collect();
/// let model = estimate(&corpus).unwrap();
/// let batch = BatchDecoder::new(ViterbiDecoder::new(model).unwrap());
/// let paths = batch.decode_all_strict(&[vec![5, 5], vec![6]]).unwrap();
/// assert_eq!(paths.len(), 2);
/// assert_eq!(paths[0].len(), 2);
/// ```
pub struct BatchDecoder<D: SequenceDecoder> {
    decoder: D,
}

impl<D: SequenceDecoder> BatchDecoder<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Expose immutable reference to the underlying decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }
}

#[cfg(feature = "parallel")]
impl<D: SequenceDecoder + Sync> BatchDecoder<D> {
    /// Decode every case, keeping one result per case in submission order.
    pub fn decode_all<S>(&self, cases: &[S]) -> Vec<Result<Vec<Label>>>
    where
        S: AsRef<[Label]> + Sync,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("decode_all", cases = cases.len(), parallel = true);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        cases
            .par_iter()
            .enumerate()
            .map(|(idx, case)| self.decode_one(idx, case.as_ref()))
            .collect()
    }

    /// Decode every case and stop at the first failure in submission order.
    ///
    /// No path is returned unless every case decoded, mirroring the file
    /// drivers' "no partial output" rule.
    pub fn decode_all_strict<S>(&self, cases: &[S]) -> Result<Vec<Vec<Label>>>
    where
        S: AsRef<[Label]> + Sync,
    {
        self.decode_all(cases).into_iter().collect()
    }
}

#[cfg(not(feature = "parallel"))]
impl<D: SequenceDecoder> BatchDecoder<D> {
    /// Decode every case, keeping one result per case in submission order.
    pub fn decode_all<S>(&self, cases: &[S]) -> Vec<Result<Vec<Label>>>
    where
        S: AsRef<[Label]>,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("decode_all", cases = cases.len(), parallel = false);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        cases
            .iter()
            .enumerate()
            .map(|(idx, case)| self.decode_one(idx, case.as_ref()))
            .collect()
    }

    /// Decode every case and stop at the first failure in submission order.
    ///
    /// No path is returned unless every case decoded, mirroring the file
    /// drivers' "no partial output" rule.
    pub fn decode_all_strict<S>(&self, cases: &[S]) -> Result<Vec<Vec<Label>>>
    where
        S: AsRef<[Label]>,
    {
        self.decode_all(cases).into_iter().collect()
    }
}

impl<D: SequenceDecoder> BatchDecoder<D> {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn decode_one(&self, idx: usize, observations: &[Label]) -> Result<Vec<Label>> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("decode_case", case = idx, len = observations.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let result = self.decoder.decode(observations);
        #[cfg(feature = "tracing")]
        let result = result.inspect_err(|err| {
            tracing::debug!(case = idx, error = %err, "test case failed to decode");
        });
        result
    }
}
