//! Core trait definitions.
//!
//! [`SequenceDecoder`] is the seam between a decoding algorithm and the code
//! that drives it over many test cases ([`BatchDecoder`](crate::engine::BatchDecoder)).
//! The crate ships [`ViterbiDecoder`](crate::viterbi::ViterbiDecoder); tests plug
//! in exhaustive reference decoders through the same trait.

use crate::error::Result;
use crate::labels::Label;

/// Maps an observation sequence to a hidden-state path.
///
/// Contract:
/// - on success the returned path has the same length as `observations`;
/// - labels in the path are original state labels, not dense indices;
/// - implementations are read-only over their model, so one decoder may be
///   shared by many threads.
pub trait SequenceDecoder {
    fn decode(&self, observations: &[Label]) -> Result<Vec<Label>>;
}

impl<D: SequenceDecoder + ?Sized> SequenceDecoder for &D {
    fn decode(&self, observations: &[Label]) -> Result<Vec<Label>> {
        (**self).decode(observations)
    }
}
