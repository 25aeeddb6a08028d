//! Decoder configuration and construction.
//!
//! Decoding seeds the first time step from a reserved *start pseudo-state*
//! and never emits that state in a decoded path. Its label defaults to `0`
//! and is configurable here instead of being hard-coded in the decoder.

use crate::error::{HmmError, Result};
use crate::labels::Label;
use crate::model::HmmModel;
use crate::viterbi::ViterbiDecoder;
use std::sync::Arc;

/// Label reserved for the start pseudo-state unless configured otherwise.
pub const DEFAULT_START_STATE: Label = 0;

/// What to do when training data uses the start label as an ordinary state,
/// i.e. somewhere other than the first position of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteriorStartPolicy {
    /// Log a warning and decode anyway.
    #[default]
    Warn,
    /// Refuse to build the decoder.
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Label of the start pseudo-state.
    pub start_state: Label,
    pub interior_start: InteriorStartPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            start_state: DEFAULT_START_STATE,
            interior_start: InteriorStartPolicy::default(),
        }
    }
}

pub struct DecoderBuilder {
    model: Arc<HmmModel>,
    config: DecoderConfig,
}

impl DecoderBuilder {
    pub fn new(model: impl Into<Arc<HmmModel>>) -> Self {
        Self {
            model: model.into(),
            config: DecoderConfig::default(),
        }
    }
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_start_state(mut self, label: Label) -> Self {
        self.config.start_state = label;
        self
    }
    pub fn with_interior_start(mut self, policy: InteriorStartPolicy) -> Self {
        self.config.interior_start = policy;
        self
    }

    /// Validate the configuration against the model and build the decoder.
    ///
    /// Fails with [`HmmError::MissingStartState`] if the start label is not a
    /// state of the model, [`HmmError::NoCandidateStates`] if it is the only
    /// one, and [`HmmError::StartStateCollision`] under
    /// [`InteriorStartPolicy::Reject`] when training used it mid-run.
    pub fn build(self) -> Result<ViterbiDecoder> {
        let DecoderConfig {
            start_state,
            interior_start,
        } = self.config;
        let states = self.model.states();

        let start = states
            .index_of(start_state)
            .ok_or(HmmError::MissingStartState(start_state))?;
        let candidates: Vec<usize> = (0..states.len()).filter(|&i| i != start).collect();
        if candidates.is_empty() {
            return Err(HmmError::NoCandidateStates);
        }

        let interior = self
            .model
            .state_occurrences(start_state)
            .saturating_sub(self.model.run_starts(start_state));
        if interior > 0 {
            match interior_start {
                InteriorStartPolicy::Reject => {
                    return Err(HmmError::StartStateCollision {
                        label: start_state,
                        interior,
                    });
                }
                InteriorStartPolicy::Warn => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        start_state,
                        interior,
                        "start state also occurs inside training runs; it will never be decoded"
                    );
                }
            }
        }

        Ok(ViterbiDecoder::from_parts(
            self.model,
            self.config,
            start,
            candidates,
        ))
    }
}
