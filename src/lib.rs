//! Supervised discrete Hidden Markov Models
//!
//! This crate estimates an HMM from labeled state/observation runs and decodes
//! the most probable hidden-state path for new observation sequences.
//!
//! ## Core idea
//! 1. Load a [`SequenceCorpus`] of aligned `(state, observation)` runs.
//! 2. [`ParameterEstimator`] turns raw counts into row-normalised transition
//!    (`A`) and emission (`B`) matrices over sorted label spaces.
//! 3. [`ViterbiDecoder`] runs a first-order Viterbi search seeded from a
//!    reserved *start pseudo-state* and returns the best path as labels.
//!
//! Probabilities are multiplied directly (no log transform) and every
//! maximisation keeps the first candidate on ties, so outputs are fully
//! determined by the sorted label order.
//!
//! ## Quick start
//! ```
//! use hmm_decode::{loader::parse_corpus, estimate::estimate, ViterbiDecoder};
//!
//! let corpus = parse_corpus("2\n0 1 1 2\n5 5 5 6\n0 2 2\n6 6 5\n").unwrap();
//! let model = estimate(&corpus).unwrap();
//! assert_eq!(model.transition_prob(1, 1), Some(0.5));
//!
//! let decoder = ViterbiDecoder::new(model).unwrap();
//! let path = decoder.decode(&[5, 6]).unwrap();
//! assert_eq!(path.len(), 2);
//! assert!(!path.contains(&0));
//! ```
//!
//! ## Modules
//! - [`loader`] / [`render`]: the corpus, job and output text formats.
//! - [`estimate`]: counting and normalisation.
//! - [`viterbi`]: the decoder and its trellis.
//! - [`engine`]: order-preserving batch decoding (rayon with `parallel`).
//! - [`builder`]: start pseudo-state configuration.

pub mod builder;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod labels;
pub mod loader;
pub mod matrix;
pub mod model;
pub mod render;
pub mod traits;
pub mod utils;
pub mod viterbi;

pub use crate::builder::{DecoderBuilder, DecoderConfig, InteriorStartPolicy};
pub use crate::corpus::{LabeledRun, SequenceCorpus};
pub use crate::engine::BatchDecoder;
pub use crate::error::{HmmError, Result};
pub use crate::estimate::ParameterEstimator;
pub use crate::labels::{Label, LabelIndex};
pub use crate::model::HmmModel;
pub use crate::traits::SequenceDecoder;
pub use crate::viterbi::ViterbiDecoder;
