use hmm_decode::{
    corpus::{LabeledRun, SequenceCorpus},
    estimate::{estimate, ParameterEstimator},
    model::DEFAULT_PRECISION,
};
use proptest::prelude::*;

fn run_strategy() -> impl Strategy<Value = LabeledRun> {
    (1usize..=8).prop_flat_map(|len| {
        (
            prop::collection::vec(-3i64..=3, len),
            prop::collection::vec(10i64..=14, len),
        )
            .prop_map(|(s, o)| LabeledRun::new(s, o).unwrap())
    })
}

fn corpus_strategy() -> impl Strategy<Value = SequenceCorpus> {
    prop::collection::vec(run_strategy(), 1..=6).prop_map(SequenceCorpus::from_iter)
}

proptest! {
    #[test]
    fn shapes_follow_label_sets(corpus in corpus_strategy()) {
        let model = estimate(&corpus).unwrap();
        let n = corpus.state_space().len();
        let m = corpus.observation_alphabet().len();
        prop_assert_eq!(model.n_states(), n);
        prop_assert_eq!(model.n_observations(), m);
        prop_assert_eq!((model.transition().n_rows(), model.transition().n_cols()), (n, n));
        prop_assert_eq!((model.emission().n_rows(), model.emission().n_cols()), (n, m));
    }

    #[test]
    fn rows_sum_to_one_or_zero(corpus in corpus_strategy()) {
        let model = estimate(&corpus).unwrap();
        prop_assert!(model.transition().is_row_stochastic(1e-9));
        prop_assert!(model.emission().is_row_stochastic(1e-9));
        // Every state occurs, so every emission row is populated.
        for i in 0..model.n_states() {
            prop_assert!((model.emission().row_sum(i) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn transition_rows_match_outgoing_counts(corpus in corpus_strategy()) {
        let counts = ParameterEstimator::new().count(&corpus).unwrap();
        let model = estimate(&corpus).unwrap();
        for (i, from) in model.states().iter().enumerate() {
            let outgoing: usize = corpus
                .runs()
                .iter()
                .map(|r| r.transitions().filter(|&(a, _)| a == from).count())
                .sum();
            prop_assert_eq!(counts.transitions.row_total(i), outgoing as u64);
            prop_assert_eq!(outgoing == 0, model.transition().row_sum(i) == 0.0);
        }
    }

    #[test]
    fn render_is_deterministic(corpus in corpus_strategy()) {
        let a = estimate(&corpus).unwrap().render_matrices(DEFAULT_PRECISION);
        let b = estimate(&corpus).unwrap().render_matrices(DEFAULT_PRECISION);
        let n = corpus.state_space().len();
        prop_assert_eq!(a.lines().count(), 2 * n);
        prop_assert_eq!(a, b);
    }
}
