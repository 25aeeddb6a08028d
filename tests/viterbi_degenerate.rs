use hmm_decode::{
    labels::LabelIndex, matrix::DenseMatrix, DecoderBuilder, HmmError, HmmModel, ViterbiDecoder,
};

fn model(a: Vec<Vec<f64>>, b: Vec<Vec<f64>>, states: &[i64], obs: &[i64]) -> HmmModel {
    HmmModel::from_parts(
        LabelIndex::from_labels(states.iter().copied()),
        LabelIndex::from_labels(obs.iter().copied()),
        DenseMatrix::from_rows(a).unwrap(),
        DenseMatrix::from_rows(b).unwrap(),
    )
    .unwrap()
}

/// Start 0 plus three states with identical rows: every path ties.
fn symmetric() -> HmmModel {
    let row = vec![0.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
    model(
        vec![row.clone(), row.clone(), row.clone(), row],
        vec![vec![0.0, 0.0], vec![0.5, 0.5], vec![0.5, 0.5], vec![0.5, 0.5]],
        &[0, 1, 2, 3],
        &[7, 8],
    )
}

#[test]
fn zero_probabilities_are_respected() {
    // Only state 1 is reachable from the start, and it can only stay put.
    let m = model(
        vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
        vec![vec![0.0, 0.0], vec![0.5, 0.5], vec![0.9, 0.1]],
        &[0, 1, 2],
        &[7, 8],
    );
    let decoded = ViterbiDecoder::new(m)
        .unwrap()
        .decode_with_score(&[7, 7, 8])
        .unwrap();
    assert!(decoded.score > 0.0);
    assert_eq!(decoded.path, vec![1, 1, 1]);
}

#[test]
fn ties_resolve_to_first_label() {
    let dec = ViterbiDecoder::new(symmetric()).unwrap();
    assert_eq!(dec.decode(&[7, 8, 7, 8]).unwrap(), vec![1, 1, 1, 1]);
}

#[test]
fn ties_are_deterministic() {
    let obs = [8, 7, 7, 8, 8];
    let a = ViterbiDecoder::new(symmetric()).unwrap().decode_with_score(&obs).unwrap();
    let b = ViterbiDecoder::new(symmetric()).unwrap().decode_with_score(&obs).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tie_break_does_not_prefer_later_equal_candidates() {
    // From the start, states 2 and 3 tie and both beat 1.
    let m = model(
        vec![
            vec![0.0, 0.2, 0.4, 0.4],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
        ],
        vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]],
        &[0, 1, 2, 3],
        &[7],
    );
    let dec = ViterbiDecoder::new(m).unwrap();
    assert_eq!(dec.decode(&[7]).unwrap(), vec![2]);
    // Second step: 1 is reached from 2 and 3 with equal score; 2 wins.
    let tr = dec.trellis(&[7, 7]).unwrap();
    assert_eq!(tr.predecessor(1, 1), Some(2));
    assert_eq!(dec.decode(&[7, 7]).unwrap(), vec![2, 1]);
}

#[test]
fn unreachable_observation_gives_zero_score_path() {
    // No state emits 8, so every score at t=1 is zero.
    let m = model(
        vec![
            vec![0.0, 0.3, 0.7],
            vec![0.0, 0.5, 0.5],
            vec![0.0, 0.5, 0.5],
        ],
        vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]],
        &[0, 1, 2],
        &[7, 8],
    );
    let decoded = ViterbiDecoder::new(m)
        .unwrap()
        .decode_with_score(&[7, 8, 7])
        .unwrap();
    assert_eq!(decoded.score, 0.0);
    assert_eq!(decoded.path, vec![1, 1, 1]);
}

#[test]
fn long_sequences_underflow_without_log_space() {
    let dec = ViterbiDecoder::new(symmetric()).unwrap();
    let obs: Vec<i64> = (0..2_000).map(|i| if i % 2 == 0 { 7 } else { 8 }).collect();
    let decoded = dec.decode_with_score(&obs).unwrap();
    assert_eq!(decoded.score, 0.0);
    assert_eq!(decoded.path.len(), obs.len());
    assert!(decoded.path.iter().all(|&s| s == 1));
}

#[test]
fn single_observation() {
    let dec = ViterbiDecoder::new(symmetric()).unwrap();
    let decoded = dec.decode_with_score(&[8]).unwrap();
    assert_eq!(decoded.path, vec![1]);
    assert!((decoded.score - 1.0 / 6.0).abs() < 1e-15);
}

#[test]
fn start_state_label_sorts_in_the_middle() {
    // Negative labels sort before the start state; it is still excluded.
    let m = model(
        vec![
            vec![0.5, 0.0, 0.5],
            vec![0.5, 0.0, 0.5],
            vec![1.0, 0.0, 0.0],
        ],
        vec![vec![0.0, 1.0], vec![0.0, 0.0], vec![1.0, 0.0]],
        &[-5, 0, 4],
        &[7, 8],
    );
    let dec = ViterbiDecoder::new(m).unwrap();
    assert_eq!(dec.candidate_states(), vec![-5, 4]);
    let decoded = dec.decode_with_score(&[7, 8, 8]).unwrap();
    assert_eq!(decoded.path, vec![4, -5, -5]);
    assert!((decoded.score - 0.25).abs() < 1e-15);
}

#[test]
fn missing_or_lonely_start_state() {
    let no_start = model(
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        vec![vec![1.0], vec![1.0]],
        &[1, 2],
        &[7],
    );
    assert!(matches!(
        ViterbiDecoder::new(no_start),
        Err(HmmError::MissingStartState(0))
    ));

    let lonely = model(vec![vec![1.0]], vec![vec![1.0]], &[0], &[7]);
    assert!(matches!(
        DecoderBuilder::new(lonely).build(),
        Err(HmmError::NoCandidateStates)
    ));
}
