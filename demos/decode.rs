//! Example: estimate an HMM from a tiny labeled corpus and decode with it.
//!
//! Run with:
//! `cargo run --example decode`

use hmm_decode::{
    loader::parse_corpus, model::DEFAULT_PRECISION, BatchDecoder, ParameterEstimator,
    ViterbiDecoder,
};

const CORPUS: &str = "\
3
0 1 1 2 2
0 5 5 6 6
0 2 2 1
0 6 5 5
0 1 2 1
0 5 6 5
";

fn main() -> hmm_decode::Result<()> {
    // States 1 and 2, plus the start state 0 that begins every run.
    // State 1 prefers observation 5, state 2 prefers 6.
    let corpus = parse_corpus(CORPUS)?;
    let model = ParameterEstimator::new().estimate(&corpus)?;

    println!("Estimated matrices (A rows, then B rows):");
    print!("{}", model.render_matrices(DEFAULT_PRECISION));

    let decoder = ViterbiDecoder::new(model)?;
    let obs = [5, 5, 6, 6, 6, 5];
    let best = decoder.decode_with_score(&obs)?;
    println!("Best path probability: {}", best.score);
    println!("State sequence:");
    for (t, (o, s)) in obs.iter().zip(&best.path).enumerate() {
        println!("  t = {t:2}, obs = {o}, state = {s}");
    }

    // Batch decoding keeps one result per case; 7 was never observed.
    let cases = vec![vec![5, 6], vec![6, 6, 5], vec![7]];
    let batch = BatchDecoder::new(&decoder);
    for (case, result) in cases.iter().zip(batch.decode_all(&cases)) {
        match result {
            Ok(path) => println!("{case:?} -> {path:?}"),
            Err(err) => println!("{case:?} -> error: {err}"),
        }
    }
    Ok(())
}
