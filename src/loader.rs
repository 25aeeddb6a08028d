//! Text formats consumed by the drivers.
//!
//! Corpus file:
//! ```text
//! <R>
//! <states of run 1>
//! <observations of run 1>
//! ...            (R pairs of lines)
//! ```
//!
//! Prediction job file (blank lines are ignored):
//! ```text
//! <path to corpus file>
//! <K>
//! <L_1>
//! <L_1 observation labels>
//! ...            (K cases)
//! ```
//!
//! Labels are whitespace-separated integers. Line numbers in errors are
//! 1-based and refer to the physical line in the file.

use crate::corpus::{LabeledRun, SequenceCorpus};
use crate::error::{HmmError, Result};
use crate::labels::Label;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to an input file stem to name its output file.
pub const OUTPUT_SUFFIX: &str = "_output.txt";

/// A parsed prediction job: where the training corpus lives and which
/// observation sequences to decode, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionJob {
    /// Corpus path exactly as written in the job file.
    pub corpus_path: PathBuf,
    pub cases: Vec<Vec<Label>>,
}

/// Parse a corpus file's contents.
pub fn parse_corpus(text: &str) -> Result<SequenceCorpus> {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines
        .first()
        .ok_or_else(|| HmmError::parse(1, "missing run count"))?;
    let runs = parse_count(header, 1, "run count")?;

    let mut corpus = SequenceCorpus::new();
    for r in 0..runs {
        let state_idx = 1 + 2 * r;
        let obs_idx = state_idx + 1;
        let states_line = lines.get(state_idx).ok_or_else(|| {
            HmmError::parse(state_idx + 1, format!("missing states of run {}", r + 1))
        })?;
        let obs_line = lines.get(obs_idx).ok_or_else(|| {
            HmmError::parse(obs_idx + 1, format!("missing observations of run {}", r + 1))
        })?;
        let states = parse_labels(states_line, state_idx + 1)?;
        let observations = parse_labels(obs_line, obs_idx + 1)?;
        if states.len() != observations.len() {
            return Err(HmmError::parse(
                obs_idx + 1,
                format!(
                    "run {} has {} states but {} observations",
                    r + 1,
                    states.len(),
                    observations.len()
                ),
            ));
        }
        corpus.push(LabeledRun::new(states, observations)?);
    }

    let consumed = 1 + 2 * runs;
    if let Some(extra) = lines
        .iter()
        .enumerate()
        .skip(consumed)
        .find(|(_, l)| !l.trim().is_empty())
    {
        return Err(HmmError::parse(
            extra.0 + 1,
            format!("unexpected content after {runs} runs"),
        ));
    }
    Ok(corpus)
}

/// Read and parse a corpus file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<SequenceCorpus> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| HmmError::io(path, e))?;
    parse_corpus(&text)
}

/// Parse a prediction job file's contents.
pub fn parse_job(text: &str) -> Result<PredictionJob> {
    let mut lines = NonBlankLines::new(text);

    let (_, corpus_path) = lines.next_line("corpus path")?;
    let corpus_path = PathBuf::from(corpus_path);
    let (n, count) = lines.next_line("test case count")?;
    let k = parse_count(count, n, "test case count")?;

    // `k` comes from the file; each case needs at least one more line.
    let mut cases = Vec::with_capacity(k.min(lines.remaining()));
    for case in 1..=k {
        let (n, len_line) = lines.next_line(&format!("length of test case {case}"))?;
        let len = parse_count(len_line, n, "test case length")?;
        if len == 0 {
            cases.push(Vec::new());
            continue;
        }
        let (n, obs_line) = lines.next_line(&format!("observations of test case {case}"))?;
        let obs = parse_labels(obs_line, n)?;
        if obs.len() != len {
            return Err(HmmError::parse(
                n,
                format!(
                    "test case {case} declares {len} observations but lists {}",
                    obs.len()
                ),
            ));
        }
        cases.push(obs);
    }

    if let Some(n) = lines.peek_line_no() {
        return Err(HmmError::parse(
            n,
            format!("unexpected content after {k} test cases"),
        ));
    }
    Ok(PredictionJob { corpus_path, cases })
}

/// Trimmed non-blank lines paired with their 1-based physical line number.
struct NonBlankLines<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> NonBlankLines<'a> {
    fn new(text: &'a str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        Self { lines, pos: 0 }
    }

    fn next_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        match self.lines.get(self.pos).copied() {
            Some(item) => {
                self.pos += 1;
                Ok(item)
            }
            None => {
                let after = self.lines.last().map_or(1, |(n, _)| n + 1);
                Err(HmmError::parse(after, format!("missing {what}")))
            }
        }
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    fn peek_line_no(&self) -> Option<usize> {
        self.lines.get(self.pos).map(|(n, _)| *n)
    }
}

/// Read and parse a prediction job file.
///
/// The corpus path inside the job is returned verbatim; relative paths are
/// resolved against the working directory when the corpus is loaded.
pub fn load_job(path: impl AsRef<Path>) -> Result<PredictionJob> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| HmmError::io(path, e))?;
    parse_job(&text)
}

/// Output file for `input`: same directory and stem, `_output.txt` suffix.
///
/// `data/train.txt` becomes `data/train_output.txt`; only the final
/// extension is replaced.
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(OUTPUT_SUFFIX);
    input.with_file_name(name)
}

fn parse_labels(line: &str, line_no: usize) -> Result<Vec<Label>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<Label>().map_err(|_| {
                HmmError::parse(line_no, format!("expected integer label, found `{tok}`"))
            })
        })
        .collect()
}

fn parse_count(line: &str, line_no: usize, what: &str) -> Result<usize> {
    line.trim().parse::<usize>().map_err(|_| {
        HmmError::parse(
            line_no,
            format!("{what} must be a non-negative integer, found `{}`", line.trim()),
        )
    })
}
