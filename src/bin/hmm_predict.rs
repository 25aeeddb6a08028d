use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hmm_decode::{
    estimate::estimate,
    loader::{load_corpus, load_job, output_path_for},
    render::{render_predictions, write_output},
    BatchDecoder, Result, ViterbiDecoder,
};

const USAGE: &str = "\
Usage: hmm-predict <job_file>

Reads a prediction job (corpus path, then test cases), estimates the model
from the corpus and writes one decoded state path per test case to
<job_stem>_output.txt, in input order.

Options:
  -h, --help    Print this help message
";

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    init_tracing();

    let job_path = match parse_args(env::args().skip(1)) {
        Ok(Some(path)) => path,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("hmm-predict: {err}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&job_path) {
        Ok(out) => {
            eprintln!("hmm-predict: wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("hmm-predict: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Any failing test case aborts the job before the output file is written.
fn run(job_path: &Path) -> Result<PathBuf> {
    let job = load_job(job_path)?;
    let corpus = load_corpus(&job.corpus_path)?;
    let model = estimate(&corpus)?;
    // No cases means nothing to decode, so the start state is never needed.
    let paths = if job.cases.is_empty() {
        Vec::new()
    } else {
        BatchDecoder::new(ViterbiDecoder::new(model)?).decode_all_strict(&job.cases)?
    };

    let out = output_path_for(job_path);
    write_output(&out, &render_predictions(&paths))?;
    Ok(out)
}

/// Exactly one positional argument. `Ok(None)` means help was requested.
fn parse_args<I, T>(mut args: I) -> std::result::Result<Option<PathBuf>, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    let first: String = args
        .next()
        .ok_or_else(|| "missing <job_file> argument".to_string())?
        .into();
    if first == "-h" || first == "--help" {
        return Ok(None);
    }
    if let Some(extra) = args.next() {
        let extra: String = extra.into();
        return Err(format!("unexpected argument '{extra}'"));
    }
    Ok(Some(PathBuf::from(first)))
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
