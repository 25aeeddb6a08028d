use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hmm_decode::{
    estimate::estimate,
    loader::{load_corpus, output_path_for},
    HmmError, Result,
};

const USAGE: &str = "\
Usage: hmm-estimate <corpus_file>

Estimates transition and emission matrices from a labeled corpus and writes
them next to the input as <corpus_stem>_output.txt.

Options:
  -h, --help    Print this help message
";

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    init_tracing();

    let corpus_path = match parse_args(env::args().skip(1)) {
        Ok(Some(path)) => path,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("hmm-estimate: {err}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&corpus_path) {
        Ok(out) => {
            eprintln!("hmm-estimate: wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("hmm-estimate: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(corpus_path: &Path) -> Result<PathBuf> {
    let corpus = load_corpus(corpus_path)?;
    let model = estimate(&corpus)?;
    let out = output_path_for(corpus_path);
    let file = File::create(&out).map_err(|e| HmmError::io(&out, e))?;
    let mut writer = BufWriter::new(file);
    model
        .write_matrices(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|e| HmmError::io(&out, e))?;
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
        .ok_or_else(|| "missing <corpus_file> argument".to_string())?
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
