//! Output text for the drivers.
//!
//! Outputs are rendered completely in memory and written in one call, so a
//! failed run never leaves a partial output file behind.

use crate::error::{HmmError, Result};
use crate::labels::Label;
use std::fs;
use std::path::Path;

/// One line per decoded path, labels separated by single spaces.
pub fn render_predictions<P: AsRef<[Label]>>(paths: &[P]) -> String {
    let mut out = String::new();
    for path in paths {
        let line = path
            .as_ref()
            .iter()
            .map(Label::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write `contents` to `path`, replacing any existing file.
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|e| HmmError::io(path, e))
}
