//! Target input.
//!
//! Targets come from a file (one per line), a single literal on the command
//! line, or stdin. Lines are trimmed, blanks skipped and duplicates dropped,
//! keeping the first occurrence.

use crate::error::{InputError, InputResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read distinct, trimmed, non-empty lines.
pub fn read_lines<R: BufRead>(reader: R) -> InputResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && seen.insert(line.to_string()) {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}

/// Collect targets from `source`.
///
/// An existing file is read line by line; any other value is a single
/// literal target; `None` reads stdin. An empty result is an error.
pub fn read_targets(source: Option<&str>) -> InputResult<Vec<String>> {
    let targets = match source {
        Some(source) if Path::new(source).is_file() => {
            let file = File::open(source).map_err(|e| InputError::Open {
                path: source.into(),
                source: e,
            })?;
            read_lines(BufReader::new(file))?
        }
        Some(literal) => read_lines(literal.as_bytes())?,
        None => read_lines(io::stdin().lock())?,
    };

    if targets.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(targets)
}
