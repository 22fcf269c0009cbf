//! Log line counting and build-string formatting

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, StampError};

/// Count newline-terminated records, plus a trailing record without a newline.
///
/// Works on raw bytes so a log with invalid UTF-8 still counts.
pub fn count_lines(mut reader: impl BufRead) -> io::Result<u64> {
    let mut lines = 0u64;
    let mut pending = false;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }

        let newlines = buf.iter().filter(|&&b| b == b'\n').count() as u64;
        lines += newlines;
        pending = buf.last() != Some(&b'\n');

        let consumed = buf.len();
        reader.consume(consumed);
    }

    if pending {
        lines += 1;
    }

    Ok(lines)
}

/// Open `path` and count its lines.
pub fn count_log_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|err| StampError::file_access(path, err))?;
    count_lines(BufReader::new(file)).map_err(|err| StampError::file_access(path, err))
}

/// Render a build number as `0x` plus lowercase hex, zero-padded to eight characters.
///
/// Numbers above `0xffffff` need more digits and the string grows; nothing is truncated.
pub fn format_build_number(n: u64) -> String {
    format!("{n:#08x}")
}

/// The build string for a log with `lines` lines: the line count plus one.
pub fn build_string(lines: u64) -> String {
    format_build_number(lines.saturating_add(1))
}
