//! Marker matching and declaration-line rewriting
//!
//! Lines are matched by plain substring containment, not by parsing the
//! target language. A marker inside a comment or string literal still fires.

use crate::metadata::BuildMetadata;

/// Column width the declaration names are padded to before ` = "`.
const NAME_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    BuildString,
    ToolchainVersion,
    BuildDate,
    Version,
}

impl Marker {
    /// Markers in the order each line is tested against them.
    pub const ALL: [Marker; 4] = [
        Marker::BuildString,
        Marker::ToolchainVersion,
        Marker::BuildDate,
        Marker::Version,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Marker::BuildString => "buildString",
            Marker::ToolchainVersion => "goVersion",
            Marker::BuildDate => "buildDate",
            Marker::Version => "version",
        }
    }

    /// Literal searched for on each line, e.g. `goVersion   = "`.
    pub fn needle(self) -> String {
        format!("{:<NAME_WIDTH$} = \"", self.name())
    }

    /// Replacement line for this declaration, always newline-terminated.
    pub fn render(self, value: &str) -> String {
        format!("\t{}{value}\"\n", self.needle())
    }

    fn value(self, meta: &BuildMetadata) -> Option<&str> {
        match self {
            Marker::BuildString => Some(&meta.build_string),
            Marker::ToolchainVersion => Some(&meta.toolchain_version),
            Marker::BuildDate => Some(&meta.build_date),
            Marker::Version => meta.semantic_version.as_deref(),
        }
    }
}

/// Return the replacement for `line`, or `None` when no marker fires.
///
/// Each marker is tested against the line as left by the previous tests.
pub fn rewrite_line(line: &str, meta: &BuildMetadata) -> Option<String> {
    let mut current: Option<String> = None;

    for marker in Marker::ALL {
        let Some(value) = marker.value(meta) else {
            continue;
        };
        let haystack = current.as_deref().unwrap_or(line);
        if haystack.contains(&marker.needle()) {
            current = Some(marker.render(value));
        }
    }

    current
}

/// Rewrite every marker line in `contents`, returning the new text and how many lines changed.
///
/// Lines that match nothing keep their exact bytes, terminator included.
pub fn rewrite(contents: &str, meta: &BuildMetadata) -> (String, usize) {
    let mut out = String::with_capacity(contents.len());
    let mut rewritten = 0;

    for line in contents.split_inclusive('\n') {
        match rewrite_line(line, meta) {
            Some(replacement) => {
                out.push_str(&replacement);
                rewritten += 1;
            }
            None => out.push_str(line),
        }
    }

    (out, rewritten)
}
