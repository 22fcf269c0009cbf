//! Summary output helpers

use std::io::Write;

use anyhow::Result;

use crate::metadata::BuildMetadata;

/// Write the four-line human-readable summary.
pub fn write_summary(meta: &BuildMetadata, mut w: impl Write) -> Result<()> {
    let version = meta.semantic_version.as_deref().unwrap_or("(unchanged)");

    writeln!(w, "Updated:")?;
    writeln!(w, "\tsemantic version:  {version}")?;
    writeln!(w, "\tbuild string:      {}", meta.build_string)?;
    writeln!(w, "\tbuild date:        {}", meta.build_date)?;
    writeln!(w, "\ttoolchain version: {}", meta.toolchain_version)?;
    Ok(())
}

/// Write the metadata as a prettified JSON object.
pub fn write_json_pretty(meta: &BuildMetadata, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildMetadata {
        BuildMetadata {
            build_string: "0x000001".to_string(),
            toolchain_version: "go version go1.21.0".to_string(),
            build_date: "2024-01-01".to_string(),
            semantic_version: None,
        }
    }

    #[test]
    fn summary_has_header_and_four_fields() {
        let mut buf = Vec::new();
        write_summary(&sample(), &mut buf).expect("write summary");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Updated:");
        assert!(lines[1].ends_with("(unchanged)"));
        assert!(lines[2].ends_with("0x000001"));
        assert!(lines[3].ends_with("2024-01-01"));
        assert!(lines[4].ends_with("go version go1.21.0"));
    }

    #[test]
    fn json_round_trips() {
        let mut meta = sample();
        meta.semantic_version = Some("1.2.3".to_string());
        let mut buf = Vec::new();
        write_json_pretty(&meta, &mut buf).expect("write json");

        let parsed: BuildMetadata = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed, meta);
    }
}
