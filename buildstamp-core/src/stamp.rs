//! The stamping pipeline: count, probe, date, rewrite, write

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::build_number::{build_string, count_log_lines};
use crate::error::{Result, StampError};
use crate::markers::rewrite;
use crate::metadata::BuildMetadata;
use crate::toolchain::{strip_platform, CommandProbe, ToolchainProbe};

/// Everything a run would write, computed before the target is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampPlan {
    pub metadata: BuildMetadata,
    /// Full new contents of the target file.
    pub contents: String,
    pub rewritten_lines: usize,
}

pub struct Stamper {
    log_path: PathBuf,
    target_path: PathBuf,
    semantic_version: Option<String>,
    probe: Box<dyn ToolchainProbe>,
    date: Option<NaiveDate>,
}

impl Stamper {
    pub fn new(log_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            target_path: target_path.into(),
            semantic_version: None,
            probe: Box::new(CommandProbe::default()),
            date: None,
        }
    }

    /// An empty version counts as absent, so the version line is left alone.
    pub fn with_semantic_version(mut self, version: Option<String>) -> Self {
        self.semantic_version = version.filter(|v| !v.is_empty());
        self
    }

    pub fn with_probe(mut self, probe: Box<dyn ToolchainProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Pin the build date instead of reading the local clock.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Compute the metadata and the rewritten target without writing anything.
    pub fn plan(&self) -> Result<StampPlan> {
        let lines = count_log_lines(&self.log_path)?;
        let build_string = build_string(lines);
        debug!(log = %self.log_path.display(), lines, %build_string, "counted log lines");

        let toolchain_version = strip_platform(&self.probe.version()?);
        debug!(%toolchain_version, "resolved toolchain version");

        let build_date = self
            .date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string();

        let metadata = BuildMetadata {
            build_string,
            toolchain_version,
            build_date,
            semantic_version: self.semantic_version.clone(),
        };

        let original = fs::read_to_string(&self.target_path)
            .map_err(|err| StampError::file_access(&self.target_path, err))?;
        let (contents, rewritten_lines) = rewrite(&original, &metadata);
        debug!(file = %self.target_path.display(), rewritten_lines, "rewrote marker lines");

        Ok(StampPlan {
            metadata,
            contents,
            rewritten_lines,
        })
    }

    /// Plan, then overwrite the target with the rewritten contents.
    pub fn run(&self) -> Result<BuildMetadata> {
        let plan = self.plan()?;
        fs::write(&self.target_path, plan.contents.as_bytes())
            .map_err(|err| StampError::file_access(&self.target_path, err))?;
        info!(
            file = %self.target_path.display(),
            rewritten_lines = plan.rewritten_lines,
            "stamped build metadata"
        );
        Ok(plan.metadata)
    }
}

/// Stamp `target_path` using `go version` and today's local date.
pub fn stamp(
    log_path: &Path,
    target_path: &Path,
    semantic_version: Option<&str>,
) -> Result<BuildMetadata> {
    Stamper::new(log_path, target_path)
        .with_semantic_version(semantic_version.map(str::to_string))
        .run()
}
