//! The metadata bundle computed for one stamping run

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    /// Padded hex build number, e.g. `0x00012a`.
    pub build_string: String,
    pub toolchain_version: String,
    /// `YYYY-MM-DD`
    pub build_date: String,
    /// Only rewritten into the target when present.
    #[serde(default)]
    pub semantic_version: Option<String>,
}
