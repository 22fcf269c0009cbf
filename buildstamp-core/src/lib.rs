//! buildstamp-core: stamps build metadata into a source file's constants
//!
//! A run gathers four values and patches the matching declaration lines of a
//! target file in place:
//!
//! - **Build string**: the line count of a log file plus one, as padded hex
//!   (`0x00012a`). Grows past eight characters rather than truncating.
//! - **Toolchain version**: `go version` output minus its platform token.
//! - **Build date**: today's local date, `YYYY-MM-DD`.
//! - **Semantic version**: optional, passed through verbatim.
//!
//! Declarations are found by literal substring (`buildString = "` and
//! friends), never by parsing the target language. The target is only
//! written after every replacement has been computed in memory.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use buildstamp_core::stamp::stamp;
//!
//! let meta = stamp(Path::new("logs/build.log"), Path::new("main.go"), Some("0.2.0"))?;
//! println!("stamped {}", meta.build_string);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Use [`stamp::Stamper`] to swap the toolchain probe, pin the date, or plan a
//! run without writing.

pub mod build_number;
pub mod error;
pub mod markers;
pub mod metadata;
pub mod output;
pub mod stamp;
pub mod toolchain;
