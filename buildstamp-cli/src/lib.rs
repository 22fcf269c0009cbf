//! buildstamp CLI

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueHint};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use buildstamp_core::metadata::BuildMetadata;
use buildstamp_core::output::{write_json_pretty, write_summary};
use buildstamp_core::stamp::Stamper;
use buildstamp_core::toolchain::CommandProbe;

/// Environment override for the toolchain binary when `--toolchain` is absent.
pub const TOOLCHAIN_ENV: &str = "BUILDSTAMP_TOOLCHAIN";

const DEFAULT_TOOLCHAIN: &str = "go";

/// Stamp build number, toolchain version and date into a source file.
#[derive(Debug, Parser)]
#[command(name = "buildstamp", version)]
pub struct Cli {
    /// Log file whose line count (plus one) becomes the build number
    #[arg(value_hint = ValueHint::FilePath)]
    log_file: PathBuf,

    /// Source file whose declaration lines are rewritten in place
    #[arg(value_hint = ValueHint::FilePath)]
    target_file: PathBuf,

    /// Semantic version to write; the version line is left alone when omitted
    semantic_version: Option<String>,

    /// Toolchain binary to query [default: $BUILDSTAMP_TOOLCHAIN or go]
    #[arg(long = "toolchain", value_hint = ValueHint::CommandName)]
    toolchain: Option<String>,

    /// Argument passed to the toolchain to report its version (repeatable)
    #[arg(
        long = "toolchain-arg",
        default_value = "version",
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    toolchain_args: Vec<String>,

    /// Compute and print the metadata without writing the target file
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Print the metadata as JSON instead of the text summary
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Wrong arguments; the rendered message includes the usage line.
#[derive(Debug)]
pub struct UsageError(String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

/// Parse CLI args and stamp the target file.
pub fn run() -> Result<()> {
    let cli = parse_args(env::args_os())?;
    init_logging(cli.verbose);

    let stamper = build_stamper(&cli, env::var(TOOLCHAIN_ENV).ok());
    let stdout = io::stdout();
    let handle = stdout.lock();
    execute(&cli, &stamper, handle)
}

fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(UsageError(err.render().to_string()).into()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn resolve_toolchain(flag: Option<&str>, from_env: Option<String>) -> String {
    if let Some(program) = flag {
        return program.to_string();
    }

    from_env
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string())
}

fn build_stamper(cli: &Cli, toolchain_env: Option<String>) -> Stamper {
    let program = resolve_toolchain(cli.toolchain.as_deref(), toolchain_env);
    let probe = CommandProbe::new(program).with_args(cli.toolchain_args.iter().cloned());

    Stamper::new(&cli.log_file, &cli.target_file)
        .with_semantic_version(cli.semantic_version.clone())
        .with_probe(Box::new(probe))
}

fn execute(cli: &Cli, stamper: &Stamper, mut out: impl Write) -> Result<()> {
    let target = stamper.target_path().display().to_string();

    let meta: BuildMetadata = if cli.dry_run {
        let plan = stamper
            .plan()
            .with_context(|| format!("failed to stamp {target}"))?;
        info!(
            file = %target,
            rewritten_lines = plan.rewritten_lines,
            "dry run, target left untouched"
        );
        plan.metadata
    } else {
        stamper
            .run()
            .with_context(|| format!("failed to stamp {target}"))?
    };

    if cli.json {
        write_json_pretty(&meta, &mut out)?;
    } else {
        write_summary(&meta, &mut out)?;
    }

    Ok(())
}
