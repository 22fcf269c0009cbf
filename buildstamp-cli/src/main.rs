//! Binary entrypoint for buildstamp-cli

use buildstamp_cli::UsageError;

fn main() {
    if let Err(err) = buildstamp_cli::run() {
        if let Some(usage) = err.downcast_ref::<UsageError>() {
            print!("{usage}");
            std::process::exit(2);
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
