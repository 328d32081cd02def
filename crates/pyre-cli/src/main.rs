use clap::Parser;
use pyre_core::{run, DylibLoader, PayloadExit, RunFailure};

mod cli;
mod exit_codes;

use cli::Cli;

fn main() {
    let request = Cli::parse().into_request();
    init_tracing(request.debug_enabled());

    let code = match run(&DylibLoader, request) {
        Ok(()) => exit_codes::SUCCESS,
        Err(failure @ RunFailure::Load(_)) => {
            eprintln!("pyre: {failure}");
            exit_codes::LOAD_ERROR
        }
        Err(RunFailure::Payload(err)) => match err.downcast_ref::<PayloadExit>() {
            // The payload already reported through its own channels;
            // forward its status verbatim.
            Some(exit) => exit.status,
            None => {
                eprintln!("{err}");
                exit_codes::PAYLOAD_FAILED
            }
        },
    };
    std::process::exit(code);
}

/// Diagnostics go to stderr only; stdout belongs to the payload. The
/// `-debug ` options flag forces the debug level; otherwise `RUST_LOG` is
/// honored with a quiet default.
fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
