//! Stemcell smoke tests - drives the BOSH CLI through deploy and teardown

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stemcell_smoke::cli::{Cli, error_code};
use stemcell_smoke::output::json;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        match json::format_error(&message, error_code(&e)) {
            Ok(obj) if json_mode => eprintln!("{obj}"),
            _ => eprintln!("Error: {message}"),
        }
        std::process::exit(1);
    }
}
