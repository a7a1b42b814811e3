//! Guidefeed CLI - operational feedback reports over cargo guide sheets.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool, log_json: bool) {
    let default = if verbose { "guidefeed=debug" } else { "guidefeed=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = match cli.command {
        Commands::Report {
            file,
            kind,
            date,
            options,
        } => commands::report::run(file, kind, date, options, cli.verbose),

        Commands::Serve {
            source,
            port,
            bind,
            cache_ttl,
            allow_origins,
            options,
        } => commands::serve::run(
            source,
            bind,
            port,
            cache_ttl,
            allow_origins,
            options,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
