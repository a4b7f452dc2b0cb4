mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nukiweb_core::Coordinator;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Config commands don't need a fetched snapshot
        Command::Config(args) => commands::config_cmd::handle(args, &global).await,

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "nukiweb", &mut std::io::stdout());
            Ok(())
        }

        Command::Watch(args) => {
            let cfg = config::load_config_or_default();
            let coordinator_config = config::build_coordinator_config(&global, &cfg)?;
            commands::watch::handle(coordinator_config, &args, &global).await
        }

        // Everything else: fetch once, run, shut down
        cmd => {
            let cfg = config::load_config_or_default();
            let coordinator_config = config::build_coordinator_config(&global, &cfg)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let global = &global;
            Coordinator::oneshot(coordinator_config, |coordinator| async move {
                Ok(commands::dispatch(cmd, &coordinator, global).await)
            })
            .await?
        }
    }
}
