//! Command dispatch: CLI args -> coordinator operations -> output.

pub mod config_cmd;
pub mod devices;
pub mod entities;
pub mod lock;
pub mod settings;
pub mod util;
pub mod watch;

use nukiweb_core::Coordinator;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use self::lock::LockCommand;

/// Dispatch a command that runs against one fetched snapshot.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(coordinator, args, global),
        Command::Lock(t) => lock::handle(coordinator, &t.device, LockCommand::Lock, global).await,
        Command::Unlock(t) => {
            lock::handle(coordinator, &t.device, LockCommand::Unlock, global).await
        }
        Command::Unlatch(t) => {
            lock::handle(coordinator, &t.device, LockCommand::Unlatch, global).await
        }
        Command::LockNGo(args) => {
            let cmd = LockCommand::LockNGo {
                unlatch: args.unlatch,
            };
            lock::handle(coordinator, &args.device, cmd, global).await
        }
        Command::Entities(args) => entities::handle(coordinator, &args, global),
        Command::Set(args) => settings::handle(coordinator, args, global).await,
        // Handled before a snapshot is fetched
        Command::Watch(_) | Command::Config(_) | Command::Completions(_) => Err(CliError::Config {
            message: "command does not run against a snapshot".into(),
        }),
    }
}
