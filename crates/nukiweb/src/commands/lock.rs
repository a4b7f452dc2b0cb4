//! Lock action handlers: lock, unlock, unlatch, lock 'n' go.

use nukiweb_core::Coordinator;
use nukiweb_core::entity::LockEntity;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

#[derive(Debug, Clone, Copy)]
pub enum LockCommand {
    Lock,
    Unlock,
    Unlatch,
    LockNGo { unlatch: bool },
}

impl LockCommand {
    fn verb(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Unlatch => "unlatch",
            Self::LockNGo { unlatch: false } => "lock 'n' go",
            Self::LockNGo { unlatch: true } => "lock 'n' go with unlatch",
        }
    }

    /// Actions that open the door.
    fn needs_confirmation(self) -> bool {
        matches!(self, Self::Unlatch | Self::LockNGo { unlatch: true })
    }
}

pub async fn handle(
    coordinator: &Coordinator,
    device: &str,
    cmd: LockCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let target = util::resolve_device(coordinator, device)?;

    if cmd.needs_confirmation()
        && !util::confirm(
            &format!("{} {}?", capitalize(cmd.verb()), target.name),
            cmd.verb(),
            global.yes,
        )?
    {
        return Ok(());
    }

    let lock = LockEntity::new(coordinator.clone(), target.id);
    match cmd {
        LockCommand::Lock => lock.lock().await?,
        LockCommand::Unlock => lock.unlock().await?,
        LockCommand::Unlatch => lock.open().await?,
        LockCommand::LockNGo { unlatch } => lock.lock_n_go(unlatch).await?,
    }

    if !global.quiet {
        let state = coordinator
            .snapshot()
            .get(target.id)
            .map_or("unknown", |d| d.state_label());
        eprintln!("{} sent to {} (now {state})", cmd.verb(), target.name);
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
