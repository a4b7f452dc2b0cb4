//! Clap derive structures for the `nukiweb` CLI.
//!
//! Kept free of crate-internal imports so `build.rs` can include it for
//! man page generation.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nukiweb -- control Nuki smart locks and openers through Nuki Web
#[derive(Debug, Parser)]
#[command(
    name = "nukiweb",
    version,
    about = "Control Nuki smart locks and openers through the Nuki Web API",
    long_about = "Lists Nuki devices on a Nuki Web account, runs lock actions,\n\
        changes device settings, and watches state by polling.\n\n\
        Accounts are stored as profiles in the config file; run\n\
        `nukiweb config init` to create one.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "NUKIWEB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Nuki Web API base URL (overrides profile)
    #[arg(long, env = "NUKIWEB_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Nuki Web API token (overrides profile)
    #[arg(long, env = "NUKIWEB_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NUKIWEB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "NUKIWEB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect smart locks and openers
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Lock a device
    Lock(DeviceTarget),

    /// Unlock a device
    Unlock(DeviceTarget),

    /// Unlatch (open) a device
    #[command(alias = "open")]
    Unlatch(DeviceTarget),

    /// Unlock, then relock after the lock 'n' go timeout
    #[command(name = "lock-n-go", alias = "lng")]
    LockNGo(LockNGoArgs),

    /// List entities derived from the account's devices
    #[command(alias = "ent", alias = "e")]
    Entities(EntitiesArgs),

    /// Change a device setting
    Set(SetArgs),

    /// Poll the account and print device state on every refresh
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List all devices on the account
    #[command(alias = "ls")]
    List,

    /// Show one device
    Get {
        /// Smartlock id or device name
        device: String,
    },
}

// ── Lock actions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceTarget {
    /// Smartlock id or device name
    pub device: String,
}

#[derive(Debug, Args)]
pub struct LockNGoArgs {
    /// Smartlock id or device name
    pub device: String,

    /// Unlatch as part of the unlock
    #[arg(long)]
    pub unlatch: bool,
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Only show entities of this platform
    #[arg(long)]
    pub platform: Option<PlatformFilter>,

    /// Only show entities of this device (id or name)
    #[arg(long, short = 'd')]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformFilter {
    Lock,
    BinarySensor,
    Sensor,
    Switch,
    Number,
    Select,
}

// ── Settings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Smartlock id or device name
    pub device: String,

    /// Setting key, e.g. `autoUnlatch` or `auto_unlatch`
    pub setting: String,

    /// New value: on/off for switches, a number, or an option label
    pub value: String,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval, e.g. `30s` or `2m` (overrides profile)
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively create or update a profile
    Init,

    /// Print the configuration with secrets masked
    Show,

    /// Check the active profile and probe its token
    Validate,

    /// Store an API token in the system keyring
    SetToken,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// List configured profiles
    Profiles,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
