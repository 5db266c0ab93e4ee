//! Clap derive structures for the `livebox` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// livebox -- command-line client for Livebox routers
#[derive(Debug, Parser)]
#[command(
    name = "livebox",
    version,
    about = "Manage a Livebox router from the command line",
    long_about = "Talks to the router's local REST API.\n\n\
        Every call is checked against the features the router advertises\n\
        at /API/Capabilities before it is sent.",
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
    /// Router profile to use
    #[arg(long, short = 'p', env = "LIVEBOX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router URL (overrides profile)
    #[arg(long, short = 'u', env = "LIVEBOX_URL", global = true)]
    pub url: Option<String>,

    /// Administration account (defaults to UsrAdmin)
    #[arg(long, env = "LIVEBOX_USERNAME", global = true)]
    pub username: Option<String>,

    /// Administration password
    #[arg(long, env = "LIVEBOX_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LIVEBOX_OUTPUT",
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

    /// Confirm disruptive operations such as reboot
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LIVEBOX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LIVEBOX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Show general router information
    #[command(alias = "i")]
    Info,

    /// List the features advertised by the router
    #[command(alias = "caps")]
    Capabilities,

    /// List the known feature ids (offline)
    Features(FeaturesArgs),

    /// Verify credentials against the router
    Login,

    /// Reboot the router
    Reboot,

    /// List Wi-Fi radios
    #[command(alias = "w")]
    Wifi,

    /// Show a WLAN interface and its access points
    Wlan {
        /// Interface id, e.g. "wl0"
        ifc: String,
    },

    /// Inspect or modify a Wi-Fi access point
    Ap(ApArgs),

    /// Manage connected devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage parental-control and Wi-Fi schedules
    #[command(alias = "sched")]
    Schedules(SchedulesArgs),

    /// Invoke any advertised feature with a raw JSON payload
    Call(CallArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),
}

// ── Features ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FeaturesArgs {
    /// Only list one group of features
    #[arg(long, short = 'g')]
    pub group: Option<FeatureGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeatureGroup {
    Wifi,
    Wan,
    Devices,
    /// Actions triggered with POST
    Invoke,
}

// ── Access points ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApArgs {
    #[command(subcommand)]
    pub command: ApCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApCommand {
    /// Show access point settings
    Get {
        /// Interface id, e.g. "wl0"
        ifc: String,
        /// Access point BSSID (colons optional)
        ap: String,
    },

    /// Change access point settings; unset flags keep their value
    Set {
        /// Interface id, e.g. "wl0"
        ifc: String,
        /// Access point BSSID (colons optional)
        ap: String,

        #[arg(long)]
        ssid: Option<String>,

        /// Wi-Fi passphrase
        #[arg(long)]
        passphrase: Option<String>,

        #[arg(long)]
        status: Option<ApStatus>,

        /// Broadcast the SSID
        #[arg(long)]
        broadcast: Option<bool>,

        /// Channel selection: auto, auto1, auto2
        #[arg(long)]
        channel_conf: Option<String>,

        /// Bandwidth: auto, 20MHz, 40MHz, 80MHz, 160MHz, 20/40MHz, 80/40/20MHz
        #[arg(long)]
        bandwidth: Option<String>,

        /// Radio mode, e.g. "11ac"
        #[arg(long)]
        mode: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApStatus {
    Up,
    Down,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices known to the router
    #[command(alias = "ls")]
    List {
        /// Only show devices currently connected
        #[arg(long)]
        active: bool,
    },

    /// Show device details
    Get {
        /// Device MAC address
        mac: String,
    },

    /// Rename a device
    Alias {
        /// Device MAC address
        mac: String,
        alias: String,
    },
}

// ── Schedules ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchedulesArgs {
    #[command(subcommand)]
    pub command: SchedulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchedulesCommand {
    /// Parental-control schedule of a device
    Device {
        /// Device MAC address
        mac: String,
        #[command(subcommand)]
        command: ScheduleCommand,
    },

    /// Wi-Fi schedule of an access point
    Wlan {
        /// Interface id, e.g. "wl0"
        ifc: String,
        /// Access point BSSID (colons optional)
        ap: String,
        #[command(subcommand)]
        command: ScheduleCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// List scheduled slots
    #[command(alias = "ls")]
    List,

    /// Add slots
    Add(SlotArgs),

    /// Remove slots
    #[command(alias = "rm")]
    Delete(SlotArgs),

    /// Turn the schedule on
    Enable,

    /// Turn the schedule off
    Disable,

    /// Show whether the schedule is on (Wi-Fi schedules only)
    Status,
}

#[derive(Debug, Args)]
pub struct SlotArgs {
    /// Slots as an id (1-168), a day ("monday"), an hour ("monday:8")
    /// or an hour range ("monday:8-12", end exclusive)
    #[arg(required = true, num_args = 1..)]
    pub slots: Vec<String>,
}

// ── Raw call ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Feature id, e.g. "GeneralInfo"
    pub feature: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "get")]
    pub method: CallMethod,

    /// Path variable as NAME=VALUE (repeatable)
    #[arg(long = "var", short = 'V', value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Inline JSON body
    #[arg(long, short = 'd', conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the JSON body from a file
    #[arg(long, short = 'f')]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CallMethod {
    Get,
    Put,
    Post,
    Delete,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or replace a profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Router URL, e.g. http://192.168.1.1
        #[arg(long = "router-url")]
        router_url: String,

        /// Administration account
        #[arg(long = "account")]
        account: Option<String>,

        /// Environment variable holding the password
        #[arg(long)]
        password_env: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        set_default: bool,
    },

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,
}
