pub mod toml_config;

pub use toml_config::BotConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// Console front end: every stdin line (or `--command`) is handled as a chat
/// message written by `--author`.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "team-mixer")]
#[command(about = "Balances ten players into two teams of five")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Override storage.members_file from the config")]
    pub members_file: Option<String>,

    #[arg(long, default_value_t = crate::config::toml_config::DEFAULT_ADMINS[0])]
    pub author: u64,

    #[arg(long, value_delimiter = ',', help = "Ids of the players in the author's voice channel")]
    pub voice: Vec<u64>,

    #[arg(long, help = "Grant the author the manage-messages permission")]
    pub manage_messages: bool,

    #[arg(long, help = "Handle a single command and exit")]
    pub command: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}
