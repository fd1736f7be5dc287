pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConsoleChannel, LocalStorage, MemberStore, MemoryChannel};
pub use app::{CommandContext, MixBot};
pub use config::BotConfig;
pub use crate::core::{engine::TeamBalancer, report::MixReport};
pub use utils::error::{MixError, Result};
