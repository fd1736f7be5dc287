// Application layer: chat command dispatch around the balancing core.

pub mod bot;
pub mod command;
pub mod guard;
pub mod pagination;
pub mod resolve;

pub use bot::{CommandContext, MixBot};
pub use guard::{MixGuard, MixPermit};
