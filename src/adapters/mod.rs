// Adapters layer: concrete implementations of the domain ports.

pub mod channel;
pub mod member_store;
pub mod storage;

pub use channel::{ConsoleChannel, MemoryChannel};
pub use member_store::MemberStore;
pub use storage::LocalStorage;
