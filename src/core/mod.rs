pub mod constraint;
pub mod engine;
pub mod partition;
pub mod registry;
pub mod report;
pub mod selector;

pub use crate::domain::model::{Candidate, Participant, Partition, Team};
pub use crate::domain::ports::{ChatChannel, Storage};
pub use crate::utils::error::Result;
