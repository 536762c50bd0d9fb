//! Engine plumbing shared by the ECS hosts.
pub mod log;
pub mod time;

pub use time::Time;
