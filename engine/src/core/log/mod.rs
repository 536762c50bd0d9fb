//! Log sinks for hosts that want engine records delivered somewhere other than stdout.
//!
//! The engine itself only talks to the [`log`] facade. A host installs one of these sinks with
//! [`::log::set_boxed_logger`] and drains it on its own schedule (usually once per frame).
mod channel;

pub use channel::{ChannelLogger, LogMessage};
