#[macro_use]
pub mod logging;

pub mod channel;
pub mod command;
pub mod config;
pub mod control_loop;
pub mod conversion;
pub mod error;
pub mod pwm;
pub mod serial;

// Re-export commonly used types
pub use channel::{ChannelConfig, ChannelId};
pub use command::{SetpointMap, parse};
pub use control_loop::ControlLoop;
pub use error::HilError;

#[cfg(test)]
pub(crate) mod mocks;
