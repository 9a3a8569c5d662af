pub mod config;
pub mod core;
pub mod error;
pub mod observability;
pub mod services;

pub use config::{initiate, Mode, RelayConfig};
pub use crate::core::{classify, render, ClassifiedEvent, MessageBody};
pub use error::{ConfigError, Error, Result};
pub use observability::{ChatMessage, DispatchResult, SlackDispatcher};
pub use services::Relay;
