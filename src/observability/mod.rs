pub mod slack;

pub use slack::{ChatMessage, DispatchResult, SlackDispatcher};
