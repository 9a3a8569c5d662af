pub mod handler;

pub use handler::{message_body, Relay};
