pub mod global;

pub use global::{initiate, Mode, RelayConfig};
