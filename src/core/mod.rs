pub mod event;
pub mod render;

pub use event::{classify, ClassifiedEvent, MessageBody};
pub use render::render;
