pub mod event_store;
pub mod file_event_store;
pub mod tick_source;

pub use event_store::*;
pub use file_event_store::*;
pub use tick_source::*;
