pub mod logger;
pub mod walker;

pub use logger::*;
pub use walker::*;
