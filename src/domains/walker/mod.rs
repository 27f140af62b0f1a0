pub mod aggregate;
pub mod direction;
pub mod events;
pub mod ports;
pub mod projections;

pub use aggregate::*;
pub use direction::*;
pub use events::*;
pub use ports::*;
pub use projections::*;
