pub mod replay;
pub mod simulation_runner;
pub mod walk_session;

pub use replay::*;
pub use simulation_runner::*;
pub use walk_session::*;
