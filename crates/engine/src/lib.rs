pub mod board;
pub mod logger;
pub mod types;

pub use board::*;
pub use logger::GameLogger;
pub use types::*;
