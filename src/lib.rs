pub mod board;
pub mod config;
pub mod error;
pub mod input;
pub mod node;
pub mod process;
pub mod wire;

pub use error::{Error, Result};
