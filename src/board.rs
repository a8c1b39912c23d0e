pub mod board;
pub mod token;
