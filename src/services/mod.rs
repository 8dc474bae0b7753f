//! Application services orchestrating the repositories.

mod board;

pub use board::StatusBoardService;
