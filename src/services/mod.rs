pub mod board;
pub mod reveal;
pub mod roster;
pub mod transfer;
