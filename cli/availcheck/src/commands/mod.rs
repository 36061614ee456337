//! CLI command implementations.

pub mod check;
pub mod target;
pub mod verify;
