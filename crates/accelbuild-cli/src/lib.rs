//! accelbuild CLI library.
//!
//! Command implementations live here; `main.rs` only parses arguments and
//! dispatches.

pub mod commands;
