//! web3peek - check a local node and print what it knows.
//!
//! The binary in `main.rs` is a thin wrapper around these modules so the
//! commands can be driven from tests.

pub mod commands;
pub mod config;
pub mod output;
pub mod telemetry;
