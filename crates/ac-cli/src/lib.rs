//! ac-cli library
//!
//! Exports the GraphQL HTTP transport and the command runner for use in
//! tests and the `ac` binary.

pub mod cli;
pub mod client;
pub mod commands;
pub mod identity_commands;
pub mod logger;
pub mod runner;


pub use client::{CliClientResult, ClientError, GraphqlClient};
pub use runner::Runner;
