//! redis-topology CLI - Inspect and test Redis connection strings.
//!
//! This crate provides the `redis-topology` binary, which shows how a
//! connection string is classified and resolved, and can try a connection.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
