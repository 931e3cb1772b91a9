//! CLI command implementations.

pub mod connect;
pub mod inspect;
pub mod version;
