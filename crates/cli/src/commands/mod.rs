//! CLI command implementations.

pub mod get;
pub mod init;
pub mod set;
