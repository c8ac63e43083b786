//! CLI command implementations.

pub mod catalog;
pub mod check;
pub mod init;
pub mod publish;
pub mod resolve;
