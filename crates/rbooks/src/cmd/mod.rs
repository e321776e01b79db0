//! Command implementations for CLI tools.
//!
//! Each module contains the full implementation for a command,
//! which can be invoked by thin wrapper binaries.

pub mod accounts;
pub mod check;
pub mod common;
pub mod completions;
pub mod export;
pub mod init;
pub mod monthly;
pub mod yearly;
