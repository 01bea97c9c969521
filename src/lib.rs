//! Replorer library crate
//!
//! Restarts Windows Explorer and restores the folder windows that were open.
//! The binaries are thin wrappers; everything lives here so it can be tested
//! without a live shell.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod path_decoder;
pub mod platform;
pub mod restart;
pub mod theme;
