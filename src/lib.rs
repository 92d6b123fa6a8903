pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod state;

pub use error::{Result, SecretGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
