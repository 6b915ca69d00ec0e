//! Escaparate CLI library: scenario scripts and runner plumbing for the
//! demo storefront suite.

#![warn(missing_docs)]

mod error;
pub mod logging;
mod output;
pub mod scenarios;
pub mod selectors;

pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
