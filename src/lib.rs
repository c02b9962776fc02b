pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fileset;
pub mod fixer;
pub mod prompt;
pub mod runner;

pub use config::Config;
pub use error::{Error, Result};
pub use runner::Runner;
