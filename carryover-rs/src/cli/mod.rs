//! CLI command implementations.

pub mod args;
pub mod chooser;
pub mod inspect;
pub mod migrate;
pub mod output;

pub use args::{Cli, Commands};
pub use output::Output;
