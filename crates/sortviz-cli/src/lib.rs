#![forbid(unsafe_code)]

//! `sortviz`: terminal front end for the SortViz visualizer.
//!
//! # Role in SortViz
//! The binary crate. It parses the command line, installs the tracing
//! subscriber, resolves the session configuration, and either prints a trace
//! or runs the interactive player.
//!
//! # How it fits in the system
//! Everything algorithmic lives in `sortviz-core` and everything stateful in
//! `sortviz-runtime`; this crate only reads input, renders text and maps
//! errors to exit codes.

pub mod cli;
pub mod error;
pub mod logging;
pub mod render;
pub mod source;
pub mod terminal;

pub use cli::run_from_env;
pub use error::{CliError, Result};
