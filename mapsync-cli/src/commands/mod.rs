//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`layers`] - Print the resolved layer list
//! - [`locations`] - List the towns available to `--goto`
//! - [`preview`] - Run a headless map session and print the resulting map

pub mod layers;
pub mod locations;
pub mod preview;
