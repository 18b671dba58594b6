//! # CLI Command Implementations
//!
//! The installer has a single command. Its module defines:
//! - An `Args` struct with the command's options, derived using `clap`.
//! - An `execute` function that turns the parsed `Args` into an
//!   install request and runs it through the `construct_setup` library.

pub mod install;
