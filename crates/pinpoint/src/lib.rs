//! Command line front end for pinpoint.
//!
//! `main.rs` parses arguments; the functions in [`cli`] do the work and
//! return printable lines so they can be tested without a terminal.

pub mod cli;
