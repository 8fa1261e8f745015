//! Error types for the scanner.
//!
//! Every lexical error is fatal: the scanner stops at the first one and
//! hands it back to the caller. This module defines:
//!
//! - The `Error` structure carrying the offending line
//! - The `ErrorImpl` variants for each failure of the automaton
//! - Suggestions shown alongside the message by the driver

pub mod errors;

#[cfg(test)]
mod tests;
