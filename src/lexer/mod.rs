//! Lexical analysis for AtomC source.
//!
//! The scanner is a hand-written finite-state automaton over a
//! sentinel-terminated byte buffer. It handles:
//!
//! - Identifiers and the reserved keyword table
//! - Integer (decimal, octal, hexadecimal), real, char and string literals
//! - Single and double character operators, with maximal munch
//! - Line and block comments, which produce no tokens
//! - Line tracking for diagnostics

pub mod lexer;
pub mod source;
pub mod tokens;
