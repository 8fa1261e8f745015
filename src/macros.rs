//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SIMPLE_TOKEN!` - Consumes a fixed-width token and emits it
//!
//! These macros reduce boilerplate in the automaton's emit paths.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's TokenValue payload
/// * `$line` - The line the token started on
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::CtInt, TokenValue::Integer(42), 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            line: $line,
        }
    };
}

/// Consumes `$width` bytes and emits a payload-free token of `$kind`.
///
/// Used for delimiters and operators whose spelling is fully decided once
/// lookahead has been inspected.
///
/// # Example
///
/// ```ignore
/// (b'=', b'=') => MK_SIMPLE_TOKEN!(self, TokenKind::Equal, 2),
/// ```
#[macro_export]
macro_rules! MK_SIMPLE_TOKEN {
    ($lexer:expr, $kind:expr, $width:literal) => {{
        let line = $lexer.source.line();
        for _ in 0..$width {
            $lexer.source.advance();
        }
        $lexer.emit($crate::MK_TOKEN!(
            $kind,
            $crate::lexer::tokens::TokenValue::None,
            line
        ))
    }};
}
