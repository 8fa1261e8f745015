use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_SIMPLE_TOKEN, MK_TOKEN,
};

use super::{
    source::SourceBuffer,
    tokens::{Token, TokenKind, TokenStream, TokenValue, RESERVED_LOOKUP},
};

/// Integer literals longer than this many characters are rejected.
const MAX_INT_LITERAL_LEN: usize = 10;

/// Outcome of a single `next_token` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// One token of this kind was appended to the stream.
    Emitted(TokenKind),
    /// A comment was consumed and nothing was appended; call again.
    Skipped,
}

/// States of the numeric literal sub-automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// Just consumed the leading `0`.
    LeadingZero,
    Octal,
    Decimal,
    /// Consumed `0x`, no hex digit yet.
    HexStart,
    Hex,
    /// Consumed `.`, no fraction digit yet.
    FractionStart,
    Fraction,
    /// Consumed `e`/`E`.
    ExponentStart,
    /// Consumed the exponent sign.
    ExponentSign,
    Exponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    Integer { radix: u32 },
    Real,
}

pub struct Lexer {
    source: SourceBuffer,
    tokens: TokenStream,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: SourceBuffer, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<input>"))
        };

        Lexer {
            source,
            tokens: TokenStream::new(),
            file: file_name,
        }
    }

    /// Buffers `source` and prepares a scan over it.
    pub fn from_bytes(source: &[u8], file: Option<String>) -> Result<Lexer, Error> {
        let file_name = file.unwrap_or_else(|| String::from("<input>"));
        let buffer = SourceBuffer::new(source)
            .map_err(|e| Error::new(e, Position(0, Rc::new(file_name.clone()))))?;

        Ok(Lexer::new(buffer, Some(file_name)))
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }

    pub fn is_finished(&self) -> bool {
        self.tokens.is_finished()
    }

    pub fn line(&self) -> u32 {
        self.source.line()
    }

    /// Scans the longest valid prefix at the cursor.
    ///
    /// Appends exactly one token, or none when a comment was consumed.
    /// Once `END` has been emitted every further call reports `END` again
    /// without touching the stream.
    pub fn next_token(&mut self) -> Result<Scan, Error> {
        if self.is_finished() {
            return Ok(Scan::Emitted(TokenKind::End));
        }

        self.skip_whitespace();
        let ch = self.source.peek();

        match ch {
            0 if self.source.is_at_end() => {
                let line = self.source.line();
                self.emit(MK_TOKEN!(TokenKind::End, TokenValue::None, line))
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),
            b'0'..=b'9' => self.number(),
            b'\'' => self.char_literal(),
            b'"' => self.string_literal(),

            b',' => MK_SIMPLE_TOKEN!(self, TokenKind::Comma, 1),
            b';' => MK_SIMPLE_TOKEN!(self, TokenKind::Semicolon, 1),
            b'(' => MK_SIMPLE_TOKEN!(self, TokenKind::LPar, 1),
            b')' => MK_SIMPLE_TOKEN!(self, TokenKind::RPar, 1),
            b'[' => MK_SIMPLE_TOKEN!(self, TokenKind::LBracket, 1),
            b']' => MK_SIMPLE_TOKEN!(self, TokenKind::RBracket, 1),
            b'{' => MK_SIMPLE_TOKEN!(self, TokenKind::LAcc, 1),
            b'}' => MK_SIMPLE_TOKEN!(self, TokenKind::RAcc, 1),

            b'.' | b'+' | b'-' | b'*' | b'/' | b'&' | b'|' | b'!' | b'<' | b'>' | b'=' => {
                self.operator(ch)
            }

            _ => Err(self.error(ErrorImpl::InvalidCharacter {
                character: char::from(ch),
            })),
        }
    }

    /// Skips blanks between tokens, counting newlines.
    fn skip_whitespace(&mut self) {
        loop {
            match self.source.peek() {
                b' ' | b'\t' | b'\r' => self.source.advance(),
                b'\n' => {
                    self.source.newline();
                    self.source.advance();
                }
                _ => return,
            }
        }
    }

    pub(crate) fn emit(&mut self, token: Token) -> Result<Scan, Error> {
        trace!(kind = %token.kind, line = token.line, value = %token.value, "token");

        let kind = token.kind;
        self.tokens.push(token);
        Ok(Scan::Emitted(kind))
    }

    fn error(&self, error_impl: ErrorImpl) -> Error {
        self.error_at(error_impl, self.source.line())
    }

    fn error_at(&self, error_impl: ErrorImpl, line: u32) -> Error {
        Error::new(error_impl, Position(line, Rc::clone(&self.file)))
    }

    fn identifier(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        let mark = self.source.mark();

        while matches!(self.source.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.source.advance();
        }

        let span = self.source.slice(mark);
        if let Some(kind) = RESERVED_LOOKUP.get(span) {
            return self.emit(MK_TOKEN!(*kind, TokenValue::None, line));
        }

        let text = copy_text(span).map_err(|e| self.error(e))?;
        self.emit(MK_TOKEN!(TokenKind::Id, TokenValue::Text(text), line))
    }

    fn number(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        let mark = self.source.mark();

        let mut state = if self.source.peek() == b'0' {
            self.source.advance();
            NumberState::LeadingZero
        } else {
            NumberState::Decimal
        };

        // Every transition below consumes exactly one byte; `break` finalizes
        // without consuming the lookahead.
        let kind = loop {
            let ch = self.source.peek();

            state = match (state, ch) {
                (NumberState::LeadingZero, b'x' | b'X') => NumberState::HexStart,
                (NumberState::LeadingZero | NumberState::Octal, b'0'..=b'7') => NumberState::Octal,
                // 8 and 9 demote a leading-zero literal to decimal
                (NumberState::LeadingZero | NumberState::Octal | NumberState::Decimal, b'0'..=b'9') => {
                    NumberState::Decimal
                }
                (NumberState::LeadingZero | NumberState::Octal | NumberState::Decimal, b'.') => {
                    NumberState::FractionStart
                }
                (
                    NumberState::LeadingZero | NumberState::Octal | NumberState::Decimal,
                    b'e' | b'E',
                ) => NumberState::ExponentStart,
                (NumberState::LeadingZero | NumberState::Octal, _) => {
                    break NumberKind::Integer { radix: 8 }
                }
                (NumberState::Decimal, _) => break NumberKind::Integer { radix: 10 },

                (NumberState::HexStart | NumberState::Hex, _) if ch.is_ascii_hexdigit() => {
                    NumberState::Hex
                }
                (NumberState::HexStart, _) => {
                    let literal = String::from_utf8_lossy(self.source.slice(mark)).into_owned();
                    return Err(self.error(ErrorImpl::MalformedInteger { literal }));
                }
                (NumberState::Hex, _) => break NumberKind::Integer { radix: 16 },

                (NumberState::FractionStart | NumberState::Fraction, b'0'..=b'9') => {
                    NumberState::Fraction
                }
                (NumberState::Fraction, b'e' | b'E') => NumberState::ExponentStart,
                (NumberState::Fraction, _) => break NumberKind::Real,

                (NumberState::ExponentStart, b'+' | b'-') => NumberState::ExponentSign,
                (
                    NumberState::ExponentStart | NumberState::ExponentSign | NumberState::Exponent,
                    b'0'..=b'9',
                ) => NumberState::Exponent,
                (NumberState::Exponent, _) => break NumberKind::Real,

                (NumberState::FractionStart | NumberState::ExponentStart | NumberState::ExponentSign, _) => {
                    let literal = String::from_utf8_lossy(self.source.slice(mark)).into_owned();
                    return Err(self.error(ErrorImpl::MalformedReal { literal }));
                }
            };

            self.source.advance();
        };

        let literal = String::from_utf8_lossy(self.source.slice(mark)).into_owned();

        match kind {
            NumberKind::Integer { radix } => {
                if literal.len() > MAX_INT_LITERAL_LEN {
                    return Err(self.error(ErrorImpl::IntegerOverflow { literal }));
                }

                let digits = if radix == 16 { &literal[2..] } else { literal.as_str() };
                let value = i64::from_str_radix(digits, radix)
                    .map_err(|_| self.error(ErrorImpl::IntegerOverflow { literal: literal.clone() }))?;

                self.emit(MK_TOKEN!(TokenKind::CtInt, TokenValue::Integer(value), line))
            }
            NumberKind::Real => {
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| self.error(ErrorImpl::MalformedReal { literal: literal.clone() }))?;

                self.emit(MK_TOKEN!(TokenKind::CtReal, TokenValue::Real(value), line))
            }
        }
    }

    fn char_literal(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        self.source.advance();

        // The payload is the raw byte after the opening quote; escapes are
        // skipped over but not decoded.
        let first = self.source.peek();
        self.quoted(b'\'', ErrorImpl::UnterminatedChar, line)?;

        self.emit(MK_TOKEN!(TokenKind::CtChar, TokenValue::Integer(i64::from(first)), line))
    }

    fn string_literal(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        self.source.advance();

        let mark = self.source.mark();
        let end = self.quoted(b'"', ErrorImpl::UnterminatedString, line)?;
        let text = copy_text(&self.source.as_bytes()[mark..end]).map_err(|e| self.error(e))?;

        self.emit(MK_TOKEN!(TokenKind::CtString, TokenValue::Text(text), line))
    }

    /// Consumes literal content up to and including the closing `quote`.
    ///
    /// Returns the position of the closing quote.
    fn quoted(&mut self, quote: u8, unterminated: ErrorImpl, line: u32) -> Result<usize, Error> {
        loop {
            if self.source.is_at_end() {
                return Err(self.error_at(unterminated, line));
            }

            match self.source.peek() {
                b'\\' => {
                    self.source.advance();
                    if self.source.is_at_end() {
                        continue;
                    }
                    if self.source.peek() == b'\n' {
                        self.source.newline();
                    }
                    self.source.advance();
                }
                b'\n' => {
                    self.source.newline();
                    self.source.advance();
                }
                ch if ch == quote => {
                    let end = self.source.mark();
                    self.source.advance();
                    return Ok(end);
                }
                _ => self.source.advance(),
            }
        }
    }

    fn operator(&mut self, ch: u8) -> Result<Scan, Error> {
        let next = self.source.peek_next();

        match (ch, next) {
            (b'/', b'/') => self.line_comment(),
            (b'/', b'*') => self.block_comment(),

            (b'&', b'&') => MK_SIMPLE_TOKEN!(self, TokenKind::And, 2),
            (b'|', b'|') => MK_SIMPLE_TOKEN!(self, TokenKind::Or, 2),
            (b'=', b'=') => MK_SIMPLE_TOKEN!(self, TokenKind::Equal, 2),
            (b'!', b'=') => MK_SIMPLE_TOKEN!(self, TokenKind::NotEq, 2),
            (b'<', b'=') => MK_SIMPLE_TOKEN!(self, TokenKind::LessEq, 2),
            (b'>', b'=') => MK_SIMPLE_TOKEN!(self, TokenKind::GreaterEq, 2),

            (b'.', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Dot, 1),
            (b'+', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Add, 1),
            (b'-', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Sub, 1),
            (b'*', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Mul, 1),
            (b'/', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Div, 1),
            (b'!', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Not, 1),
            (b'<', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Less, 1),
            (b'>', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Greater, 1),
            (b'=', _) => MK_SIMPLE_TOKEN!(self, TokenKind::Assign, 1),

            // Lone `&` and `|`
            _ => Err(self.error(ErrorImpl::InvalidCharacter {
                character: char::from(ch),
            })),
        }
    }

    fn line_comment(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        self.source.advance();
        self.source.advance();

        while self.source.peek() != b'\n' && !self.source.is_at_end() {
            self.source.advance();
        }

        trace!(line, "line comment");
        Ok(Scan::Skipped)
    }

    fn block_comment(&mut self) -> Result<Scan, Error> {
        let line = self.source.line();
        self.source.advance();
        self.source.advance();

        loop {
            if self.source.is_at_end() {
                return Err(self.error_at(ErrorImpl::UnclosedComment, line));
            }

            match self.source.peek() {
                b'*' if self.source.peek_next() == b'/' => {
                    self.source.advance();
                    self.source.advance();
                    trace!(line, end_line = self.source.line(), "block comment");
                    return Ok(Scan::Skipped);
                }
                b'\n' => {
                    self.source.newline();
                    self.source.advance();
                }
                _ => self.source.advance(),
            }
        }
    }
}

/// Copies literal text out of the source buffer.
fn copy_text(bytes: &[u8]) -> Result<String, ErrorImpl> {
    let mut text = String::new();
    text.try_reserve_exact(bytes.len())
        .map_err(|_| ErrorImpl::AllocationFailure)?;
    text.push_str(&String::from_utf8_lossy(bytes));
    Ok(text)
}

pub fn tokenize(source: impl AsRef<[u8]>, file: Option<String>) -> Result<TokenStream, Error> {
    let source = source.as_ref();
    let mut lex = Lexer::from_bytes(source, file)?;

    debug!(file = %lex.file, bytes = source.len(), "scanning");

    loop {
        match lex.next_token()? {
            Scan::Emitted(TokenKind::End) => break,
            Scan::Emitted(_) | Scan::Skipped => {}
        }
    }

    debug!(file = %lex.file, tokens = lex.tokens.len(), lines = lex.line(), "scan finished");
    Ok(lex.into_tokens())
}
