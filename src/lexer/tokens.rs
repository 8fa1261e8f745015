use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, ops::Index};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static [u8], TokenKind> = {
        let mut map: HashMap<&'static [u8], TokenKind> = HashMap::new();
        map.insert(b"break", TokenKind::Break);
        map.insert(b"char", TokenKind::Char);
        map.insert(b"else", TokenKind::Else);
        map.insert(b"for", TokenKind::For);
        map.insert(b"if", TokenKind::If);
        map.insert(b"return", TokenKind::Return);
        map.insert(b"struct", TokenKind::Struct);
        map.insert(b"void", TokenKind::Void);
        map.insert(b"while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Id,

    // Reserved
    Break,
    Char,
    Else,
    For,
    If,
    Return,
    Struct,
    Void,
    While,

    // Constants
    CtInt,
    CtReal,
    CtString,
    CtChar,

    // Delimiters
    Comma,
    Semicolon,
    LPar,
    RPar,
    LBracket,
    RBracket,
    LAcc,
    RAcc,

    // Operators
    Add,
    Sub,
    Mul,
    Div,
    Dot,
    And,
    Or,
    Not,
    Assign,  // =
    Equal,   // ==
    NotEq,   // !=
    Less,
    LessEq,
    Greater,
    GreaterEq,

    End,
}

/// Shape of the value a token of a given kind carries.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PayloadShape {
    None,
    Text,
    Integer,
    Real,
}

impl TokenKind {
    /// Name used by the reporter and in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Id => "ID",
            TokenKind::Break => "BREAK",
            TokenKind::Char => "CHAR",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Return => "RETURN",
            TokenKind::Struct => "STRUCT",
            TokenKind::Void => "VOID",
            TokenKind::While => "WHILE",
            TokenKind::CtInt => "CT_INT",
            TokenKind::CtReal => "CT_REAL",
            TokenKind::CtString => "CT_STRING",
            TokenKind::CtChar => "CT_CHAR",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LAcc => "LACC",
            TokenKind::RAcc => "RACC",
            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Dot => "DOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Less => "LESS",
            TokenKind::LessEq => "LESSEQ",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEq => "GREATEREQ",
            TokenKind::End => "END",
        }
    }

    pub fn payload(&self) -> PayloadShape {
        match self {
            TokenKind::Id | TokenKind::CtString => PayloadShape::Text,
            TokenKind::CtInt | TokenKind::CtChar => PayloadShape::Integer,
            TokenKind::CtReal => PayloadShape::Real,
            _ => PayloadShape::None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Text(String),
    Integer(i64),
    Real(f64),
}

impl TokenValue {
    pub fn shape(&self) -> PayloadShape {
        match self {
            TokenValue::None => PayloadShape::None,
            TokenValue::Text(_) => PayloadShape::Text,
            TokenValue::Integer(_) => PayloadShape::Integer,
            TokenValue::Real(_) => PayloadShape::Real,
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Real(value) => write!(f, "{}", value),
        }
    }
}

/// A classified lexeme. Built only by the scanner, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) value: TokenValue,
    pub(crate) line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn real(&self) -> Option<f64> {
        match self.value {
            TokenValue::Real(value) => Some(value),
            _ => None,
        }
    }

    /// One reporter line: `KIND line N`, plus `: value` for tokens with a payload.
    pub fn describe(&self) -> String {
        match (&self.kind, &self.value) {
            (_, TokenValue::None) => format!("{} line {}", self.kind, self.line),
            (TokenKind::CtString, value) => {
                format!("{} line {}: \"{}\"", self.kind, self.line, value)
            }
            (TokenKind::CtChar, TokenValue::Integer(byte)) => {
                let shown = u8::try_from(*byte).map(char::from).unwrap_or('?');
                format!("{} line {}: {} {:?}", self.kind, self.line, byte, shown)
            }
            (_, value) => format!("{} line {}: {}", self.kind, self.line, value),
        }
    }
}

/// Ordered, append-only sequence of tokens in parse order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        TokenStream { tokens: vec![] }
    }

    pub(crate) fn push(&mut self, token: Token) {
        debug_assert_eq!(token.kind.payload(), token.value.shape());
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// True once the `END` token has been appended.
    pub fn is_finished(&self) -> bool {
        matches!(self.last(), Some(token) if token.kind == TokenKind::End)
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
