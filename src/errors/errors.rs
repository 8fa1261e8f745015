use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.0
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::IntegerOverflow { .. } => "IntegerOverflow",
            ErrorImpl::MalformedInteger { .. } => "MalformedInteger",
            ErrorImpl::MalformedReal { .. } => "MalformedReal",
            ErrorImpl::UnclosedComment => "UnclosedComment",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::AllocationFailure => "AllocationFailure",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { character: '&' } => {
                ErrorTip::Suggestion(String::from("did you mean `&&`?"))
            }
            ErrorImpl::InvalidCharacter { character: '|' } => {
                ErrorTip::Suggestion(String::from("did you mean `||`?"))
            }
            ErrorImpl::InvalidCharacter { .. } => ErrorTip::None,
            ErrorImpl::IntegerOverflow { .. } => ErrorTip::Suggestion(String::from(
                "integer literals are limited to 10 characters",
            )),
            ErrorImpl::MalformedInteger { .. } => ErrorTip::Suggestion(String::from(
                "`0x` must be followed by at least one hexadecimal digit",
            )),
            ErrorImpl::MalformedReal { .. } => ErrorTip::Suggestion(String::from(
                "a digit is required after `.` and after the exponent marker",
            )),
            ErrorImpl::UnclosedComment => {
                ErrorTip::Suggestion(String::from("close the comment with `*/`"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("close the literal with `'`"))
            }
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("close the literal with `\"`"))
            }
            ErrorImpl::AllocationFailure => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error in line {}: {}", self.position.0, self.internal_error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid character {character:?}")]
    InvalidCharacter { character: char },
    #[error("integer too large: {literal}")]
    IntegerOverflow { literal: String },
    #[error("invalid integer: {literal}")]
    MalformedInteger { literal: String },
    #[error("invalid real number: {literal}")]
    MalformedReal { literal: String },
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("not enough memory")]
    AllocationFailure,
}
