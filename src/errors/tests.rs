//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at_line(error_impl: ErrorImpl, line: u32) -> Error {
    Error::new(error_impl, Position(line, Rc::new("test.c".to_string())))
}

#[test]
fn test_error_creation() {
    let error = at_line(ErrorImpl::InvalidCharacter { character: '@' }, 10);

    assert_eq!(error.get_error_name(), "InvalidCharacter");
    assert_eq!(error.get_line(), 10);
    assert_eq!(error.get_position().file(), "test.c");
}

#[test]
fn test_error_display_names_the_line() {
    let error = at_line(ErrorImpl::InvalidCharacter { character: '@' }, 3);
    assert_eq!(error.to_string(), "error in line 3: invalid character '@'");

    let error = at_line(
        ErrorImpl::IntegerOverflow {
            literal: "12345678901".to_string(),
        },
        7,
    );
    assert_eq!(error.to_string(), "error in line 7: integer too large: 12345678901");
}

#[test]
fn test_error_names() {
    let cases = [
        (ErrorImpl::MalformedReal { literal: "3.".to_string() }, "MalformedReal"),
        (ErrorImpl::MalformedInteger { literal: "0x".to_string() }, "MalformedInteger"),
        (ErrorImpl::UnclosedComment, "UnclosedComment"),
        (ErrorImpl::UnterminatedChar, "UnterminatedChar"),
        (ErrorImpl::UnterminatedString, "UnterminatedString"),
        (ErrorImpl::AllocationFailure, "AllocationFailure"),
    ];

    for (error_impl, name) in cases {
        assert_eq!(at_line(error_impl, 1).get_error_name(), name);
    }
}

#[test]
fn test_error_tip_none() {
    let error = at_line(ErrorImpl::InvalidCharacter { character: '@' }, 1);

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggests_double_ampersand() {
    let error = at_line(ErrorImpl::InvalidCharacter { character: '&' }, 1);

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("&&")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_unclosed_comment_message() {
    let error = at_line(ErrorImpl::UnclosedComment, 4);

    assert_eq!(error.get_impl(), &ErrorImpl::UnclosedComment);
    assert_eq!(error.to_string(), "error in line 4: unclosed comment");
}
