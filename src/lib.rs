#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn file(&self) -> &str {
        &self.1
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for scanner diagnostics.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=atomc=trace` to see every emitted token.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Returns the text of the 1-based `line` in `source`, without its line ending.
pub fn get_source_line(source: &[u8], line: u32) -> Option<String> {
    if line == 0 {
        return None;
    }

    source
        .split(|byte| *byte == b'\n')
        .nth(line as usize - 1)
        .map(|text| {
            let text = text.strip_suffix(b"\r").unwrap_or(text);
            String::from_utf8_lossy(text).into_owned()
        })
}


/// Renders a lexical error the way the driver reports it.
///
/// ```text
/// error in line 3: invalid character '@'
/// -> main.c
///   |
/// 3 | int a = @;
///   |
/// ```
pub fn format_error(error: &Error, file: &Path, source: &[u8]) -> String {
    let position = error.get_position();
    let line_str = position.line().to_string();
    let padding = line_str.len() + 2;

    let mut out = match error.get_tip() {
        ErrorTip::None => format!("{}\n", error),
        tip => format!("{} ({})\n", error, tip),
    };
    out.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));

    if let Some(line_text) = get_source_line(source, position.line()) {
        out.push_str(&format!("{:>padding$}\n", "|"));
        out.push_str(&format!("{} | {}\n", line_str, line_text.trim()));
        out.push_str(&format!("{:>padding$}\n", "|"));
    }

    out
}
