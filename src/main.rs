use std::{env, fs, path::PathBuf, process::ExitCode, time::Instant};

use atomc::{format_error, init_tracing, lexer::lexer::tokenize};
use tracing::debug;

const USAGE: &str = "usage: atomc [--quiet] <file>";

struct Config {
    path: PathBuf,
    quiet: bool,
}

impl Config {
    fn from_args(args: impl Iterator<Item = String>) -> Result<Config, String> {
        let mut path = None;
        let mut quiet = false;

        for arg in args {
            match arg.as_str() {
                "-q" | "--quiet" => quiet = true,
                "-h" | "--help" => return Err(String::from(USAGE)),
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown option `{}`\n{}", flag, USAGE))
                }
                _ if path.is_some() => return Err(String::from(USAGE)),
                _ => path = Some(PathBuf::from(&arg)),
            }
        }

        match path {
            Some(path) => Ok(Config { path, quiet }),
            None => Err(String::from(USAGE)),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let file_contents = match fs::read(&config.path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("error: cannot open {}: {}", config.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let file_name = config
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let start = Instant::now();
    let tokens = match tokenize(&file_contents, file_name) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", format_error(&error, &config.path, &file_contents));
            return ExitCode::FAILURE;
        }
    };
    debug!(elapsed = ?start.elapsed(), "tokenized");

    if config.quiet {
        let lines = tokens.last().map_or(1, |token| token.line());
        println!("{} tokens, {} lines", tokens.len(), lines);
    } else {
        for token in &tokens {
            println!("{}", token.describe());
        }
    }

    ExitCode::SUCCESS
}
