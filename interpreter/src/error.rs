use std::io;

use lox_core::Error as CoreError;
use lox_core::Token;

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error(transparent)]
    ScannerError(#[from] CoreError),

    #[error("[Line: {line}] Error {}: {msg}", location(.token))]
    ParserError {
        token: Token,

        // line is copied from token, this is required because thiserror doesn't support field
        // access, e.g {token.line}, in error strings
        line: usize,
        msg: String,
    },

    #[error("[Line: {line}] Runtime error at '{}': {msg}", .token.lexeme)]
    RuntimeError {
        token: Token,
        line: usize,
        msg: String,
    },
}

fn location(token: &Token) -> String {
    if token.is_eof() {
        String::from("at end")
    } else {
        format!("at '{}'", token.lexeme)
    }
}

impl Error {
    pub(crate) fn parser_error(token: &Token, msg: &str) -> Self {
        Error::ParserError {
            token: token.clone(),
            line: token.line,
            msg: String::from(msg),
        }
    }

    pub(crate) fn runtime_error(token: &Token, msg: &str) -> Self {
        Error::RuntimeError {
            token: token.clone(),
            line: token.line,
            msg: String::from(msg),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Error::ScannerError(err) => err.line(),
            Error::ParserError { line, .. } => *line,
            Error::RuntimeError { line, .. } => *line,
        }
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Error::RuntimeError { .. })
    }
}

/// Why a `Lox::run` call failed. Static errors (scanning and parsing) are all reported
/// together, evaluation stops at the first runtime error.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{}", join_lines(.0))]
    Static(Vec<Error>),

    #[error(transparent)]
    Runtime(Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    pub fn errors(&self) -> &[Error] {
        match self {
            RunError::Static(errs) => errs,
            RunError::Runtime(err) => std::slice::from_ref(err),
            RunError::Io(_) => &[],
        }
    }

    /// Process exit code for this failure, following the sysexits convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => EX_DATAERR,
            RunError::Runtime(_) => EX_SOFTWARE,
            RunError::Io(_) => EX_IOERR,
        }
    }
}

pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_SOFTWARE: i32 = 70;
pub const EX_IOERR: i32 = 74;

fn join_lines(errs: &[Error]) -> String {
    errs.iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
