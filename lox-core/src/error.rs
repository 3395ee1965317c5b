#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum Error {
    #[error("[Line: {line}] Error : Unterminated string.")]
    UnterminatedString { line: usize },

    #[error("[Line: {line}] Error : Unexpected character '{ch}'.")]
    UnexpectedCharacter { ch: char, line: usize },
}

impl Error {
    pub fn line(&self) -> usize {
        match self {
            Error::UnterminatedString { line } => *line,
            Error::UnexpectedCharacter { line, .. } => *line,
        }
    }
}
