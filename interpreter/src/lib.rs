pub mod ast;
pub mod error;
pub mod interpreter;
mod limits;
pub mod lox;
pub mod parser;
pub mod printer;
pub mod value;

pub use error::{Error, RunError};
pub use lox::{Lox, Options};
