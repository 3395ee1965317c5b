use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Type {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    SemiColon,
    Slash,
    Star,
    Question,
    Colon,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier,
    String,
    Number,

    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
    Nil,
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(String::from(value))
    }
}

impl<T> From<Option<T>> for Literal
where
    Literal: From<T>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Nil, Literal::from)
    }
}

macro_rules! impl_from_num_for_literal {
    ( $( $t:ident )* ) => {
        $(
            impl From<$t> for Literal {
                fn from(n: $t) -> Literal {
                    Literal::Num(n as f64)
                }
            }
        )*
    }
}

impl_from_num_for_literal!(u8 i8 u16 i16 u32 i32 u64 i64 usize isize f32 f64);

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Str(val) => write!(f, "{}", val),
            Literal::Num(val) => write!(f, "{}", val),
            Literal::Bool(val) => write!(f, "{}", val),
            Literal::Nil => write!(f, "nil"),
        }
    }
}

/// A single lexeme produced by the scanner.
///
/// `offset` is the byte position of the lexeme in the scanned source, so
/// `&src[offset..offset + lexeme.len()]` always yields the lexeme back.
/// `value` is only present for number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ty: Type,
    pub lexeme: String,
    pub line: usize,
    pub offset: usize,
    pub value: Option<Literal>,
}

impl Token {
    pub fn new(
        ty: Type,
        lexeme: String,
        line: usize,
        offset: usize,
        value: Option<Literal>,
    ) -> Self {
        Token {
            ty,
            lexeme,
            line,
            offset,
            value,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.ty == Type::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{:?} {} {}", self.ty, self.lexeme, value),
            None => write!(f, "{:?} {}", self.ty, self.lexeme),
        }
    }
}
