use phf::{phf_map, Map};

use crate::error::Error;
use crate::token::{Literal, Token, Type};

pub struct Scanner;

impl Scanner {
    const KEYWORDS: Map<&'static str, Type> = phf_map! {
        "and" => Type::And,
        "class" => Type::Class,
        "else" => Type::Else,
        "false" => Type::False,
        "for" => Type::For,
        "fun" => Type::Fun,
        "if" => Type::If,
        "nil" => Type::Nil,
        "or" => Type::Or,
        "print" => Type::Print,
        "return" => Type::Return,
        "super" => Type::Super,
        "this" => Type::This,
        "true" => Type::True,
        "var" => Type::Var,
        "while" => Type::While,
    };

    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Scanner
    }

    pub fn scan_tokens<'a>(&mut self, src: &'a str) -> TokenStream<'a> {
        TokenStream::new(src)
    }

    pub fn keyword(text: &str) -> Option<Type> {
        Scanner::KEYWORDS.get(text).copied()
    }
}

/// Everything a full scan produced: the tokens (always ending with `Eof`)
/// and the lexical errors met on the way.
#[derive(Debug, PartialEq)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<Error>,
}

/// Scans the whole source eagerly.
pub fn scan(src: &str) -> Scanned {
    let mut stream = Scanner::new().scan_tokens(src);
    let tokens = stream.by_ref().collect();
    Scanned {
        tokens,
        errors: stream.into_errors(),
    }
}

pub struct TokenStream<'a> {
    src: &'a str,
    line: usize,

    // `start` and `current` are byte offsets to the start and end of the token being scanned
    start: usize,
    current: usize,

    // Set once the eof token has been emitted, so the iterator can tell "reached the end of
    // the source" apart from "already handed out the eof token".
    eof: bool,

    // Lexical errors don't stop the stream, they are collected and the offending input skipped.
    errors: Vec<Error>,

    // Set by an unterminated string. The rest of the source is that string's body, it is still
    // tokenized but stray characters in it were already covered by the string's error.
    in_broken_string: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(src: &'a str) -> Self {
        TokenStream {
            src,
            line: 1,
            start: 0,
            current: 0,
            eof: false,
            errors: Vec::new(),
            in_broken_string: false,
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn scan_token(&mut self) -> Result<Option<Token>, Error> {
        let c = self.advance();

        let token = match c {
            '(' => Some(self.make_token(Type::LeftParen)),
            ')' => Some(self.make_token(Type::RightParen)),
            '{' => Some(self.make_token(Type::LeftBrace)),
            '}' => Some(self.make_token(Type::RightBrace)),
            ',' => Some(self.make_token(Type::Comma)),
            '.' => Some(self.make_token(Type::Dot)),
            '-' => Some(self.make_token(Type::Minus)),
            '+' => Some(self.make_token(Type::Plus)),
            ';' => Some(self.make_token(Type::SemiColon)),
            '*' => Some(self.make_token(Type::Star)),
            '?' => Some(self.make_token(Type::Question)),
            ':' => Some(self.make_token(Type::Colon)),

            '!' => {
                if self.match_char('=') {
                    Some(self.make_token(Type::BangEqual))
                } else {
                    Some(self.make_token(Type::Bang))
                }
            }

            '=' => {
                if self.match_char('=') {
                    Some(self.make_token(Type::EqualEqual))
                } else {
                    Some(self.make_token(Type::Equal))
                }
            }

            '<' => {
                if self.match_char('=') {
                    Some(self.make_token(Type::LessEqual))
                } else {
                    Some(self.make_token(Type::Less))
                }
            }

            '>' => {
                if self.match_char('=') {
                    Some(self.make_token(Type::GreaterEqual))
                } else {
                    Some(self.make_token(Type::Greater))
                }
            }

            '/' => {
                if self.match_char('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                    None
                } else {
                    Some(self.make_token(Type::Slash))
                }
            }

            '"' => Some(self.string()?),

            // White spaces, do nothing
            ' ' | '\t' | '\r' => None,

            // Increment for new line
            '\n' => {
                self.line += 1;
                None
            }

            _ => {
                if c.is_ascii_digit() {
                    Some(self.number())
                } else if is_alpha(c) {
                    Some(self.identifier())
                } else if self.in_broken_string {
                    None
                } else {
                    return Err(Error::UnexpectedCharacter {
                        ch: c,
                        line: self.line,
                    });
                }
            }
        };

        Ok(token)
    }

    fn string(&mut self) -> Result<Token, Error> {
        let opening_line = self.line;

        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }

            self.advance();
        }

        if self.is_at_end() {
            // Resume right after the opening quote so whatever followed it is still scanned
            self.current = self.start + 1;
            self.line = opening_line;
            self.in_broken_string = true;
            return Err(Error::UnterminatedString { line: opening_line });
        }

        // consume the closing "
        self.advance();
        let value = Literal::from(&self.src[self.start + 1..self.current - 1]);
        Ok(self.make_token_with_val(Type::String, Some(value)))
    }

    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value = self.src[self.start..self.current]
            .parse::<f64>()
            .ok()
            .map(Literal::Num);
        self.make_token_with_val(Type::Number, value)
    }

    fn identifier(&mut self) -> Token {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let ty = Scanner::keyword(&self.src[self.start..self.current]).unwrap_or(Type::Identifier);
        self.make_token(ty)
    }

    fn peek(&self) -> char {
        self.src[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.src[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let res = self.peek();
        if !self.is_at_end() {
            self.current += res.len_utf8();
        }
        res
    }

    fn match_char(&mut self, c: char) -> bool {
        if self.is_at_end() || self.peek() != c {
            false
        } else {
            self.current += c.len_utf8();
            true
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.src.len()
    }

    fn make_token(&mut self, ty: Type) -> Token {
        self.make_token_with_val(ty, None)
    }

    fn make_token_with_val(&mut self, ty: Type, val: Option<Literal>) -> Token {
        let lexeme = match ty {
            Type::Eof => String::new(),
            _ => String::from(&self.src[self.start..self.current]),
        };

        Token::new(ty, lexeme, self.line, self.start, val)
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.current;

            match self.scan_token() {
                Ok(None) => continue,
                Ok(Some(token)) => return Some(token),
                Err(err) => self.errors.push(err),
            }
        }

        self.eof = true;
        self.start = self.current;
        Some(self.make_token(Type::Eof))
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
