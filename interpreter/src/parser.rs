use crate::ast::Expr;
use crate::error::Error;
use crate::limits::{PARSER_MAX_HEIGHT, PARSER_MAX_NESTING};
use lox_core::{Token, Type};

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,

    // How deep the parser currently is in nested groups, unary operands and ternary branches
    depth: usize,

    // Height of the tree returned by the last parsing function
    height: usize,
}

// A list of independently parsed expressions, in source order
#[derive(Debug, PartialEq)]
pub struct ExprStream(pub Vec<Expr>);

// Helper alias for shorter return types
type ParserResult = Result<ExprStream, Vec<Error>>;
type ExprResult = Result<Expr, Error>;

// Tokens that plausibly begin a new statement, the parser resumes in front of them after an error
const SYNC_POINTS: [Type; 8] = [
    Type::Class,
    Type::Fun,
    Type::Var,
    Type::For,
    Type::While,
    Type::If,
    Type::Print,
    Type::Return,
];

// Binary operators that can't also be read as a prefix operator
const BINARY_ONLY: [Type; 9] = [
    Type::EqualEqual,
    Type::BangEqual,
    Type::Greater,
    Type::GreaterEqual,
    Type::Less,
    Type::LessEqual,
    Type::Plus,
    Type::Star,
    Type::Slash,
];

impl<'a> Parser<'a> {
    /// `tokens` must be terminated by an `Eof` token, as produced by the scanner.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            height: 0,
        }
    }

    /// Parses exactly one expression, optionally followed by a `;`.
    pub fn parse(&mut self) -> Result<Expr, Vec<Error>> {
        let expr = self.expression().map_err(|err| vec![err])?;
        self.match_one(Type::SemiColon);

        if self.is_at_end() {
            Ok(expr)
        } else {
            Err(vec![Error::parser_error(
                self.peek(),
                "Expect end of expression.",
            )])
        }
    }

    /// Parses a `;` separated list of expressions. A malformed expression is recorded and the
    /// parser synchronizes before trying the next one, so every syntax error in the source is
    /// reported in one go.
    pub fn parse_all(&mut self) -> ParserResult {
        let mut exprs = Vec::new();
        let mut errs = Vec::new();

        while !self.is_at_end() {
            if self.match_one(Type::SemiColon) {
                continue;
            }

            match self.terminated_expression() {
                Ok(expr) => exprs.push(expr),
                Err(err) => {
                    errs.push(err);
                    self.synchronize();
                }
            };
        }

        if errs.is_empty() {
            Ok(ExprStream(exprs))
        } else {
            Err(errs)
        }
    }

    fn terminated_expression(&mut self) -> ExprResult {
        let expr = self.expression()?;
        if !self.is_at_end() {
            self.consume(Type::SemiColon, "Expect ';' after expression.")?;
        }
        Ok(expr)
    }

    fn expression(&mut self) -> ExprResult {
        self.nested(Self::listing)
    }

    // The right operand is parsed one level tighter, so `a, b, c` nests to the left
    fn listing(&mut self) -> ExprResult {
        let mut expr = self.ternary()?;
        while self.match_one(Type::Comma) {
            let operator = self.previous().clone();
            let left = self.height;
            let right = self.ternary()?;
            self.grow(left)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn ternary(&mut self) -> ExprResult {
        let condition = self.equality()?;
        if !self.match_one(Type::Question) {
            return Ok(condition);
        }

        let mut branches = self.height;
        let question = self.previous().clone();
        let then_branch = self.expression()?;
        branches = branches.max(self.height);
        let colon = self
            .consume(
                Type::Colon,
                "Expect ':' after then branch of ternary expression.",
            )?
            .clone();
        let else_branch = self.nested(Self::ternary)?;
        self.grow(branches)?;

        Ok(Expr::ternary(
            condition,
            question,
            then_branch,
            colon,
            else_branch,
        ))
    }

    fn equality(&mut self) -> ExprResult {
        let mut expr = self.comparison()?;
        while self.match_either(&[Type::BangEqual, Type::EqualEqual]) {
            let operator = self.previous().clone();
            let left = self.height;
            let right = self.comparison()?;
            self.grow(left)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ExprResult {
        let mut expr = self.term()?;
        while self.match_either(&[
            Type::Greater,
            Type::GreaterEqual,
            Type::Less,
            Type::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let left = self.height;
            let right = self.term()?;
            self.grow(left)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> ExprResult {
        let mut expr = self.factor()?;
        while self.match_either(&[Type::Plus, Type::Minus]) {
            let operator = self.previous().clone();
            let left = self.height;
            let right = self.factor()?;
            self.grow(left)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ExprResult {
        let mut expr = self.unary()?;
        while self.match_either(&[Type::Slash, Type::Star]) {
            let operator = self.previous().clone();
            let left = self.height;
            let right = self.unary()?;
            self.grow(left)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ExprResult {
        if self.match_either(&[Type::Bang, Type::Minus]) {
            let operator = self.previous().clone();
            let right = self.nested(Self::unary)?;
            self.grow(0)?;
            Ok(Expr::unary(operator, right))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> ExprResult {
        self.height = 1;

        if self.match_one(Type::True) {
            Ok(Expr::literal(true))
        } else if self.match_one(Type::False) {
            Ok(Expr::literal(false))
        } else if self.match_one(Type::Nil) {
            Ok(Expr::nil())
        } else if self.match_either(&[Type::Number, Type::String]) {
            Ok(Expr::literal(self.previous().value.clone()))
        } else if self.match_one(Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            self.grow(0)?;
            Ok(Expr::grouping(expr))
        } else if self.match_either(&BINARY_ONLY) {
            let operator = self.previous().clone();

            // The right-hand side is consumed and dropped so parsing picks up after the whole
            // malformed operation, its own errors are not reported.
            let _ = self.nested(Self::equality);
            Err(Error::parser_error(
                &operator,
                &format!(
                    "Binary operator '{}' is missing a left-hand operand.",
                    operator.lexeme
                ),
            ))
        } else {
            Err(Error::parser_error(self.peek(), "Expect expression."))
        }
    }

    // Runs `parse` one nesting level deeper. The level is given back whether it succeeds or not.
    fn nested(&mut self, parse: fn(&mut Self) -> ExprResult) -> ExprResult {
        if self.depth >= PARSER_MAX_NESTING {
            return Err(Error::parser_error(self.peek(), "Too much nesting."));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // Records a new node on top of the last parsed one and a sibling of height `other`
    fn grow(&mut self, other: usize) -> Result<(), Error> {
        self.height = self.height.max(other) + 1;
        if self.height > PARSER_MAX_HEIGHT {
            Err(Error::parser_error(self.peek(), "Too much nesting."))
        } else {
            Ok(())
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty == Type::Eof
    }

    fn check(&self, ty: Type) -> bool {
        if self.is_at_end() {
            false
        } else {
            self.peek().ty == ty
        }
    }

    fn consume(&mut self, ty: Type, msg: &str) -> Result<&Token, Error> {
        if self.check(ty) {
            Ok(self.advance())
        } else {
            Err(Error::parser_error(self.peek(), msg))
        }
    }

    // Discards tokens until just past a `;` or in front of a token that starts a statement.
    // Always moves forward at least one token, so a retry can't fail on the same token twice.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty == Type::SemiColon || SYNC_POINTS.contains(&self.peek().ty) {
                return;
            }

            self.advance();
        }
    }

    fn advance(&mut self) -> &Token {
        if self.is_at_end() {
            return self.peek();
        }

        self.current += 1;
        self.previous()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn match_either(&mut self, types: &[Type]) -> bool {
        for ty in types {
            if self.match_one(*ty) {
                // Already skipped in the `match_one`, just return result
                return true;
            }
        }

        false
    }

    fn match_one(&mut self, ty: Type) -> bool {
        if self.check(ty) {
            self.advance();
            true
        } else {
            false
        }
    }
}
