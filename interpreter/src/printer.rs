use std::convert::Infallible;

use lox_core::{Literal, Token};

use crate::ast::{Expr, ExprVisitor};

/// Prints an expression as a fully parenthesized, prefix tree, e.g. `(+ 1 (group 2))`.
pub struct AstPrinter;

/// Prints an expression in reverse polish notation, e.g. `1 2 +`. Groupings leave no trace.
pub struct RpnPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        match self.visit_expr(expr) {
            Ok(printed) => printed,
            Err(never) => match never {},
        }
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({}", name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&self.print(expr));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor for AstPrinter {
    type Item = String;
    type Error = Infallible;

    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<String, Infallible> {
        Ok(self.parenthesize(&operator.lexeme, &[left, right]))
    }

    fn visit_grouping(&mut self, expression: &Expr) -> Result<String, Infallible> {
        Ok(self.parenthesize("group", &[expression]))
    }

    fn visit_literal(&mut self, value: &Literal) -> Result<String, Infallible> {
        Ok(value.to_string())
    }

    fn visit_ternary(
        &mut self,
        condition: &Expr,
        question: &Token,
        then_branch: &Expr,
        colon: &Token,
        else_branch: &Expr,
    ) -> Result<String, Infallible> {
        let name = format!("{}{}", question.lexeme, colon.lexeme);
        Ok(self.parenthesize(&name, &[condition, then_branch, else_branch]))
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<String, Infallible> {
        Ok(self.parenthesize(&operator.lexeme, &[right]))
    }
}

impl RpnPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        match self.visit_expr(expr) {
            Ok(printed) => printed,
            Err(never) => match never {},
        }
    }

    fn postfix(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::new();
        for expr in exprs {
            out.push_str(&self.print(expr));
            out.push(' ');
        }
        out.push_str(name);
        out
    }
}

impl ExprVisitor for RpnPrinter {
    type Item = String;
    type Error = Infallible;

    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<String, Infallible> {
        Ok(self.postfix(&operator.lexeme, &[left, right]))
    }

    fn visit_grouping(&mut self, expression: &Expr) -> Result<String, Infallible> {
        self.visit_expr(expression)
    }

    fn visit_literal(&mut self, value: &Literal) -> Result<String, Infallible> {
        Ok(value.to_string())
    }

    fn visit_ternary(
        &mut self,
        condition: &Expr,
        question: &Token,
        then_branch: &Expr,
        colon: &Token,
        else_branch: &Expr,
    ) -> Result<String, Infallible> {
        let name = format!("{}{}", question.lexeme, colon.lexeme);
        Ok(self.postfix(&name, &[condition, then_branch, else_branch]))
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<String, Infallible> {
        Ok(self.postfix(&operator.lexeme, &[right]))
    }
}
