use lox_core::{Literal, Token};

// Operator tokens are cloned into the tree during parsing. They are small and the tree is built
// once per run, so holding references back into the token vector isn't worth the lifetimes.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    Literal {
        value: Literal,
    },
    Ternary {
        condition: Box<Expr>,
        question: Token,
        then_branch: Box<Expr>,
        colon: Token,
        else_branch: Box<Expr>,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
}

/// A read-only traversal over an expression tree. `visit_expr` dispatches on the variant so
/// every implementor has to handle each kind of node.
pub trait ExprVisitor {
    type Item;
    type Error;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Item, Self::Error> {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => self.visit_binary(left, operator, right),
            Expr::Grouping { expression } => self.visit_grouping(expression),
            Expr::Literal { value } => self.visit_literal(value),
            Expr::Ternary {
                condition,
                question,
                then_branch,
                colon,
                else_branch,
            } => self.visit_ternary(condition, question, then_branch, colon, else_branch),
            Expr::Unary { operator, right } => self.visit_unary(operator, right),
        }
    }

    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<Self::Item, Self::Error>;
    fn visit_grouping(&mut self, expression: &Expr) -> Result<Self::Item, Self::Error>;
    fn visit_literal(&mut self, value: &Literal) -> Result<Self::Item, Self::Error>;
    fn visit_ternary(
        &mut self,
        condition: &Expr,
        question: &Token,
        then_branch: &Expr,
        colon: &Token,
        else_branch: &Expr,
    ) -> Result<Self::Item, Self::Error>;
    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<Self::Item, Self::Error>;
}

impl Expr {
    pub(crate) fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub(crate) fn grouping(expression: Expr) -> Self {
        Expr::Grouping {
            expression: Box::new(expression),
        }
    }

    pub(crate) fn literal<T>(value: T) -> Self
    where
        Literal: From<T>,
    {
        Expr::Literal {
            value: Literal::from(value),
        }
    }

    pub(crate) fn ternary(
        condition: Expr,
        question: Token,
        then_branch: Expr,
        colon: Token,
        else_branch: Expr,
    ) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            question,
            then_branch: Box::new(then_branch),
            colon,
            else_branch: Box::new(else_branch),
        }
    }

    pub(crate) fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn nil() -> Self {
        Expr::Literal {
            value: Literal::Nil,
        }
    }
}
