use lox_core::{Literal, Token, Type};

use crate::ast::{Expr, ExprVisitor};
use crate::error::Error;
use crate::value::Value;

/// Tree walking evaluator. It holds no state of its own, every call to `evaluate` is
/// independent of the ones before it.
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Interpreter
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, Error> {
        self.visit_expr(expr)
    }
}

fn numbers(operator: &Token, left: Value, right: Value) -> Result<(f64, f64), Error> {
    match (left, right) {
        (Value::Num(left), Value::Num(right)) => Ok((left, right)),
        _ => Err(Error::runtime_error(operator, "Operands must be numbers.")),
    }
}

impl ExprVisitor for Interpreter {
    type Item = Value;
    type Error = Error;

    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<Value, Error> {
        // Left always goes first so side effects, once there are any, follow source order
        let left = self.visit_expr(left)?;
        let right = self.visit_expr(right)?;

        match operator.ty {
            Type::Comma => Ok(right),
            Type::Minus => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left - right))
            }
            Type::Star => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left * right))
            }
            Type::Slash => {
                let (left, right) = numbers(operator, left, right)?;
                if right == 0.0 {
                    Err(Error::runtime_error(operator, "Division by zero."))
                } else {
                    Ok(Value::from(left / right))
                }
            }
            Type::Plus => match (left, right) {
                (Value::Num(left), Value::Num(right)) => Ok(Value::from(left + right)),
                (Value::Str(left), Value::Str(right)) => Ok(Value::from(left + &right)),
                _ => Err(Error::runtime_error(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },
            Type::Greater => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left > right))
            }
            Type::GreaterEqual => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left >= right))
            }
            Type::Less => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left < right))
            }
            Type::LessEqual => {
                let (left, right) = numbers(operator, left, right)?;
                Ok(Value::from(left <= right))
            }
            Type::EqualEqual => Ok(Value::from(left == right)),
            Type::BangEqual => Ok(Value::from(left != right)),
            _ => Err(Error::runtime_error(operator, "Invalid binary operator.")),
        }
    }

    fn visit_grouping(&mut self, expression: &Expr) -> Result<Value, Error> {
        self.visit_expr(expression)
    }

    fn visit_literal(&mut self, value: &Literal) -> Result<Value, Error> {
        Ok(Value::from(value))
    }

    fn visit_ternary(
        &mut self,
        condition: &Expr,
        _: &Token,
        then_branch: &Expr,
        _: &Token,
        else_branch: &Expr,
    ) -> Result<Value, Error> {
        // Only the selected branch is evaluated
        if self.visit_expr(condition)?.is_truthy() {
            self.visit_expr(then_branch)
        } else {
            self.visit_expr(else_branch)
        }
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value, Error> {
        let right = self.visit_expr(right)?;
        match (operator.ty, right) {
            (Type::Minus, Value::Num(val)) => Ok(Value::from(-val)),
            (Type::Minus, _) => Err(Error::runtime_error(operator, "Operand must be a number.")),
            (Type::Bang, val) => Ok(Value::from(!val.is_truthy())),
            _ => Err(Error::runtime_error(operator, "Invalid unary operator.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use lox_core::scan;

    use crate::error::Error;
    use crate::interpreter::Interpreter;
    use crate::parser::Parser;
    use crate::value::Value;

    fn evaluate(src: &str) -> Result<Value, Error> {
        let tokens = scan(src).tokens;
        let expr = Parser::new(&tokens).parse().unwrap();
        Interpreter::new().evaluate(&expr)
    }

    fn test_expressions(tests: &[(&str, Value)]) {
        for (src, expected) in tests {
            assert_eq!(&evaluate(src).unwrap(), expected, "evaluating {:?}", src);
        }
    }

    fn test_runtime_errors(tests: &[(&str, &str)]) {
        for (src, expected) in tests {
            match evaluate(src) {
                Err(Error::RuntimeError { msg, .. }) => assert_eq!(msg, *expected),
                other => panic!("Expecting runtime error '{}', found {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_literals_evaluate_to_themselves() {
        test_expressions(&[
            ("nil", Value::Nil),
            ("true", Value::from(true)),
            ("false", Value::from(false)),
            ("12.5", Value::from(12.5)),
            ("\"lox\"", Value::from("lox")),
            ("\"\"", Value::from("")),
            ("((\"nested\"))", Value::from("nested")),
        ]);
    }

    #[test]
    fn test_arithmetic() {
        test_expressions(&[
            ("1 + 2 * 3", Value::from(7)),
            ("(1 + 2) * 3", Value::from(9)),
            ("(1 + 2) * 5 + 2", Value::from(17)),
            ("10 - 4 - 3", Value::from(3)),
            ("7 / 2", Value::from(3.5)),
            ("-10.5", Value::from(-10.5)),
            ("--3", Value::from(3)),
            ("\"hello \" + \"world\"", Value::from("hello world")),
        ]);
    }

    #[test]
    fn test_comparison_and_equality() {
        test_expressions(&[
            ("1 < 2", Value::from(true)),
            ("2 <= 2", Value::from(true)),
            ("1 > 2", Value::from(false)),
            ("3 >= 4", Value::from(false)),
            ("1 == 1", Value::from(true)),
            ("1 != 1", Value::from(false)),
            ("nil == nil", Value::from(true)),
            ("nil == false", Value::from(false)),
            ("\"a\" == \"a\"", Value::from(true)),
            ("1 == \"1\"", Value::from(false)),
            ("0 == false", Value::from(false)),
            ("true != \"true\"", Value::from(true)),
        ]);
    }

    #[test]
    fn test_truthiness_through_bang() {
        test_expressions(&[
            ("!nil", Value::from(true)),
            ("!false", Value::from(true)),
            ("!\"\"", Value::from(true)),
            ("!0", Value::from(false)),
            ("!\"a\"", Value::from(false)),
            ("!!true", Value::from(true)),
        ]);
    }

    #[test]
    fn test_ternary_short_circuits() {
        test_expressions(&[
            ("true ? 1 : (1/0)", Value::from(1)),
            ("false ? (1/0) : 2", Value::from(2)),
            ("0 ? \"zero is truthy\" : \"no\"", Value::from("zero is truthy")),
            ("\"\" ? 1 : nil", Value::Nil),
            ("false ? 1 : false ? 2 : 3", Value::from(3)),
        ]);
    }

    #[test]
    fn test_comma_yields_right_operand() {
        test_expressions(&[
            ("1, 2, 3", Value::from(3)),
            ("(1, \"two\")", Value::from("two")),
        ]);
    }

    #[test]
    fn test_left_operand_fails_first() {
        // Both operands are broken, the error comes from the left one
        match evaluate("(-\"a\") + (1 / 0)") {
            Err(Error::RuntimeError { msg, token, .. }) => {
                assert_eq!(msg, "Operand must be a number.");
                assert_eq!(token.lexeme, "-");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_runtime_type_errors() {
        test_runtime_errors(&[
            ("1 + false", "Operands must be two numbers or two strings."),
            ("true + false", "Operands must be two numbers or two strings."),
            ("\"hello\" + 10", "Operands must be two numbers or two strings."),
            ("nil - 1", "Operands must be numbers."),
            ("\"a\" * 3", "Operands must be numbers."),
            ("\"a\" < \"b\"", "Operands must be numbers."),
            ("1 >= nil", "Operands must be numbers."),
            ("-false", "Operand must be a number."),
            ("-\"1\"", "Operand must be a number."),
            ("1 / 0", "Division by zero."),
            ("1, 1 / (2 - 2)", "Division by zero."),
        ]);
    }
}
