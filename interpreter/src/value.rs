use std::fmt::{Display, Formatter};

use lox_core::Literal;

/// A runtime value. Every evaluated expression produces exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    Nil,
}

impl Value {
    /// `nil`, `false` and the empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(val) => *val,
            Value::Str(val) => !val.is_empty(),
            Value::Num(_) => true,
        }
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        match value {
            Literal::Str(val) => Value::Str(val),
            Literal::Num(val) => Value::Num(val),
            Literal::Bool(val) => Value::Bool(val),
            Literal::Nil => Value::Nil,
        }
    }
}

impl From<&Literal> for Value {
    fn from(value: &Literal) -> Self {
        Value::from(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(String::from(value))
    }
}

macro_rules! impl_from_num_for_value {
    ( $( $t:ident )* ) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Value {
                    Value::Num(n as f64)
                }
            }
        )*
    }
}

impl_from_num_for_value!(u8 i8 u16 i16 u32 i32 u64 i64 usize isize f32 f64);

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(val) => write!(f, "{}", val),
            Value::Num(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Nil => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn test_truthiness() {
        let tests = [
            (Value::Nil, false),
            (Value::from(false), false),
            (Value::from(""), false),
            (Value::from(true), true),
            (Value::from(0), true),
            (Value::from(-1.5), true),
            (Value::from("0"), true),
            (Value::from(" "), true),
        ];

        for (value, expected) in tests {
            assert_eq!(value.is_truthy(), expected, "truthiness of {:?}", value);
        }
    }

    #[test]
    fn test_display() {
        let tests = [
            (Value::Nil, "nil"),
            (Value::from(true), "true"),
            (Value::from(7), "7"),
            (Value::from(-10.5), "-10.5"),
            (Value::from(0.1 + 0.2), "0.30000000000000004"),
            (Value::from("hello world"), "hello world"),
        ];

        for (value, expected) in tests {
            assert_eq!(value.to_string(), expected);
        }
    }
}
