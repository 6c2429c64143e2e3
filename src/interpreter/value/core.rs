use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    interpreter::value::function::{Function, NativeFunction},
    util::num::i64_to_f64,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. Numbers and
/// strings are immutable; lists are shared behind `Rc` and every list
/// operation produces a new list.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number. Mixed arithmetic promotes the integer
    /// operand to this kind.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An ordered, heterogeneous list of values.
    List(Rc<Vec<Self>>),
    /// A user-defined function together with its captured environment.
    Function(Rc<Function>),
    /// A host-provided callable.
    Native(NativeFunction),
    /// The absence of a value: produced by bare `return`, block bodies, and
    /// statements executed for effect.
    Null,
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(Rc::new(value))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(value) => Self::Integer(*value),
            LiteralValue::Float(value) => Self::Float(*value),
            LiteralValue::Str(text) => Self::Str(text.as_str().into()),
        }
    }
}

impl Value {
    /// Decides the truth value used by conditions and the logical operators.
    ///
    /// Zero of either numeric kind, the empty string, the empty list, and
    /// `Null` are false; everything else, functions included, is true.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(2).is_truthy());
    /// assert!(!Value::Float(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Str(text) => !text.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Function(_) | Self::Native(_) => true,
            Self::Null => false,
        }
    }

    /// Converts a numeric value to `f64`; `None` for every other kind.
    ///
    /// This is the promotion used by mixed arithmetic and by comparisons.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(i64_to_f64(*value)),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` if the value is numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Renders the value the way the interactive prompt echoes results.
    ///
    /// Identical to `Display` except that strings are quoted and their
    /// escape sequences are reversed.
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(text) => {
                let mut out = String::with_capacity(text.len() + 2);
                out.push('"');
                for character in text.chars() {
                    match character {
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        other => out.push(other),
                    }
                }
                out.push('"');
                out
            },
            other => other.to_string(),
        }
    }
}

// Function values compare by identity; everything else compares
// structurally. This equality backs tests and host code, not the language's
// `==`, which rejects mixed kinds instead of calling them unequal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            Self::Str(text) => write!(f, "{text}"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{}", item.repr())?;
                }

                write!(f, "]")
            },
            Self::Function(function) => {
                write!(f, "<function {}>", function.display_name())
            },
            Self::Native(native) => write!(f, "<built-in function {}>", native.name),
            Self::Null => write!(f, "null"),
        }
    }
}
