use std::fmt;

/// Numeric value: a 64-bit signed integer or a 64-bit float.
///
/// Numbers are plain values and are copied freely. Equality and ordering
/// compare the widened (`f64`) value, so `Int(2) == Float(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Number::Float(f) => Some(*f),
            Number::Int(_) => None,
        }
    }

    /// # Panics
    /// When the number is a float.
    pub fn expect_int(&self) -> i64 {
        match self {
            Number::Int(i) => *i,
            Number::Float(f) => panic!("expected an integer number, found float {}", f),
        }
    }

    /// # Panics
    /// When the number is an integer.
    pub fn expect_float(&self) -> f64 {
        match self {
            Number::Float(f) => *f,
            Number::Int(i) => panic!("expected a float number, found integer {}", i),
        }
    }

    /// The value coerced to `f64` regardless of storage kind.
    pub fn widen(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.widen() == 0.0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Number::Int(_) => "integer",
            Number::Float(_) => "float",
        }
    }

    pub fn from_bool(value: bool) -> Self {
        Number::Int(value as i64)
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.widen() == other.widen()
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.widen().partial_cmp(&other.widen())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            // Debug formatting keeps the trailing ".0" on whole floats.
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}
