use std::fmt;

use super::value::Number;
use crate::parser::ast::{InfixOp, PrefixOp};

/// Failure of a single numeric operation. The interpreter attaches the
/// source position before reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    DivisionByZero,
    ModuloByZero,
    /// A bitwise operator received a float operand.
    NonIntegralOperand { op: &'static str },
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpError::DivisionByZero => write!(f, "division by zero"),
            OpError::ModuloByZero => write!(f, "modulo by zero"),
            OpError::NonIntegralOperand { op } => {
                write!(f, "non-integral operand for bitwise operator '{}'", op)
            }
        }
    }
}

pub type OpResult = Result<Number, OpError>;

/// Apply a prefix operator.
pub fn apply_prefix(op: PrefixOp, operand: Number) -> OpResult {
    match op {
        PrefixOp::Plus => Ok(operand),
        PrefixOp::Negate => Ok(negate(operand)),
        PrefixOp::Not => Ok(logical_not(operand)),
        PrefixOp::BitNot => bit_not(operand),
    }
}

/// Apply an infix operator to two already evaluated operands.
pub fn apply_infix(op: InfixOp, left: Number, right: Number) -> OpResult {
    match op {
        InfixOp::Add => Ok(add(left, right)),
        InfixOp::Subtract => Ok(sub(left, right)),
        InfixOp::Multiply => Ok(mul(left, right)),
        InfixOp::Divide => div(left, right),
        InfixOp::Modulo => rem(left, right),
        InfixOp::Equal => Ok(Number::from_bool(left.widen() == right.widen())),
        InfixOp::NotEqual => Ok(Number::from_bool(left.widen() != right.widen())),
        InfixOp::LessThan => Ok(Number::from_bool(left.widen() < right.widen())),
        InfixOp::LessThanOrEqual => Ok(Number::from_bool(left.widen() <= right.widen())),
        InfixOp::GreaterThan => Ok(Number::from_bool(left.widen() > right.widen())),
        InfixOp::GreaterThanOrEqual => Ok(Number::from_bool(left.widen() >= right.widen())),
        InfixOp::BitAnd => integral(op, left, right, |l, r| l & r),
        InfixOp::BitOr => integral(op, left, right, |l, r| l | r),
        InfixOp::BitXor => integral(op, left, right, |l, r| l ^ r),
        InfixOp::ShiftLeft => integral(op, left, right, |l, r| l.wrapping_shl(r as u32)),
        InfixOp::ShiftRight => integral(op, left, right, |l, r| l.wrapping_shr(r as u32)),
    }
}

// ===== Arithmetic =====

/// Add two numbers.
///
/// - Int + Int → Int (wrapping)
/// - Float + Float → Float
/// - mixed → Float
pub fn add(left: Number, right: Number) -> Number {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => Number::Int(l.wrapping_add(r)),
        _ => Number::Float(left.widen() + right.widen()),
    }
}

pub fn sub(left: Number, right: Number) -> Number {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => Number::Int(l.wrapping_sub(r)),
        _ => Number::Float(left.widen() - right.widen()),
    }
}

pub fn mul(left: Number, right: Number) -> Number {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => Number::Int(l.wrapping_mul(r)),
        _ => Number::Float(left.widen() * right.widen()),
    }
}

/// Divide two numbers.
///
/// Integer division truncates toward zero. A zero divisor is an error for
/// both storage kinds, checked on the widened value before dividing.
pub fn div(left: Number, right: Number) -> OpResult {
    if right.is_zero() {
        return Err(OpError::DivisionByZero);
    }
    Ok(match (left, right) {
        (Number::Int(l), Number::Int(r)) => Number::Int(l.wrapping_div(r)),
        _ => Number::Float(left.widen() / right.widen()),
    })
}

/// Remainder of truncated division; the result takes the sign of the
/// dividend for both integers and floats.
pub fn rem(left: Number, right: Number) -> OpResult {
    if right.is_zero() {
        return Err(OpError::ModuloByZero);
    }
    Ok(match (left, right) {
        (Number::Int(l), Number::Int(r)) => Number::Int(l.wrapping_rem(r)),
        _ => Number::Float(left.widen() % right.widen()),
    })
}

// ===== Unary =====

pub fn negate(operand: Number) -> Number {
    match operand {
        Number::Int(i) => Number::Int(i.wrapping_neg()),
        Number::Float(f) => Number::Float(-f),
    }
}

/// Logical not, keeping the storage kind: zero becomes one, anything else
/// becomes zero.
pub fn logical_not(operand: Number) -> Number {
    match operand {
        Number::Int(i) => Number::Int((i == 0) as i64),
        Number::Float(f) => Number::Float(if f == 0.0 { 1.0 } else { 0.0 }),
    }
}

pub fn bit_not(operand: Number) -> OpResult {
    match operand {
        Number::Int(i) => Ok(Number::Int(!i)),
        Number::Float(_) => Err(OpError::NonIntegralOperand {
            op: PrefixOp::BitNot.symbol(),
        }),
    }
}

// ===== Bitwise =====

fn integral(op: InfixOp, left: Number, right: Number, f: impl Fn(i64, i64) -> i64) -> OpResult {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => Ok(Number::Int(f(l, r))),
        _ => Err(OpError::NonIntegralOperand { op: op.symbol() }),
    }
}
