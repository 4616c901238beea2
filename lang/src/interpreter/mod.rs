//! Tree-walking evaluation of parsed expressions and programs.
//!
//! Evaluation is a pure function of the tree: there is no environment. Every
//! step returns an [`EvalResult`], so the first runtime error aborts the
//! whole evaluation instead of being folded into a placeholder value.


use std::fmt;

use crate::lexer::Position;
use crate::parser::ast::{Ast, Expr, ExprKind, Program, Stmt};
use crate::runtime::operations::{apply_infix, apply_prefix, OpError};
use crate::runtime::value::Number;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    DivisionByZero { position: Position },
    ModuloByZero { position: Position },
    /// A bitwise operator was applied to a float.
    NonIntegralOperand { op: &'static str, position: Position },
}

impl RuntimeError {
    fn from_op(err: OpError, position: Position) -> Self {
        match err {
            OpError::DivisionByZero => RuntimeError::DivisionByZero { position },
            OpError::ModuloByZero => RuntimeError::ModuloByZero { position },
            OpError::NonIntegralOperand { op } => RuntimeError::NonIntegralOperand { op, position },
        }
    }

    pub fn position(&self) -> Position {
        match self {
            RuntimeError::DivisionByZero { position }
            | RuntimeError::ModuloByZero { position }
            | RuntimeError::NonIntegralOperand { position, .. } => *position,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RuntimeError::DivisionByZero { .. } => "division by zero".to_string(),
            RuntimeError::ModuloByZero { .. } => "modulo by zero".to_string(),
            RuntimeError::NonIntegralOperand { op, .. } => {
                format!("non-integral operand for bitwise operator '{}'", op)
            }
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.position())
    }
}

impl std::error::Error for RuntimeError {}

pub type EvalResult<T> = Result<T, RuntimeError>;

/// Evaluate a single-expression tree. An empty tree evaluates to `0`.
pub fn interpret(ast: &Ast) -> EvalResult<Number> {
    match &ast.root {
        Some(root) => evaluate(root),
        None => Ok(Number::Int(0)),
    }
}

/// Evaluate an expression node. The left operand of an infix node is fully
/// evaluated before the right one.
pub fn evaluate(expr: &Expr) -> EvalResult<Number> {
    match &expr.kind {
        ExprKind::Number(value) => Ok(*value),
        ExprKind::Prefix { op, operand } => {
            let operand = evaluate(operand)?;
            apply_prefix(*op, operand).map_err(|err| RuntimeError::from_op(err, expr.position))
        }
        ExprKind::Infix { left, op, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            apply_infix(*op, left, right).map_err(|err| RuntimeError::from_op(err, expr.position))
        }
    }
}

/// Result of running a whole program.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Value of the last expression statement, `0` when there is none.
    pub value: Number,
    /// Output of `print` statements, one entry per statement.
    pub printed: Vec<String>,
}

/// Executes statements in order, collecting `print` output.
///
/// Output printed before a failing statement stays available through
/// [`Interpreter::printed`].
#[derive(Debug, Default)]
pub struct Interpreter {
    printed: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(&mut self, program: &Program) -> EvalResult<Number> {
        let mut last = Number::Int(0);

        for stmt in &program.statements {
            match stmt {
                Stmt::Expr(expr) => last = evaluate(expr)?,
                Stmt::Print { value, .. } => {
                    let value = evaluate(value)?;
                    self.printed.push(value.to_string());
                }
            }
        }

        debug!(statements = program.statements.len(), value = %last, "executed program");
        Ok(last)
    }

    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn into_printed(self) -> Vec<String> {
        self.printed
    }
}

/// Run a program from start to finish.
pub fn execute(program: &Program) -> EvalResult<Execution> {
    let mut interpreter = Interpreter::new();
    let value = interpreter.execute(program)?;
    Ok(Execution {
        value,
        printed: interpreter.into_printed(),
    })
}
