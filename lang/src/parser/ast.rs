use std::fmt;

use crate::lexer::Position;
use crate::runtime::value::Number;

/// Expression node. Every node remembers the position of the token it was
/// built from so runtime errors can point back into the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(Number),
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        op: InfixOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: Number, position: Position) -> Self {
        Self {
            kind: ExprKind::Number(value),
            position,
        }
    }

    pub fn prefix(op: PrefixOp, operand: Expr, position: Position) -> Self {
        Self {
            kind: ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            position,
        }
    }

    pub fn infix(left: Expr, op: InfixOp, right: Expr, position: Position) -> Self {
        Self {
            kind: ExprKind::Infix {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Plus,   // +
    Negate, // -
    Not,    // !
    BitNot, // ~
}

impl PrefixOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOp::Plus => "+",
            PrefixOp::Negate => "-",
            PrefixOp::Not => "!",
            PrefixOp::BitNot => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOp {
    // Arithmetic
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %

    // Bitwise
    BitAnd,     // &
    BitOr,      // |
    BitXor,     // ^
    ShiftLeft,  // <<
    ShiftRight, // >>

    // Comparison
    Equal,              // ==
    NotEqual,           // !=
    LessThan,           // <
    LessThanOrEqual,    // <=
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
}

impl InfixOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Subtract => "-",
            InfixOp::Multiply => "*",
            InfixOp::Divide => "/",
            InfixOp::Modulo => "%",
            InfixOp::BitAnd => "&",
            InfixOp::BitOr => "|",
            InfixOp::BitXor => "^",
            InfixOp::ShiftLeft => "<<",
            InfixOp::ShiftRight => ">>",
            InfixOp::Equal => "==",
            InfixOp::NotEqual => "!=",
            InfixOp::LessThan => "<",
            InfixOp::LessThanOrEqual => "<=",
            InfixOp::GreaterThan => ">",
            InfixOp::GreaterThanOrEqual => ">=",
        }
    }

    pub fn is_bitwise(&self) -> bool {
        matches!(
            self,
            InfixOp::BitAnd | InfixOp::BitOr | InfixOp::BitXor | InfixOp::ShiftLeft | InfixOp::ShiftRight
        )
    }
}

/// A single parsed expression; `root` is `None` for empty input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ast {
    pub root: Option<Expr>,
}

impl Ast {
    pub fn new(root: Expr) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Print { value: Expr, position: Position },
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Expr(expr) => expr.position,
            Stmt::Print { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ===== Parenthesized dumps =====

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::Prefix { op, operand } => write!(f, "({} {})", op, operand),
            ExprKind::Infix { left, op, right } => write!(f, "({} {} {})", op, left, right),
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => f.write_str("()"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(expr) => write!(f, "{}", expr),
            Stmt::Print { value, .. } => write!(f, "(print {})", value),
        }
    }
}

/// One statement per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
