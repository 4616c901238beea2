pub mod ast;
#[cfg(test)]
mod tests;

use std::fmt;

use crate::lexer::{Position, Token, TokenKind};
use crate::runtime::value::Number;
use ast::*;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

// Binary tiers, lowest binding first. Xor shares the multiplicative tier.
const COMPARISON: &[TokenKind] = &[
    TokenKind::EqualEqual,
    TokenKind::BangEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
];
const BIT_OR: &[TokenKind] = &[TokenKind::Pipe];
const BIT_AND: &[TokenKind] = &[TokenKind::Ampersand];
const SHIFT: &[TokenKind] = &[TokenKind::LessLess, TokenKind::GreaterGreater];
const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::Caret,
];

/// Deepest nesting of parentheses and prefix operators the parser accepts.
/// Keeps recursion in the parser, the interpreter and `Drop` bounded.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser over a borrowed token sequence.
///
/// The cursor only moves forward and every error aborts parsing.
pub struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    current: usize,
    depth: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parse exactly one expression covering the whole token sequence.
    pub fn parse_ast(&mut self) -> ParseResult<Ast> {
        if self.is_at_end() {
            return Ok(Ast::empty());
        }

        let root = self.parse_expression()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::new(
                format!("unexpected token {} after expression", token.kind),
                token.position,
            ));
        }

        Ok(Ast::new(root))
    }

    /// Parse a sequence of statements: `print <expr>` or a bare expression,
    /// each optionally followed by `;`.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.match_kind(TokenKind::Semicolon);
        }

        debug!(count = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.match_kind(TokenKind::Print) {
            let position = self.previous().position;
            let value = self.parse_expression()?;
            return Ok(Stmt::Print { value, position });
        }

        Ok(Stmt::Expr(self.parse_expression()?))
    }

    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(COMPARISON, Self::parse_bit_or)
    }

    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(BIT_OR, Self::parse_bit_and)
    }

    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(BIT_AND, Self::parse_shift)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(SHIFT, Self::parse_addition)
    }

    fn parse_addition(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(ADDITIVE, Self::parse_multiplication)
    }

    fn parse_multiplication(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(MULTIPLICATIVE, Self::parse_unary)
    }

    /// Parse `operand (op operand)*` for one precedence tier, folding into a
    /// left-leaning tree.
    fn parse_left_assoc(
        &mut self,
        tier: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut left = operand(self)?;

        while self.check_any(tier) {
            self.advance();
            let operator = *self.previous();
            let op = token_to_infix_op(&operator)?;
            let right = operand(self)?;
            left = Expr::infix(left, op, right, operator.position);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self.peek().map_or_else(|| self.end_position(), |t| t.position);
            return Err(ParseError::new("expression nested too deeply", position));
        }

        self.depth += 1;
        let result = self.parse_prefix();
        self.depth -= 1;
        result
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().map(|token| token.kind) {
            Some(TokenKind::Plus) => PrefixOp::Plus,
            Some(TokenKind::Minus) => PrefixOp::Negate,
            Some(TokenKind::Bang) => PrefixOp::Not,
            Some(TokenKind::Tilde) => PrefixOp::BitNot,
            _ => return self.parse_primary(),
        };

        self.advance();
        let position = self.previous().position;
        let operand = self.parse_unary()?;
        Ok(Expr::prefix(op, operand, position))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.peek() {
            Some(token) => *token,
            None => {
                return Err(ParseError::new(
                    "unexpected end of input",
                    self.end_position(),
                ))
            }
        };

        match token.kind {
            TokenKind::Integer => {
                self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ParseError::new(
                        format!("integer literal '{}' out of range", token.lexeme),
                        token.position,
                    )
                })?;
                Ok(Expr::number(Number::Int(value), token.position))
            }
            TokenKind::Float => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        format!("invalid float literal '{}'", token.lexeme),
                        token.position,
                    )
                })?;
                Ok(Expr::number(Number::Float(value), token.position))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                if !self.match_kind(TokenKind::RightParen) {
                    let position = self.peek().map_or_else(|| self.end_position(), |t| t.position);
                    return Err(ParseError::new("')' expected", position));
                }
                Ok(expr)
            }
            _ => Err(ParseError::new(
                format!("unknown primary token {}", token.kind),
                token.position,
            )),
        }
    }

    // ===== Cursor =====

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.current)
    }

    /// The most recently consumed token.
    ///
    /// # Panics
    /// When nothing has been consumed yet.
    fn previous(&self) -> &Token<'src> {
        assert!(self.current > 0, "previous() called before any token was consumed");
        &self.tokens[self.current - 1]
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        self.peek().is_some_and(|token| kinds.contains(&token.kind))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn end_position(&self) -> Position {
        self.tokens.last().map_or_else(Position::start, |token| token.position)
    }
}

fn token_to_infix_op(token: &Token<'_>) -> ParseResult<InfixOp> {
    match token.kind {
        TokenKind::Plus => Ok(InfixOp::Add),
        TokenKind::Minus => Ok(InfixOp::Subtract),
        TokenKind::Star => Ok(InfixOp::Multiply),
        TokenKind::Slash => Ok(InfixOp::Divide),
        TokenKind::Percent => Ok(InfixOp::Modulo),
        TokenKind::Ampersand => Ok(InfixOp::BitAnd),
        TokenKind::Pipe => Ok(InfixOp::BitOr),
        TokenKind::Caret => Ok(InfixOp::BitXor),
        TokenKind::LessLess => Ok(InfixOp::ShiftLeft),
        TokenKind::GreaterGreater => Ok(InfixOp::ShiftRight),
        TokenKind::EqualEqual => Ok(InfixOp::Equal),
        TokenKind::BangEqual => Ok(InfixOp::NotEqual),
        TokenKind::Less => Ok(InfixOp::LessThan),
        TokenKind::LessEqual => Ok(InfixOp::LessThanOrEqual),
        TokenKind::Greater => Ok(InfixOp::GreaterThan),
        TokenKind::GreaterEqual => Ok(InfixOp::GreaterThanOrEqual),
        _ => Err(ParseError::new(
            format!("unknown operator token {}", token.kind),
            token.position,
        )),
    }
}

/// Parse a token sequence holding a single expression.
pub fn parse(tokens: &[Token<'_>]) -> ParseResult<Ast> {
    let mut parser = Parser::new(tokens);
    parser.parse_ast()
}

/// Parse a token sequence holding a sequence of statements.
pub fn parse_program(tokens: &[Token<'_>]) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}
