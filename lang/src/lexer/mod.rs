pub mod token;

pub use token::{escape_lexeme, Position, Token, TokenKind};

use std::fmt;
use tracing::{debug, trace};


#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnterminatedString { position: Position },
    UnterminatedComment { position: Position },
    InvalidFloat { lexeme: String, position: Position },
    UnknownToken { lexeme: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::UnterminatedComment { position }
            | LexError::InvalidFloat { position, .. }
            | LexError::UnknownToken { position, .. } => *position,
        }
    }

    pub fn message(&self) -> String {
        match self {
            LexError::UnterminatedString { .. } => "unterminated string literal".to_string(),
            LexError::UnterminatedComment { .. } => {
                "unterminated multi-line comment, expected ']#'".to_string()
            }
            LexError::InvalidFloat { lexeme, .. } => {
                format!("invalid floating point number '{}'", lexeme)
            }
            LexError::UnknownToken { lexeme, .. } => format!("unknown token '{}'", lexeme),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.position())
    }
}

impl std::error::Error for LexError {}

pub type LexResult<'src> = Result<Vec<Token<'src>>, LexError>;

/// Tokenize a whole source buffer.
///
/// Whitespace and comments are consumed but never emitted. Tokenization
/// stops at the first error.
pub fn lex(input: &str) -> LexResult<'_> {
    let mut lexer = Lexer::new(input);
    lexer.lex_all()
}

struct Lexer<'src> {
    source: &'src str,
    /// Byte offset of the first character of the current lexeme.
    start: usize,
    /// Byte offset of the next character to consume.
    current: usize,
    line: u32,
    column: u32,
    start_position: Position,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            column: 0,
            start_position: Position::start(),
        }
    }

    fn lex_all(&mut self) -> LexResult<'src> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let token = self.next_token()?;
            match token.kind {
                TokenKind::Insignificant => continue,
                TokenKind::Unknown => {
                    return Err(LexError::UnknownToken {
                        lexeme: token.lexeme.to_string(),
                        position: token.position,
                    })
                }
                _ => {
                    trace!(%token, "token");
                    tokens.push(token);
                }
            }
        }

        debug!(count = tokens.len(), "lexed source");
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        self.start = self.current;
        self.start_position = self.current_position();

        let kind = match self.advance() {
            ' ' | '\t' | '\r' | '\n' => TokenKind::Insignificant,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '&' => TokenKind::Ampersand,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '!' => {
                if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else if self.match_char('>') {
                    TokenKind::GreaterGreater
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else if self.match_char('<') {
                    TokenKind::LessLess
                } else {
                    TokenKind::Less
                }
            }
            '"' => self.lex_string()?,
            '#' => self.lex_comment()?,
            '0'..='9' => self.lex_number()?,
            ch if ch.is_ascii_alphabetic() || ch == '_' => self.lex_identifier_or_keyword(),
            _ => TokenKind::Unknown,
        };

        Ok(self.make_token(kind))
    }

    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        loop {
            if self.is_at_end() {
                return Err(LexError::UnterminatedString {
                    position: self.start_position,
                });
            }
            match self.advance() {
                '"' => return Ok(TokenKind::String),
                '\\' => {
                    if !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => {}
            }
        }
    }

    fn lex_comment(&mut self) -> Result<TokenKind, LexError> {
        if self.match_char('[') {
            loop {
                if self.is_at_end() {
                    return Err(LexError::UnterminatedComment {
                        position: self.start_position,
                    });
                }
                if self.peek() == ']' && self.peek_next() == '#' {
                    self.advance();
                    self.advance();
                    return Ok(TokenKind::Insignificant);
                }
                self.advance();
            }
        }

        // The newline itself is left for the next token so line tracking
        // stays in one place.
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
        Ok(TokenKind::Insignificant)
    }

    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        self.consume_digits();

        if self.peek() != '.' {
            return Ok(TokenKind::Integer);
        }

        if !self.peek_next().is_ascii_digit() {
            self.advance(); // include the dot in the reported lexeme
            return Err(LexError::InvalidFloat {
                lexeme: self.lexeme().to_string(),
                position: self.start_position,
            });
        }

        self.advance(); // '.'
        self.consume_digits();
        Ok(TokenKind::Float)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            self.advance();
        }

        TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier)
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(self.lexeme(), kind, self.start_position)
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    /// Consume one character, keeping line and column in step with it.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if self.is_at_end() {
            return ch;
        }
        self.current += ch.len_utf8();

        match ch {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            '\r' => self.column = 0,
            _ => self.column += 1,
        }

        ch
    }
}
