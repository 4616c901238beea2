use std::fmt;

use crate::runtime::string::Str;

/// Position in source code.
///
/// `line` is 1-indexed. `column` counts the characters consumed on the
/// current line before the position, so the first character of a line is at
/// column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position of the first character of a source buffer.
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Dot,          // .
    Semicolon,    // ;
    Colon,        // :

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Pipe,           // |
    Caret,          // ^
    Tilde,          // ~
    Bang,           // !
    BangEqual,      // !=
    Equal,          // =
    EqualEqual,     // ==
    Greater,        // >
    GreaterEqual,   // >=
    GreaterGreater, // >>
    Less,           // <
    LessEqual,      // <=
    LessLess,       // <<

    // Literals
    Integer,
    Float,
    String,
    Identifier,

    // Keywords
    If,
    Then,
    Else,
    End,
    True,
    False,
    And,
    Or,
    While,
    Do,
    For,
    Func,
    Null,
    Print,
    Return,

    /// Whitespace, newlines and comments. Never emitted by the lexer.
    Insignificant,
    /// A character no rule matched. Always reported as a lexer error.
    Unknown,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::If),
    ("then", TokenKind::Then),
    ("else", TokenKind::Else),
    ("end", TokenKind::End),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("while", TokenKind::While),
    ("do", TokenKind::Do),
    ("for", TokenKind::For),
    ("func", TokenKind::Func),
    ("null", TokenKind::Null),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
];

impl TokenKind {
    /// Look up a word in the keyword table (case-sensitive, exact match).
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, kind)| *kind)
    }

    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }

    /// Stable upper-case name used by token dumps and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Pipe => "PIPE",
            TokenKind::Caret => "CARET",
            TokenKind::Tilde => "TILDE",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::GreaterGreater => "GREATER_GREATER",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::LessLess => "LESS_LESS",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::If => "KW_IF",
            TokenKind::Then => "KW_THEN",
            TokenKind::Else => "KW_ELSE",
            TokenKind::End => "KW_END",
            TokenKind::True => "KW_TRUE",
            TokenKind::False => "KW_FALSE",
            TokenKind::And => "KW_AND",
            TokenKind::Or => "KW_OR",
            TokenKind::While => "KW_WHILE",
            TokenKind::Do => "KW_DO",
            TokenKind::For => "KW_FOR",
            TokenKind::Func => "KW_FUNC",
            TokenKind::Null => "KW_NULL",
            TokenKind::Print => "KW_PRINT",
            TokenKind::Return => "KW_RETURN",
            TokenKind::Insignificant => "INSIGNIFICANT",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token borrowing its lexeme from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub lexeme: &'src str,
    pub kind: TokenKind,
    pub position: Position,
}

impl<'src> Token<'src> {
    pub fn new(lexeme: &'src str, kind: TokenKind, position: Position) -> Self {
        Self {
            lexeme,
            kind,
            position,
        }
    }

    /// Decoded contents of a string literal token.
    ///
    /// Borrows from the source when the literal has no escape sequences.
    /// Returns `None` for any other token kind.
    pub fn string_value(&self) -> Option<Str<'src>> {
        if self.kind != TokenKind::String {
            return None;
        }

        let inner = self
            .lexeme
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(self.lexeme);

        if !inner.contains('\\') {
            return Some(Str::Borrowed(inner));
        }

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('0') => value.push('\0'),
                Some(other) => value.push(other),
                None => value.push('\\'),
            }
        }

        Some(Str::Owned(value))
    }
}

/// Escape a lexeme for display inside double quotes.
///
/// Borrows the input unchanged when nothing needs escaping.
pub fn escape_lexeme(lexeme: &str) -> Str<'_> {
    let needs_escape = lexeme
        .chars()
        .any(|ch| matches!(ch, '"' | '\\' | '\n' | '\r' | '\t' | '\0'));
    if !needs_escape {
        return Str::Borrowed(lexeme);
    }

    let mut escaped = String::with_capacity(lexeme.len() + 4);
    for ch in lexeme.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(ch),
        }
    }
    Str::Owned(escaped)
}

/// Dump format: `(KIND, "escaped-lexeme", line, column)`.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, \"{}\", {}, {})",
            self.kind,
            escape_lexeme(self.lexeme),
            self.position.line,
            self.position.column
        )
    }
}
