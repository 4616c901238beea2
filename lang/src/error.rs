//! Unified error handling for Ember.
//!
//! [`EmberError`] captures a failure from any phase of the pipeline with its
//! source position. [`Diagnostics`] collects such failures as
//! [`Diagnostic`] records for a single source file; it is an ordinary value
//! handed from the runner back to the caller, so separate runs never share
//! state.

#[cfg(test)]
mod tests;

use crate::lexer::Position;
use std::fmt;

/// Pipeline phase a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Lex,
    Parse,
    Interpret,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Lex, Phase::Parse, Phase::Interpret];

    /// Upper-case label used in `[LABEL ERROR]` prefixes.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Lex => "LEXER",
            Phase::Parse => "PARSER",
            Phase::Interpret => "INTERPRETER",
        }
    }

    /// Process exit status when this phase failed (-1, -2 and -3 as a byte).
    pub fn exit_code(&self) -> u8 {
        match self {
            Phase::Lex => 255,
            Phase::Parse => 254,
            Phase::Interpret => 253,
        }
    }

    fn index(&self) -> usize {
        match self {
            Phase::Lex => 0,
            Phase::Parse => 1,
            Phase::Interpret => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failure from any phase of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EmberError {
    LexError { message: String, position: Position },
    ParseError { message: String, position: Position },
    RuntimeError { message: String, position: Position },
}

impl EmberError {
    pub fn lex(message: impl Into<String>, position: Position) -> Self {
        EmberError::LexError {
            message: message.into(),
            position,
        }
    }

    pub fn parse(message: impl Into<String>, position: Position) -> Self {
        EmberError::ParseError {
            message: message.into(),
            position,
        }
    }

    pub fn runtime(message: impl Into<String>, position: Position) -> Self {
        EmberError::RuntimeError {
            message: message.into(),
            position,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            EmberError::LexError { .. } => Phase::Lex,
            EmberError::ParseError { .. } => Phase::Parse,
            EmberError::RuntimeError { .. } => Phase::Interpret,
        }
    }

    /// Short error kind description (e.g. "LexError").
    pub fn kind(&self) -> &'static str {
        match self {
            EmberError::LexError { .. } => "LexError",
            EmberError::ParseError { .. } => "ParseError",
            EmberError::RuntimeError { .. } => "RuntimeError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            EmberError::LexError { message, .. }
            | EmberError::ParseError { message, .. }
            | EmberError::RuntimeError { message, .. } => message,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EmberError::LexError { position, .. }
            | EmberError::ParseError { position, .. }
            | EmberError::RuntimeError { position, .. } => *position,
        }
    }
}

impl fmt::Display for EmberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        write!(
            f,
            "{} at {}:{}: {}",
            self.kind(),
            position.line,
            position.column,
            self.message()
        )
    }
}

impl std::error::Error for EmberError {}

impl From<crate::lexer::LexError> for EmberError {
    fn from(err: crate::lexer::LexError) -> Self {
        EmberError::lex(err.message(), err.position())
    }
}

impl From<crate::parser::ParseError> for EmberError {
    fn from(err: crate::parser::ParseError) -> Self {
        EmberError::parse(err.message, err.position)
    }
}

impl From<crate::interpreter::RuntimeError> for EmberError {
    fn from(err: crate::interpreter::RuntimeError) -> Self {
        EmberError::runtime(err.message(), err.position())
    }
}

/// A recorded failure: which phase, where, and what.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub file: String,
    pub position: Position,
    pub message: String,
}

/// `[PHASE ERROR]: filepath (line:column): message`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} ERROR]: {} ({}:{}): {}",
            self.phase.label(),
            self.file,
            self.position.line,
            self.position.column,
            self.message
        )
    }
}

/// Diagnostics collected while compiling and running one source file, kept
/// in a separate list per phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    file: String,
    phases: [Vec<Diagnostic>; 3],
}

impl Diagnostics {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            phases: Default::default(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn push(&mut self, phase: Phase, position: Position, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            phase,
            file: self.file.clone(),
            position,
            message: message.into(),
        };
        self.phases[phase.index()].push(diagnostic);
    }

    /// Record an error under the phase it belongs to.
    pub fn record(&mut self, error: &EmberError) {
        self.push(error.phase(), error.position(), error.message());
    }

    pub fn has_errors(&self, phase: Phase) -> bool {
        !self.phases[phase.index()].is_empty()
    }

    pub fn for_phase(&self, phase: Phase) -> &[Diagnostic] {
        &self.phases[phase.index()]
    }

    /// Earliest phase with at least one diagnostic.
    pub fn first_failed_phase(&self) -> Option<Phase> {
        Phase::ALL.into_iter().find(|phase| self.has_errors(*phase))
    }

    /// All diagnostics, in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.phases.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
