//! Pipeline runner for Ember sources.
//!
//! The runner handles:
//! - Lexing the whole source before any parsing
//! - Parsing the whole token sequence before any evaluation
//! - Executing the program and collecting `print` output
//! - Recording the failure of any phase as a diagnostic and stopping there


use crate::error::{Diagnostics, EmberError, Phase};
use crate::interpreter::{self, Interpreter};
use crate::lexer::{lex, Token};
use crate::parser::{self, ast::Program};
use crate::runtime::value::Number;
use tracing::{debug, info_span};

/// Name used for sources that did not come from a file.
pub const INLINE_SOURCE: &str = "<eval>";

/// Everything a run produced, up to and including the first failing phase.
#[derive(Debug)]
pub struct Outcome<'src> {
    /// Tokens, present when lexing succeeded.
    pub tokens: Option<Vec<Token<'src>>>,
    /// Parsed program, present when parsing succeeded.
    pub program: Option<Program>,
    /// Program value. `Some(0)` as a placeholder when evaluation failed.
    pub value: Option<Number>,
    /// Output of `print` statements executed before the run ended.
    pub printed: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl Outcome<'_> {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn failed_phase(&self) -> Option<Phase> {
        self.diagnostics.first_failed_phase()
    }

    /// 0 on success, otherwise the exit code of the failing phase.
    pub fn exit_code(&self) -> u8 {
        self.failed_phase().map_or(0, |phase| phase.exit_code())
    }
}

/// Runs sources belonging to one file name.
pub struct Runner {
    file: String,
}

impl Runner {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Lex, parse and execute `source`, stopping at the first failing phase.
    pub fn run<'src>(&self, source: &'src str) -> Outcome<'src> {
        let _span = info_span!("run", file = %self.file).entered();

        let mut outcome = Outcome {
            tokens: None,
            program: None,
            value: None,
            printed: Vec::new(),
            diagnostics: Diagnostics::new(self.file.clone()),
        };

        let tokens = match lex(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                outcome.diagnostics.record(&EmberError::from(err));
                return outcome;
            }
        };

        let program = match parser::parse_program(&tokens) {
            Ok(program) => program,
            Err(err) => {
                outcome.tokens = Some(tokens);
                outcome.diagnostics.record(&EmberError::from(err));
                return outcome;
            }
        };

        let mut interpreter = Interpreter::new();
        let result = interpreter.execute(&program);
        outcome.printed = interpreter.into_printed();
        outcome.tokens = Some(tokens);
        outcome.program = Some(program);

        match result {
            Ok(value) => outcome.value = Some(value),
            Err(err) => {
                debug!(%err, "evaluation failed");
                outcome.diagnostics.record(&EmberError::from(err));
                outcome.value = Some(Number::Int(0));
            }
        }

        outcome
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(INLINE_SOURCE)
    }
}

/// Evaluate a single expression source in one call.
pub fn evaluate(source: &str) -> Result<Number, EmberError> {
    let tokens = lex(source)?;
    let ast = parser::parse(&tokens)?;
    Ok(interpreter::interpret(&ast)?)
}
