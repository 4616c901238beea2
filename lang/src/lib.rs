pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runner;
pub mod runtime;

pub use error::{Diagnostic, Diagnostics, EmberError, Phase};
pub use runner::{evaluate, Outcome, Runner};
