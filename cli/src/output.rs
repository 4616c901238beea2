//! CLI output formatting for text and JSON modes.
//!
//! Text mode is meant for people: printed values on stdout, diagnostics in
//! red on stderr. JSON mode writes a single object on stdout so editors and
//! CI jobs can consume results without scraping text.

use ember_lang::{Diagnostic, Outcome};
use serde::Serialize;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Output mode for CLI execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable output with ANSI colors (default)
    Text,
    /// Single JSON object after execution completes
    Json,
}

impl OutputMode {
    pub fn parse(format: Option<&str>) -> Result<Self, String> {
        match format {
            None | Some("text") => Ok(OutputMode::Text),
            Some("json") => Ok(OutputMode::Json),
            Some(other) => Err(format!("Invalid output format: '{}'. Use: text, json", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonDiagnostic {
    pub phase: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl From<&Diagnostic> for JsonDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            phase: diagnostic.phase.label().to_lowercase(),
            file: diagnostic.file.clone(),
            line: diagnostic.position.line,
            column: diagnostic.position.column,
            message: diagnostic.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonResultOutput {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    pub value: String,
    pub printed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonErrorOutput {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    pub phase: String,
    pub exit_code: u8,
    pub printed: Vec<String>,
    pub diagnostics: Vec<JsonDiagnostic>,
}

/// Format a successful run as JSON.
pub fn format_result_json(outcome: &Outcome<'_>) -> serde_json::Result<String> {
    let output = JsonResultOutput {
        output_type: "result",
        value: outcome.value.unwrap_or_default().to_string(),
        printed: outcome.printed.clone(),
    };

    serde_json::to_string(&output)
}

/// Format a failed run as JSON.
pub fn format_error_json(outcome: &Outcome<'_>) -> serde_json::Result<String> {
    let output = JsonErrorOutput {
        output_type: "error",
        phase: outcome
            .failed_phase()
            .map(|phase| phase.label().to_lowercase())
            .unwrap_or_default(),
        exit_code: outcome.exit_code(),
        printed: outcome.printed.clone(),
        diagnostics: outcome.diagnostics.iter().map(JsonDiagnostic::from).collect(),
    };

    serde_json::to_string(&output)
}

/// `[PHASE ERROR]: file (line:column): message` wrapped in ANSI red.
pub fn format_diagnostic_text(diagnostic: &Diagnostic) -> String {
    format!("{}{}{}", RED, diagnostic, RESET)
}

/// Source echo, token dump and AST dump for `--dump`, one section per phase
/// that completed.
pub fn format_dump(source: &str, outcome: &Outcome<'_>) -> String {
    let mut dump = String::new();

    dump.push_str("== source ==\n");
    dump.push_str(source);
    if !source.ends_with('\n') {
        dump.push('\n');
    }

    if let Some(tokens) = &outcome.tokens {
        dump.push_str("== tokens ==\n");
        for token in tokens {
            dump.push_str(&token.to_string());
            dump.push('\n');
        }
    }

    if let Some(program) = &outcome.program {
        dump.push_str("== ast ==\n");
        for stmt in &program.statements {
            dump.push_str(&stmt.to_string());
            dump.push('\n');
        }
    }

    dump
}
