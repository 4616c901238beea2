//! Ember CLI
//!
//! Usage:
//!   ember <SCRIPT>           Run a script file
//!   ember -e <CODE>          Evaluate inline code
//!   ember -d <SCRIPT>        Dump source, tokens and AST while running
//!   ember -o <FORMAT>        Output format: text (default), json
//!   cat file | ember         Read source from stdin

mod output;

use clap::Parser;
use output::{format_diagnostic_text, format_dump, format_error_json, format_result_json, OutputMode};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ember_lang::runner::INLINE_SOURCE;
use ember_lang::{Outcome, Runner};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STDIN_SOURCE: &str = "<stdin>";

fn print_help() {
    println!(
        r#"Ember {}

USAGE:
    ember <SCRIPT>              Run a script file
    ember -e <CODE>             Evaluate inline code
    ember -d <SCRIPT>           Dump source, tokens and AST
    ember -o <FORMAT>           Output format (text, json)
    ember -h                    Show this help
    cat file | ember            Read from stdin

OPTIONS:
    -e, --eval <CODE>       Evaluate inline code
    -d, --dump              Print the source, token and AST dumps
    -o, --output <FORMAT>   Output format: text (default), json
    -h, --help              Show this help message
    -v, --version           Display version information

OUTPUT:
    Text mode prints each `print` line, then the program value, on stdout.
    Diagnostics go to stderr. The source, token and AST dumps are only
    shown with -d/--dump.

ENVIRONMENT:
    EMBER_LOG               Log filter, e.g. debug or ember_lang=trace (default: warn)

EXIT CODES:
    0 success, 255 lexer error, 254 parser error, 253 interpreter error,
    1 usage or I/O error"#,
        VERSION
    );
}

fn print_version() {
    println!("ember {}", VERSION);
}

/// Ember expression calculator
#[derive(Parser, Debug)]
#[command(name = "ember")]
#[command(version, about = "Ember expression calculator", long_about = None)]
#[command(disable_version_flag = true, disable_help_flag = true)]
struct Args {
    /// Print version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Show help message
    #[arg(short = 'h', long = "help")]
    help: bool,

    /// The script file to run (optional if using -e or stdin)
    script: Option<PathBuf>,

    /// Evaluate inline code
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Print the source, token and AST dumps
    #[arg(short = 'd', long = "dump")]
    dump: bool,

    /// Output format: text (default), json
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    output: Option<String>,
}

/// Source of the code being executed
enum Source {
    /// From a file path
    File { path: PathBuf, content: String },
    /// From -e flag
    Inline { content: String },
    /// Piped in on stdin
    Stdin { content: String },
}

impl Source {
    fn content(&self) -> &str {
        match self {
            Source::File { content, .. } | Source::Inline { content } | Source::Stdin { content } => content,
        }
    }

    /// Name shown in diagnostics.
    fn name(&self) -> String {
        match self {
            Source::File { path, .. } => path.display().to_string(),
            Source::Inline { .. } => INLINE_SOURCE.to_string(),
            Source::Stdin { .. } => STDIN_SOURCE.to_string(),
        }
    }
}

fn get_source(args: &Args) -> Result<Source, String> {
    // Priority: -e flag > file argument > stdin
    if let Some(ref code) = args.eval {
        return Ok(Source::Inline { content: code.clone() });
    }

    if let Some(ref path) = args.script {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("Error reading file {}: {}", path.display(), e))?;
        return Ok(Source::File {
            path: path.clone(),
            content,
        });
    }

    // Try stdin if not a TTY
    if !atty::is(atty::Stream::Stdin) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Error reading from stdin: {}", e))?;
        return Ok(Source::Stdin { content });
    }

    Err("No input provided. Use: ember <SCRIPT>, ember -e <CODE>, or pipe to stdin".to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("EMBER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Handle --help flag
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    // Handle --version flag
    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging();

    let output_mode = match OutputMode::parse(args.output.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let source = match get_source(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let runner = Runner::new(source.name());
    debug!(file = runner.file(), mode = ?output_mode, dump = args.dump, "running source");
    let outcome = runner.run(source.content());

    if args.dump {
        print!("{}", format_dump(source.content(), &outcome));
    }

    match output_mode {
        OutputMode::Text => run_text_mode(&outcome),
        OutputMode::Json => run_json_mode(&outcome),
    }
}

/// Run in text mode (default, human-readable output).
fn run_text_mode(outcome: &Outcome<'_>) -> ExitCode {
    for line in &outcome.printed {
        println!("{}", line);
    }

    if outcome.is_success() {
        if let Some(value) = outcome.value {
            println!("{}", value);
        }
    }

    for diagnostic in outcome.diagnostics.iter() {
        eprintln!("{}", format_diagnostic_text(diagnostic));
    }

    ExitCode::from(outcome.exit_code())
}

/// Run in JSON mode (single JSON object on stdout).
fn run_json_mode(outcome: &Outcome<'_>) -> ExitCode {
    let json = if outcome.is_success() {
        format_result_json(outcome)
    } else {
        format_error_json(outcome)
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::from(1)
        }
    }
}
