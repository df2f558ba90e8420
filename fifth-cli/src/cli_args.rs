use std::io::{stdin, IsTerminal};

use clap::Parser;
use fifth_core::Interpreter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// File of Fifth commands to execute, one per line.
    pub source_filename: Option<String>,

    /// Enter interactive mode after running source file.
    #[arg(short, long)]
    interactive: bool,

    /// Enable runtime warnings (e.g. arithmetic that wraps around).
    #[arg(short, long)]
    pub warnings: bool,

    /// Enable command tracing.
    #[arg(short, long)]
    pub tracing: bool,
}

impl CliArgs {
    /// Whether lines should be read through the line editor, rather than
    /// piped in from stdin.
    pub fn is_interactive(&self) -> bool {
        (self.source_filename.is_none() && stdin().is_terminal()) || self.interactive
    }

    pub fn create_interpreter(&self) -> Interpreter {
        let mut interpreter = Interpreter::default();
        interpreter.enable_warnings = self.warnings;
        interpreter.enable_tracing = self.tracing;
        interpreter
    }
}
