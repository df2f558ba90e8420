mod cli_args;
mod stdio_interpreter;
mod stdio_printer;

use std::process::ExitCode;

use clap::Parser;
use cli_args::CliArgs;
use stdio_interpreter::StdioInterpreter;

fn main() -> ExitCode {
    let mut stdio = StdioInterpreter::new(CliArgs::parse());
    ExitCode::from(stdio.run())
}
