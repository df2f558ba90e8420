use std::io::{stdin, stdout, BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

use crate::cli_args::CliArgs;
use crate::stdio_printer::StdioPrinter;
use colored::*;
use fifth_core::{Interpreter, InterpreterOutput};
use rustyline::{error::ReadlineError, DefaultEditor};

const HISTORY_FILENAME: &'static str = ".fifth-history.txt";

const PROMPT: &'static str = "> ";

fn get_history_path() -> Option<PathBuf> {
    // std::env::home_dir() is deprecated because it gives wrong answers on
    // Cygwin and Mingw, but history is optional, so that's fine for now.
    #[allow(deprecated)]
    let path = std::env::home_dir()?;
    if path.exists() {
        Some(path.join(HISTORY_FILENAME))
    } else {
        None
    }
}

pub struct StdioInterpreter {
    args: CliArgs,
    printer: StdioPrinter,
    interpreter: Interpreter,
}

impl StdioInterpreter {
    pub fn new(args: CliArgs) -> Self {
        StdioInterpreter::with_printer(args, StdioPrinter::default())
    }

    pub fn with_printer(args: CliArgs, printer: StdioPrinter) -> Self {
        let interpreter = args.create_interpreter();
        StdioInterpreter {
            args,
            printer,
            interpreter,
        }
    }

    fn show_interpreter_output(&mut self) {
        for output in self.interpreter.take_output() {
            match output {
                InterpreterOutput::Trace(_) => {
                    self.printer.eprintln(output.to_string().blue().to_string());
                }
                InterpreterOutput::Warning(_) => {
                    self.printer
                        .eprintln(output.to_string().yellow().to_string());
                }
            }
        }
    }

    fn show_stack(&mut self) {
        let stack = self.interpreter.to_string();
        self.printer.println(stack);
    }

    /// Interprets one line and prints the resulting stack, or the error if
    /// there was one. Errors never stop the interpreter.
    fn evaluate_line(&mut self, line: &str) {
        let result = self.interpreter.interpret(line);

        // Regardless of whether an error occurred, show any diagnostics.
        self.show_interpreter_output();

        match result {
            Ok(stack) => self.printer.println(format!("stack is {stack}")),
            Err(err) => self.printer.println(err.to_string().red().to_string()),
        }
    }

    fn read_source_file(&mut self, filename: &str) -> Result<String, u8> {
        std::fs::read_to_string(filename).map_err(|_| {
            self.printer
                .eprintln(format!("ERROR READING FILE: {}", filename).red().to_string());
            1
        })
    }

    /// Runs every non-blank line of `code`. CTRL-C is only noticed between
    /// lines, and stops the run before the next line starts.
    fn run_source(&mut self, code: &str, rx: &Receiver<()>) -> Result<(), u8> {
        for line in code.lines() {
            if rx.try_recv().is_ok() {
                self.printer.eprintln("CTRL-C pressed, exiting.");
                return Err(1);
            }
            if line.trim().is_empty() {
                continue;
            }
            self.evaluate_line(line);
        }
        Ok(())
    }

    /// Runs each line of `input` until it runs out.
    fn run_lines<R: BufRead>(&mut self, input: R) -> Result<(), u8> {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    self.printer.eprintln(format!("Error: {:?}", err));
                    return Err(1);
                }
            };
            self.evaluate_line(&line);
        }
        Ok(())
    }

    pub fn run(&mut self) -> u8 {
        if !stdout().is_terminal() {
            // Piped output should be exactly what the interpreter produced.
            colored::control::set_override(false);
        }

        match self.run_impl() {
            Ok(_) => 0,
            Err(exit_code) => exit_code,
        }
    }

    fn run_impl(&mut self) -> Result<(), u8> {
        // Read the source file before printing anything, so an unreadable
        // file produces nothing but the error.
        let source = match self.args.source_filename.clone() {
            Some(filename) => Some(self.read_source_file(&filename)?),
            None => None,
        };

        if self.args.is_interactive() {
            self.printer.println(format!(
                "Welcome to the Fifth Interpreter v{}.",
                env!("CARGO_PKG_VERSION")
            ));
            self.printer.println("Press CTRL-C to exit.");
        }

        self.show_stack();

        if let Some(code) = source {
            // Only running a source file needs a handler. Piped stdin keeps
            // the default CTRL-C behavior, since a blocked read would never
            // get around to checking the channel, and the line editor reports
            // CTRL-C itself.
            let (tx, rx) = channel();
            if let Err(err) = ctrlc::set_handler(move || {
                let _ = tx.send(());
            }) {
                self.printer
                    .eprintln(format!("WARNING: Failed to set CTRL-C handler ({err})."));
            }
            self.run_source(&code, &rx)?;
        }

        if self.args.is_interactive() {
            self.run_interactive()
        } else if self.args.source_filename.is_none() {
            self.run_lines(stdin().lock())
        } else {
            Ok(())
        }
    }

    fn run_interactive(&mut self) -> Result<(), u8> {
        let Ok(mut rl) = DefaultEditor::new() else {
            self.printer.eprintln("Initializing DefaultEditor failed!");
            return Err(1);
        };

        let history_path = get_history_path();

        // If loading fails, it's probably because the file doesn't exist yet,
        // and history is optional anyways.
        if let Some(path) = &history_path {
            let _ = rl.load_history(path);
        }

        let result = self.readline_loop(&mut rl);

        if let Some(path) = &history_path {
            let _ = rl.save_history(path);
        }

        result
    }

    fn readline_loop(&mut self, rl: &mut DefaultEditor) -> Result<(), u8> {
        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if let Err(err) = rl.add_history_entry(line.as_str()) {
                        self.printer.eprintln(format!(
                            "WARNING: Failed to add history entry ({:?}).",
                            err
                        ));
                    }
                    self.evaluate_line(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    self.printer.eprintln("CTRL-C pressed, exiting.");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    self.printer.eprintln(format!("Error: {:?}", err));
                    return Err(1);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{Cursor, Write};
    use std::rc::Rc;
    use std::sync::mpsc::channel;

    use super::StdioInterpreter;
    use crate::cli_args::CliArgs;
    use crate::stdio_printer::StdioPrinter;
    use clap::Parser;
    use fifth_core::{Interpreter, Stack};

    /// Collects everything the printer writes to its output.
    #[derive(Clone, Default)]
    struct Transcript(Rc<RefCell<Vec<u8>>>);

    impl Write for Transcript {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Transcript {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn create(args: &[&str]) -> (StdioInterpreter, Transcript) {
        colored::control::set_override(false);
        let args = CliArgs::try_parse_from(std::iter::once("fifth").chain(args.iter().copied()))
            .unwrap();
        let transcript = Transcript::default();
        let printer = StdioPrinter::with_output(Box::new(transcript.clone()));
        (StdioInterpreter::with_printer(args, printer), transcript)
    }

    fn assert_piped_transcript(items: &[i64], input: &'static str, expected: &'static str) {
        let (mut stdio, transcript) = create(&[]);
        stdio.interpreter = Interpreter::with_stack(Stack::from(items.to_vec()));
        stdio.show_stack();
        assert_eq!(stdio.run_lines(Cursor::new(input)), Ok(()));
        assert_eq!(transcript.contents(), expected, "piping {:?}", input);
    }

    #[test]
    fn flags_configure_interpreter() {
        let (stdio, _) = create(&["-w", "-t", "commands.txt"]);
        assert!(stdio.interpreter.enable_warnings);
        assert!(stdio.interpreter.enable_tracing);
        assert_eq!(stdio.args.source_filename.as_deref(), Some("commands.txt"));
    }

    #[test]
    fn source_file_without_interactive_flag_is_not_interactive() {
        assert!(!create(&["commands.txt"]).0.args.is_interactive());
        assert!(create(&["-i", "commands.txt"]).0.args.is_interactive());
    }

    #[test]
    fn piped_input_prints_each_stack() {
        assert_piped_transcript(&[], "", "[]\n");
        assert_piped_transcript(
            &[],
            "PUSH 1\nPUSH 2",
            "[]\nstack is [1]\nstack is [1, 2]\n",
        );
    }

    #[test]
    fn piped_input_prints_errors_and_keeps_going() {
        assert_piped_transcript(&[], "POP 123456", "[]\nERROR: expected 0 arguments.\n");
        assert_piped_transcript(&[2, 0], "/", "[2, 0]\nERROR: cannot divide by zero.\n");
        assert_piped_transcript(&[], "+", "[]\nERROR: insufficient items on stack.\n");
        assert_piped_transcript(
            &[],
            "PUSH 2\nPUSH 0\n/\nBLARG\n\n+",
            "[]\nstack is [2]\nstack is [2, 0]\nERROR: cannot divide by zero.\n\
             ERROR: unknown command/operator.\nERROR: no command specified.\nstack is [2]\n",
        );
    }

    #[test]
    fn source_files_skip_blank_lines() {
        let (mut stdio, transcript) = create(&["commands.txt"]);
        let (_tx, rx) = channel();
        assert_eq!(stdio.run_source("PUSH 3\n\n   \nDUP\n*\n", &rx), Ok(()));
        assert_eq!(
            transcript.contents(),
            "stack is [3]\nstack is [3, 3]\nstack is [9]\n"
        );
    }

    #[test]
    fn ctrl_c_stops_source_file_before_next_line() {
        let (mut stdio, transcript) = create(&["commands.txt"]);
        let (tx, rx) = channel();
        tx.send(()).unwrap();
        assert_eq!(stdio.run_source("PUSH 1\nPUSH 2\n", &rx), Err(1));
        assert_eq!(transcript.contents(), "");
        assert_eq!(stdio.interpreter.to_string(), "[]");
    }

    #[test]
    fn unreadable_source_file_prints_nothing() {
        let (mut stdio, transcript) = create(&["this/file/does/not/exist.fifth"]);
        assert_eq!(stdio.run(), 1);
        assert_eq!(transcript.contents(), "");
    }
}
