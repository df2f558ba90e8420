use std::fmt::Display;

use crate::{
    command::Command,
    interpreter_error::InterpreterError,
    interpreter_output::InterpreterOutput,
    operators::{ArithmeticOp, Evaluated, Operator},
    stack::Stack,
};

#[derive(Default, Debug)]
pub struct Interpreter {
    stack: Stack,
    output: Vec<InterpreterOutput>,
    pub enable_warnings: bool,
    pub enable_tracing: bool,
}

impl Display for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stack)
    }
}

fn expect_argument_count(args: &[&str], expected: usize) -> Result<(), InterpreterError> {
    if args.len() != expected {
        Err(InterpreterError::ArgumentCountMismatch { expected })
    } else {
        Ok(())
    }
}

fn parse_integer_argument(arg: &str) -> Result<i64, InterpreterError> {
    arg.parse::<i64>().map_err(|_| InterpreterError::InvalidIntegerArgument)
}

impl Interpreter {
    pub fn with_stack(stack: Stack) -> Self {
        Interpreter {
            stack,
            ..Default::default()
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn take_output(&mut self) -> Vec<InterpreterOutput> {
        std::mem::take(&mut self.output)
    }

    fn warn<T: AsRef<str>>(&mut self, message: T) {
        if self.enable_warnings {
            self.output
                .push(InterpreterOutput::Warning(message.as_ref().to_string()));
        }
    }

    fn maybe_warn_about_wrapping(&mut self, operator: Operator, result: Evaluated) {
        if result.wrapped {
            self.warn(format!(
                "Result of '{}' overflowed and wrapped around to {}.",
                operator.as_str(),
                result.value
            ));
        }
    }

    /// Interprets a single line of Fifth, returning the rendered stack.
    ///
    /// If an error is returned, the stack is guaranteed to be exactly what it
    /// was before the line was interpreted.
    pub fn interpret(&mut self, line: &str) -> Result<String, InterpreterError> {
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            return Err(InterpreterError::NoCommand);
        };
        let args = tokens.collect::<Vec<_>>();

        if let Some(command) = Command::from_token(token) {
            self.trace(command.as_str());
            self.evaluate_command(command, &args)?;
        } else if let Some(operator) = Operator::from_token(token) {
            self.trace(operator.as_str());
            expect_argument_count(&args, 0)?;
            self.evaluate_operator(operator)?;
        } else {
            return Err(InterpreterError::UnknownCommand);
        }

        Ok(self.stack.to_string())
    }

    fn trace(&mut self, name: &'static str) {
        if self.enable_tracing {
            self.output.push(InterpreterOutput::Trace(name.to_string()));
        }
    }

    fn evaluate_command(
        &mut self,
        command: Command,
        args: &[&str],
    ) -> Result<(), InterpreterError> {
        expect_argument_count(args, command.argument_count())?;
        match command {
            Command::Push => self.stack.push(parse_integer_argument(args[0])?),
            Command::ReversePush => self.stack.reverse_push(parse_integer_argument(args[0])?),
            Command::Pop => {
                self.stack.pop()?;
            }
            Command::ReversePop => {
                self.stack.reverse_pop()?;
            }
            Command::Swap => self.stack.swap()?,
            Command::ReverseSwap => self.stack.reverse_swap()?,
            Command::Dup => self.stack.dup()?,
            Command::ReverseDup => self.stack.reverse_dup()?,
        }
        Ok(())
    }

    fn evaluate_operator(&mut self, operator: Operator) -> Result<(), InterpreterError> {
        let result = match operator {
            Operator::Forward(op) => self.evaluate_forward_operator(op)?,
            Operator::Reverse(op) => self.stack.reverse_arithmetic(op)?,
        };
        self.maybe_warn_about_wrapping(operator, result);
        Ok(())
    }

    fn evaluate_forward_operator(
        &mut self,
        op: ArithmeticOp,
    ) -> Result<Evaluated, InterpreterError> {
        let first = self.stack.pop()?;
        // The second item from the top is the left side of the operation,
        // i.e. the minuend or dividend.
        let second = match self.stack.pop() {
            Ok(second) => second,
            Err(err) => {
                self.stack.push(first);
                return Err(err);
            }
        };
        match op.evaluate(second, first) {
            Ok(result) => {
                self.stack.push(result.value);
                Ok(result)
            }
            Err(err) => {
                // Dividing by zero, so put everything back the way it was.
                self.stack.push(second);
                self.stack.push(first);
                Err(err)
            }
        }
    }
}
