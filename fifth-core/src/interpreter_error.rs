use std::{error::Error, fmt::Display};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InterpreterError {
    NoCommand,
    UnknownCommand,
    /// The argument is the number of arguments the command accepts.
    ArgumentCountMismatch {
        expected: usize,
    },
    InvalidIntegerArgument,
    /// Every operation reports this the same way, regardless of how many
    /// items it needed.
    InsufficientStackItems,
    DivideByZero,
}

impl Error for InterpreterError {}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpreterError::NoCommand => write!(f, "ERROR: no command specified."),
            InterpreterError::UnknownCommand => write!(f, "ERROR: unknown command/operator."),
            InterpreterError::ArgumentCountMismatch { expected } => {
                let noun = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "ERROR: expected {expected} {noun}.")
            }
            InterpreterError::InvalidIntegerArgument => {
                write!(f, "ERROR: an integer argument expected.")
            }
            InterpreterError::InsufficientStackItems => {
                write!(f, "ERROR: insufficient items on stack.")
            }
            InterpreterError::DivideByZero => write!(f, "ERROR: cannot divide by zero."),
        }
    }
}
