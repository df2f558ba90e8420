use std::fmt::Display;

#[derive(Debug, PartialEq)]
pub enum InterpreterOutput {
    /// The command or operator token that was just executed.
    Trace(String),
    Warning(String),
}

impl Display for InterpreterOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpreterOutput::Trace(token) => write!(f, "#{}", token),
            InterpreterOutput::Warning(message) => write!(f, "WARNING: {}", message),
        }
    }
}
