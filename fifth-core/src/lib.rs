mod command;
mod interpreter;
mod interpreter_error;
mod interpreter_output;
mod operators;
mod stack;

pub use command::Command;
pub use interpreter::Interpreter;
pub use interpreter_error::InterpreterError;
pub use interpreter_output::InterpreterOutput;
pub use operators::{ArithmeticOp, Evaluated, Operator};
pub use stack::Stack;
