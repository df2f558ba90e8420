use std::fmt::Display;

use crate::{
    interpreter_error::InterpreterError,
    operators::{ArithmeticOp, Evaluated},
};

/// An ordered sequence of integers. Index 0 is the bottom of the stack,
/// and the last index is the top.
///
/// Every operation that fails leaves the stack exactly as it found it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Stack {
    items: Vec<i64>,
}

impl From<Vec<i64>> for Stack {
    fn from(items: Vec<i64>) -> Self {
        Stack { items }
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

impl Stack {
    fn require(&self, minimum: usize) -> Result<(), InterpreterError> {
        if self.items.len() < minimum {
            Err(InterpreterError::InsufficientStackItems)
        } else {
            Ok(())
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.items
    }

    pub fn push(&mut self, number: i64) {
        self.items.push(number);
    }

    pub fn pop(&mut self) -> Result<i64, InterpreterError> {
        self.items.pop().ok_or(InterpreterError::InsufficientStackItems)
    }

    pub fn swap(&mut self) -> Result<(), InterpreterError> {
        self.require(2)?;
        let len = self.items.len();
        self.items.swap(len - 2, len - 1);
        Ok(())
    }

    pub fn dup(&mut self) -> Result<(), InterpreterError> {
        let top = *self
            .items
            .last()
            .ok_or(InterpreterError::InsufficientStackItems)?;
        self.items.push(top);
        Ok(())
    }

    pub fn reverse_push(&mut self, number: i64) {
        self.items.insert(0, number);
    }

    pub fn reverse_pop(&mut self) -> Result<i64, InterpreterError> {
        self.require(1)?;
        Ok(self.items.remove(0))
    }

    pub fn reverse_swap(&mut self) -> Result<(), InterpreterError> {
        self.require(2)?;
        self.items.swap(0, 1);
        Ok(())
    }

    /// Inserts a copy of the *second* item from the bottom at the bottom of
    /// the stack, so `[1, 2]` becomes `[2, 1, 2]`. This isn't a mirror image
    /// of `dup`, but it's how rDUP has always behaved. A single-item stack
    /// has no second item, so its only item is copied instead.
    pub fn reverse_dup(&mut self) -> Result<(), InterpreterError> {
        self.require(1)?;
        let copied = self.items.get(1).copied().unwrap_or(self.items[0]);
        self.items.insert(0, copied);
        Ok(())
    }

    /// Replaces the two bottommost items with `items[0] OP items[1]`.
    ///
    /// Note that for division the divisor is the *second* item from the
    /// bottom.
    pub fn reverse_arithmetic(
        &mut self,
        op: ArithmeticOp,
    ) -> Result<Evaluated, InterpreterError> {
        self.require(2)?;
        let result = op.evaluate(self.items[0], self.items[1])?;
        self.items[1] = result.value;
        self.items.remove(0);
        Ok(result)
    }

    pub fn reverse_add(&mut self) -> Result<Evaluated, InterpreterError> {
        self.reverse_arithmetic(ArithmeticOp::Add)
    }

    pub fn reverse_subtract(&mut self) -> Result<Evaluated, InterpreterError> {
        self.reverse_arithmetic(ArithmeticOp::Subtract)
    }

    pub fn reverse_multiply(&mut self) -> Result<Evaluated, InterpreterError> {
        self.reverse_arithmetic(ArithmeticOp::Multiply)
    }

    pub fn reverse_divide(&mut self) -> Result<Evaluated, InterpreterError> {
        self.reverse_arithmetic(ArithmeticOp::Divide)
    }
}
