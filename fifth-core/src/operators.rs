use crate::interpreter_error::InterpreterError;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// The result of an arithmetic operation, along with whether it wrapped
/// around the bounds of `i64`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Evaluated {
    pub value: i64,
    pub wrapped: bool,
}

impl ArithmeticOp {
    /// Computes `left OP right`. Division rounds toward negative infinity,
    /// so `-7 / 2` is `-4`.
    pub fn evaluate(&self, left: i64, right: i64) -> Result<Evaluated, InterpreterError> {
        let (value, wrapped) = match self {
            ArithmeticOp::Add => left.overflowing_add(right),
            ArithmeticOp::Subtract => left.overflowing_sub(right),
            ArithmeticOp::Multiply => left.overflowing_mul(right),
            ArithmeticOp::Divide => floor_div(left, right)?,
        };
        Ok(Evaluated { value, wrapped })
    }
}

fn floor_div(left: i64, right: i64) -> Result<(i64, bool), InterpreterError> {
    if right == 0 {
        return Err(InterpreterError::DivideByZero);
    }
    // Only i64::MIN / -1 overflows, and its remainder is zero, so the
    // adjustment below can't overflow as well.
    let (quotient, wrapped) = left.overflowing_div(right);
    let remainder = left.wrapping_rem(right);
    if remainder != 0 && ((remainder < 0) != (right < 0)) {
        Ok((quotient - 1, wrapped))
    } else {
        Ok((quotient, wrapped))
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    /// Operates on the two topmost items of the stack.
    Forward(ArithmeticOp),
    /// Operates on the two bottommost items of the stack.
    Reverse(ArithmeticOp),
}

const OPERATORS: [(&str, Operator); 8] = [
    ("+", Operator::Forward(ArithmeticOp::Add)),
    ("-", Operator::Forward(ArithmeticOp::Subtract)),
    ("*", Operator::Forward(ArithmeticOp::Multiply)),
    ("/", Operator::Forward(ArithmeticOp::Divide)),
    ("r+", Operator::Reverse(ArithmeticOp::Add)),
    ("r-", Operator::Reverse(ArithmeticOp::Subtract)),
    ("r*", Operator::Reverse(ArithmeticOp::Multiply)),
    ("r/", Operator::Reverse(ArithmeticOp::Divide)),
];

impl Operator {
    // Like Command::from_token, this returns an Option rather than
    // implementing FromStr, since an unknown token isn't an error until
    // we've checked it against the commands too.
    pub fn from_token(token: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, operator)| *operator)
    }

    pub fn as_str(&self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, operator)| operator == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ArithmeticOp, Evaluated, Operator};
    use crate::interpreter_error::InterpreterError;

    fn eval(op: ArithmeticOp, left: i64, right: i64) -> i64 {
        op.evaluate(left, right).unwrap().value
    }

    #[test]
    fn left_side_is_first_operand() {
        assert_eq!(eval(ArithmeticOp::Subtract, 1, 2), -1);
        assert_eq!(eval(ArithmeticOp::Divide, 5, 2), 2);
        assert_eq!(eval(ArithmeticOp::Divide, 2, 5), 0);
    }

    #[test]
    fn division_floors() {
        assert_eq!(eval(ArithmeticOp::Divide, -7, 2), -4);
        assert_eq!(eval(ArithmeticOp::Divide, 7, -2), -4);
        assert_eq!(eval(ArithmeticOp::Divide, -7, -2), 3);
        assert_eq!(eval(ArithmeticOp::Divide, -8, 2), -4);
        assert_eq!(eval(ArithmeticOp::Divide, 0, 2), 0);
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(
            ArithmeticOp::Divide.evaluate(2, 0),
            Err(InterpreterError::DivideByZero)
        );
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(
            ArithmeticOp::Add.evaluate(i64::MAX, 1),
            Ok(Evaluated {
                value: i64::MIN,
                wrapped: true
            })
        );
        assert_eq!(
            ArithmeticOp::Divide.evaluate(i64::MIN, -1),
            Ok(Evaluated {
                value: i64::MIN,
                wrapped: true
            })
        );
        assert_eq!(
            ArithmeticOp::Multiply.evaluate(3, 4),
            Ok(Evaluated {
                value: 12,
                wrapped: false
            })
        );
    }

    #[test]
    fn operators_parse_from_tokens() {
        assert_eq!(
            Operator::from_token("*"),
            Some(Operator::Forward(ArithmeticOp::Multiply))
        );
        assert_eq!(
            Operator::from_token("r/"),
            Some(Operator::Reverse(ArithmeticOp::Divide))
        );
        assert_eq!(Operator::from_token("R/"), None);
        assert_eq!(Operator::from_token("%"), None);
        assert_eq!(Operator::Reverse(ArithmeticOp::Subtract).as_str(), "r-");
    }
}
