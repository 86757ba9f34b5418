//! Application entry point and reverse-Polish evaluation.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use limbint_core::{write_integer, BigInteger, TokenReader};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::CalcError;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "limbcalc", &mut io::stdout());
        return Ok(());
    }

    let mut calc = Calculator::new();
    if config.tokens.is_empty() {
        calc.eval_reader(io::stdin().lock())?;
    } else {
        calc.eval_tokens(config.tokens.iter().map(String::as_str))?;
    }

    let stdout = io::stdout();
    calc.print(&mut stdout.lock(), config.stack)?;
    Ok(())
}

/// A reverse-Polish evaluation stack.
#[derive(Debug, Default)]
pub struct Calculator {
    stack: Vec<BigInteger>,
}

impl Calculator {
    /// Empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[BigInteger] {
        &self.stack
    }

    /// Evaluate every token in order, stopping at the first error.
    pub fn eval_tokens<'a, I>(&mut self, tokens: I) -> Result<(), CalcError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().try_for_each(|token| self.apply(token))
    }

    /// Evaluate whitespace-separated tokens from a reader.
    pub fn eval_reader<R: BufRead>(&mut self, reader: R) -> Result<(), CalcError> {
        for token in TokenReader::new(reader) {
            self.apply(&token?)?;
        }
        Ok(())
    }

    /// Apply one token: push an integer or run an operator.
    pub fn apply(&mut self, token: &str) -> Result<(), CalcError> {
        debug!(token, depth = self.stack.len(), "apply");
        match token {
            "+" => self.binary(token, |a, b| Ok(a + b)),
            "-" => self.binary(token, |a, b| Ok(a - b)),
            "*" => self.binary(token, |a, b| Ok(a * b)),
            "/" => self.binary(token, |a, b| Ok(a.checked_div(&b)?)),
            "%" => self.binary(token, |a, b| Ok(a.checked_rem(&b)?)),
            "&" => self.binary(token, |a, b| Ok(a & b)),
            "|" => self.binary(token, |a, b| Ok(a | b)),
            "^" => self.binary(token, |a, b| Ok(a ^ b)),
            "<<" => self.binary(token, |a, b| Ok(a.checked_shl(shift_count(&b)?)?)),
            ">>" => self.binary(token, |a, b| Ok(a.checked_shr(shift_count(&b)?)?)),
            "neg" => self.unary(token, |a| -a),
            "~" => self.unary(token, |a| !a),
            "inc" => self.unary(token, |mut a| {
                a.increment();
                a
            }),
            "dec" => self.unary(token, |mut a| {
                a.decrement();
                a
            }),
            "dup" => {
                let top = self.peek(token)?.clone();
                self.stack.push(top);
                Ok(())
            }
            "swap" => {
                self.require(token, 2)?;
                let len = self.stack.len();
                self.stack.swap(len - 2, len - 1);
                Ok(())
            }
            literal => {
                let value = literal
                    .parse()
                    .map_err(|_| CalcError::UnknownToken(literal.to_owned()))?;
                self.stack.push(value);
                Ok(())
            }
        }
    }

    /// Write the top of the stack, or the whole stack, one value per line.
    pub fn print<W: Write>(&self, out: &mut W, whole_stack: bool) -> Result<(), CalcError> {
        let values = if whole_stack {
            &self.stack[..]
        } else {
            let start = self.stack.len().saturating_sub(1);
            &self.stack[start..]
        };
        for value in values {
            write_integer(&mut *out, value)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    fn underflow(&self, op: &str, needed: usize) -> CalcError {
        CalcError::StackUnderflow {
            op: op.to_owned(),
            needed,
            available: self.stack.len(),
        }
    }

    fn require(&self, op: &str, needed: usize) -> Result<(), CalcError> {
        if self.stack.len() < needed {
            return Err(self.underflow(op, needed));
        }
        Ok(())
    }

    fn peek(&self, op: &str) -> Result<&BigInteger, CalcError> {
        self.stack.last().ok_or_else(|| self.underflow(op, 1))
    }

    fn pop(&mut self) -> BigInteger {
        self.stack.pop().unwrap_or_default()
    }

    fn unary(
        &mut self,
        op: &str,
        f: impl FnOnce(BigInteger) -> BigInteger,
    ) -> Result<(), CalcError> {
        self.require(op, 1)?;
        let a = self.pop();
        self.stack.push(f(a));
        Ok(())
    }

    /// Operands are restored if `f` fails, so an error leaves the stack as it was.
    fn binary(
        &mut self,
        op: &str,
        f: impl FnOnce(BigInteger, BigInteger) -> Result<BigInteger, CalcError>,
    ) -> Result<(), CalcError> {
        self.require(op, 2)?;
        let b = self.pop();
        let a = self.pop();
        match f(a.clone(), b.clone()) {
            Ok(result) => {
                self.stack.push(result);
                Ok(())
            }
            Err(err) => {
                self.stack.push(a);
                self.stack.push(b);
                Err(err)
            }
        }
    }
}

fn shift_count(count: &BigInteger) -> Result<i64, CalcError> {
    count
        .to_i64()
        .ok_or_else(|| CalcError::ShiftCount(count.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbint_core::IntError;

    fn eval(tokens: &str) -> Result<Vec<String>, CalcError> {
        let mut calc = Calculator::new();
        calc.eval_tokens(tokens.split_whitespace())?;
        Ok(calc.stack().iter().map(ToString::to_string).collect())
    }

    #[test]
    fn arithmetic() {
        assert_eq!(
            eval("123456789012345678901234567890 -2 *").unwrap(),
            ["-246913578024691357802469135780"]
        );
        assert_eq!(eval("7 2 /  -7 2 %").unwrap(), ["3", "-1"]);
        assert_eq!(eval("1 64 <<").unwrap(), ["18446744073709551616"]);
        assert_eq!(eval("-4 1 >>").unwrap(), ["-2"]);
    }

    #[test]
    fn stack_words() {
        assert_eq!(eval("5 dup *").unwrap(), ["25"]);
        assert_eq!(eval("1 2 swap -").unwrap(), ["1"]);
        assert_eq!(eval("-1 inc 0 dec").unwrap(), ["0", "-1"]);
        assert_eq!(eval("5 neg 5 ~").unwrap(), ["-5", "-6"]);
        assert_eq!(eval("12 10 & 12 10 | 12 10 ^").unwrap(), ["8", "14", "6"]);
    }

    #[test]
    fn underflow_and_unknown() {
        assert!(matches!(
            eval("1 +"),
            Err(CalcError::StackUnderflow { needed: 2, available: 1, .. })
        ));
        assert!(matches!(eval("dup"), Err(CalcError::StackUnderflow { .. })));
        assert!(matches!(eval("1 2 plus"), Err(CalcError::UnknownToken(t)) if t == "plus"));
    }

    #[test]
    fn arithmetic_errors_keep_operands() {
        let mut calc = Calculator::new();
        let err = calc.eval_tokens(["8", "0", "/"]).unwrap_err();
        assert!(matches!(err, CalcError::Arithmetic(IntError::DivideByZero)));
        assert_eq!(calc.stack(), &[BigInteger::from(8), BigInteger::zero()]);
    }

    #[test]
    fn bad_shift_counts() {
        assert!(matches!(
            eval("1 -1 <<"),
            Err(CalcError::Arithmetic(IntError::InvalidArgument(_)))
        ));
        assert!(matches!(
            eval("1 99999999999999999999 >>"),
            Err(CalcError::ShiftCount(_))
        ));
    }

    #[test]
    fn huge_left_shift_keeps_operands() {
        let mut calc = Calculator::new();
        let err = calc
            .eval_tokens(["1", "9223372036854775807", "<<"])
            .unwrap_err();
        assert!(matches!(err, CalcError::Arithmetic(IntError::InvalidArgument(_))));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            calc.stack(),
            &[BigInteger::one(), BigInteger::from(i64::MAX)]
        );
        assert_eq!(eval("0 9223372036854775807 <<").unwrap(), ["0"]);
    }

    #[test]
    fn reads_tokens_from_reader() {
        let mut calc = Calculator::new();
        calc.eval_reader(io::Cursor::new("2 3\n*\n  4 +\n")).unwrap();
        assert_eq!(calc.stack(), &[BigInteger::from(10)]);
    }

    #[test]
    fn prints_top_or_whole_stack() {
        let mut calc = Calculator::new();
        calc.eval_tokens(["1", "-2", "3"]).unwrap();

        let mut top = Vec::new();
        calc.print(&mut top, false).unwrap();
        assert_eq!(top, b"3\n");

        let mut all = Vec::new();
        calc.print(&mut all, true).unwrap();
        assert_eq!(all, b"1\n-2\n3\n");

        let mut empty = Vec::new();
        Calculator::new().print(&mut empty, false).unwrap();
        assert!(empty.is_empty());
    }
}
