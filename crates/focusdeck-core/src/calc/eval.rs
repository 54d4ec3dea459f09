//! Arithmetic expression evaluation.
//!
//! A small recursive-descent evaluator for the four basic operators
//! with the usual precedence, unary minus, and parentheses. `×` and `÷`
//! are accepted as aliases so display strings evaluate unchanged.
//! Failures are values ([`EvalError`]), never panics, and non-finite
//! results (division by zero) are rejected.

use crate::error::EvalError;

/// Evaluate an arithmetic expression to a finite `f64`.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::TrailingInput);
    }
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

/// Format a result the way the display shows it: up to eight decimal
/// places, trailing zeros (and a bare trailing point) stripped.
pub fn format_result(value: f64) -> String {
    let s = format!("{value:.8}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut lit = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        lit.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n: f64 = lit.parse().map_err(|_| EvalError::BadNumber(lit.clone()))?;
                tokens.push(Token::Num(n));
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' | '×' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' | '÷' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(EvalError::UnexpectedToken(self.pos - 1)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(_) => Err(EvalError::UnexpectedToken(self.pos - 1)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operators() {
        assert_eq!(evaluate("2+3").unwrap(), 5.0);
        assert_eq!(evaluate("7-10").unwrap(), -3.0);
        assert_eq!(evaluate("6*7").unwrap(), 42.0);
        assert_eq!(evaluate("9/2").unwrap(), 4.5);
    }

    #[test]
    fn precedence_and_parens() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-5").unwrap(), -5.0);
        assert_eq!(evaluate("3*-2").unwrap(), -6.0);
        assert_eq!(evaluate("--4").unwrap(), 4.0);
    }

    #[test]
    fn display_operator_aliases() {
        assert_eq!(evaluate("6×7").unwrap(), 42.0);
        assert_eq!(evaluate("9÷2").unwrap(), 4.5);
    }

    #[test]
    fn division_by_zero_is_not_finite() {
        assert_eq!(evaluate("1/0"), Err(EvalError::NotFinite));
        assert_eq!(evaluate("0/0"), Err(EvalError::NotFinite));
    }

    #[test]
    fn malformed_input() {
        assert_eq!(evaluate(""), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(
            evaluate("1.2.3"),
            Err(EvalError::BadNumber("1.2.3".into()))
        );
        assert_eq!(evaluate("2 3"), Err(EvalError::TrailingInput));
        assert_eq!(evaluate("2$3"), Err(EvalError::UnexpectedChar('$')));
        assert_eq!(evaluate("(2+3"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn result_formatting_strips_trailing_zeros() {
        assert_eq!(format_result(5.0), "5");
        assert_eq!(format_result(4.5), "4.5");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(-3.0), "-3");
        assert_eq!(format_result(1.0 / 3.0), "0.33333333");
    }
}
