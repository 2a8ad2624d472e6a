//! A small arithmetic evaluator over `+ - * /`, decimal numbers and
//! parentheses.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use std::{iter::Peekable, str::Chars};

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ArithmeticError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => Token::Number(read_number(&mut chars)?),
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(ArithmeticError::UnexpectedChar(other)),
        };
        if !matches!(token, Token::Number(_)) {
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Result<f64, ArithmeticError> {
    let mut literal = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            chars.next();
        } else {
            break;
        }
    }

    match literal.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ArithmeticError::InvalidNumber(literal)),
    }
}

/// Parses and evaluates `input`. The whole input must form one expression.
pub fn evaluate(input: &str) -> Result<f64, ArithmeticError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };

    let value = parser.expr(0)?;
    if let Some(token) = parser.peek() {
        return Err(ArithmeticError::UnexpectedToken(token.clone()));
    }
    if !value.is_finite() {
        return Err(ArithmeticError::NonFinite);
    }
    Ok(value)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expr(&mut self, depth: usize) -> Result<f64, ArithmeticError> {
        let mut acc = self.term(depth)?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc += self.term(depth)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc -= self.term(depth)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self, depth: usize) -> Result<f64, ArithmeticError> {
        let mut acc = self.factor(depth)?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc *= self.factor(depth)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor(depth)?;
                    if divisor == 0.0 {
                        return Err(ArithmeticError::DivisionByZero);
                    }
                    acc /= divisor;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self, depth: usize) -> Result<f64, ArithmeticError> {
        if depth >= MAX_DEPTH {
            return Err(ArithmeticError::TooDeep);
        }

        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Plus) => self.factor(depth + 1),
            Some(Token::Minus) => Ok(-self.factor(depth + 1)?),
            Some(Token::LParen) => {
                let value = self.expr(depth + 1)?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(ArithmeticError::UnexpectedToken(token)),
                    None => Err(ArithmeticError::UnexpectedEnd),
                }
            }
            Some(token) => Err(ArithmeticError::UnexpectedToken(token)),
            None => Err(ArithmeticError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(evaluate("8 / 4 / 2"), Ok(1.0));
    }

    #[test]
    fn handles_unary_signs_and_decimals() {
        assert_eq!(evaluate("-3 + 5"), Ok(2.0));
        assert_eq!(evaluate("2 * -(1 + 1)"), Ok(-4.0));
        assert_eq!(evaluate(".5 + 1.25"), Ok(1.75));
        assert_eq!(evaluate("7/2"), Ok(3.5));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate("2 +"), Err(ArithmeticError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(ArithmeticError::UnexpectedEnd));
        assert_eq!(
            evaluate("1 2"),
            Err(ArithmeticError::UnexpectedToken(Token::Number(2.0)))
        );
        assert_eq!(evaluate("2 ** 3"), Err(ArithmeticError::UnexpectedToken(Token::Star)));
        assert_eq!(
            evaluate("1.2.3 + 1"),
            Err(ArithmeticError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(evaluate("what is 2+2"), Err(ArithmeticError::UnexpectedChar('w')));
        assert_eq!(evaluate("__import__('os')"), Err(ArithmeticError::UnexpectedChar('_')));
    }

    #[test]
    fn rejects_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), Err(ArithmeticError::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)"), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn bounds_nesting_depth() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), Err(ArithmeticError::TooDeep));

        let signs = format!("{}1", "-".repeat(500));
        assert_eq!(evaluate(&signs), Err(ArithmeticError::TooDeep));
    }
}
