//! Recursive-descent parser.
//!
//! Grammar (lowest precedence first):
//!
//! ```text
//! expr    := and ( ("or" | "||") and )*
//! and     := not ( ("and" | "&&") not )*
//! not     := ("not" | "!") not | cmp
//! cmp     := operand ( ("==" | "!=" | "<" | "<=" | ">" | ">=") operand )?
//! operand := literal | field-ref | "(" expr ")"
//! ```
//!
//! Field references may be written bare (`clientType`) or prefixed the way
//! the authoring format does (`formValues.clientType`, `values.clientType`).

use form_model::FieldValue;

use crate::token::{Spanned, Token, tokenize};
use crate::{CompareOp, Expr, ParseError};

pub(crate) fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if let Some((_, offset)) = parser.peek() {
        return Err(ParseError::TrailingInput { offset });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.pos).map(|(token, at)| (token, *at))
    }

    fn bump(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat_keyword_or_token("or", &Token::OrOr) {
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_not()?;
        while self.eat_keyword_or_token("and", &Token::AndAnd) {
            let rhs = self.parse_not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.eat_keyword_or_token("not", &Token::Bang) {
            let inner = self.parse_not()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_cmp()
    }

    fn parse_cmp(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_operand()?;
        let op = match self.peek() {
            Some((Token::EqEq, _)) => CompareOp::Eq,
            Some((Token::NotEq, _)) => CompareOp::Ne,
            Some((Token::Lt, _)) => CompareOp::Lt,
            Some((Token::Le, _)) => CompareOp::Le,
            Some((Token::Gt, _)) => CompareOp::Gt,
            Some((Token::Ge, _)) => CompareOp::Ge,
            _ => return Ok(lhs),
        };
        self.bump();
        let rhs = self.parse_operand()?;
        Ok(Expr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let Some((token, offset)) = self.bump() else {
            return Err(ParseError::UnexpectedEnd);
        };
        match token {
            Token::Num(value) => Ok(Expr::Literal(FieldValue::Number(value))),
            Token::Str(text) => Ok(Expr::Literal(FieldValue::Text(text))),
            Token::Minus => {
                // Only negative numeric literals; no general arithmetic.
                match self.bump() {
                    Some((Token::Num(value), _)) => Ok(Expr::Literal(FieldValue::Number(-value))),
                    Some((_, at)) => Err(ParseError::UnexpectedToken { offset: at }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Token::LParen => {
                let inner = self.parse_or()?;
                match self.bump() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some((_, at)) => Err(ParseError::UnexpectedToken { offset: at }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Token::Ident(name) => Ok(ident_operand(&name, offset)?),
            _ => Err(ParseError::UnexpectedToken { offset }),
        }
    }

    /// Consume either the keyword form or the symbol form of an operator.
    fn eat_keyword_or_token(&mut self, keyword: &str, symbol: &Token) -> bool {
        match self.peek() {
            Some((Token::Ident(name), _)) if name == keyword => {
                self.bump();
                true
            }
            Some((token, _)) if token == symbol => {
                self.bump();
                true
            }
            _ => false,
        }
    }
}

fn ident_operand(name: &str, offset: usize) -> Result<Expr, ParseError> {
    match name {
        "true" => return Ok(Expr::Literal(FieldValue::Bool(true))),
        "false" => return Ok(Expr::Literal(FieldValue::Bool(false))),
        "null" => return Ok(Expr::Literal(FieldValue::Null)),
        _ => {}
    }
    let field = name
        .strip_prefix("formValues.")
        .or_else(|| name.strip_prefix("values."))
        .unwrap_or(name);
    if field.is_empty() || field.contains('.') {
        return Err(ParseError::BadFieldRef {
            offset,
            text: name.to_string(),
        });
    }
    Ok(Expr::Field(field.to_string()))
}
