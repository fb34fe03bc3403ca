//! Tokenizer for the condition mini-language.

use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Identifier, possibly dotted (`formValues.clientType`).
    Ident(String),
    Str(String),
    Num(f64),
    LParen,
    RParen,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Minus,
}

/// A token together with its byte offset in the source, for error reporting.
pub(crate) type Spanned = (Token, usize);

pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        match byte {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
            }
            b'(' => {
                tokens.push((Token::LParen, pos));
                pos += 1;
            }
            b')' => {
                tokens.push((Token::RParen, pos));
                pos += 1;
            }
            b'-' => {
                tokens.push((Token::Minus, pos));
                pos += 1;
            }
            b'=' => {
                // Accept ==, === (JS-authored conditions use both).
                let start = pos;
                let mut len = 0;
                while pos < bytes.len() && bytes[pos] == b'=' {
                    pos += 1;
                    len += 1;
                }
                if len < 2 || len > 3 {
                    return Err(ParseError::UnexpectedChar {
                        offset: start,
                        found: '=',
                    });
                }
                tokens.push((Token::EqEq, start));
            }
            b'!' => {
                let start = pos;
                pos += 1;
                let mut eq = 0;
                while pos < bytes.len() && bytes[pos] == b'=' {
                    pos += 1;
                    eq += 1;
                }
                match eq {
                    0 => tokens.push((Token::Bang, start)),
                    1 | 2 => tokens.push((Token::NotEq, start)),
                    _ => {
                        return Err(ParseError::UnexpectedChar {
                            offset: start,
                            found: '!',
                        });
                    }
                }
            }
            b'<' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push((Token::Le, pos));
                    pos += 2;
                } else {
                    tokens.push((Token::Lt, pos));
                    pos += 1;
                }
            }
            b'>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push((Token::Ge, pos));
                    pos += 2;
                } else {
                    tokens.push((Token::Gt, pos));
                    pos += 1;
                }
            }
            b'&' => {
                if bytes.get(pos + 1) == Some(&b'&') {
                    tokens.push((Token::AndAnd, pos));
                    pos += 2;
                } else {
                    return Err(ParseError::UnexpectedChar {
                        offset: pos,
                        found: '&',
                    });
                }
            }
            b'|' => {
                if bytes.get(pos + 1) == Some(&b'|') {
                    tokens.push((Token::OrOr, pos));
                    pos += 2;
                } else {
                    return Err(ParseError::UnexpectedChar {
                        offset: pos,
                        found: '|',
                    });
                }
            }
            b'"' | b'\'' => {
                let (token, next) = lex_string(source, pos)?;
                tokens.push((token, pos));
                pos = next;
            }
            b'0'..=b'9' => {
                let (token, next) = lex_number(source, pos)?;
                tokens.push((token, pos));
                pos = next;
            }
            b'.' => {
                return Err(ParseError::UnexpectedChar {
                    offset: pos,
                    found: '.',
                });
            }
            _ if byte.is_ascii_alphabetic() || byte == b'_' => {
                let start = pos;
                while pos < bytes.len() && is_ident_byte(bytes[pos]) {
                    pos += 1;
                }
                tokens.push((Token::Ident(source[start..pos].to_string()), start));
            }
            _ => {
                let ch = source[pos..].chars().next().unwrap_or('?');
                return Err(ParseError::UnexpectedChar {
                    offset: pos,
                    found: ch,
                });
            }
        }
    }

    Ok(tokens)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.'
}

fn lex_string(source: &str, start: usize) -> Result<(Token, usize), ParseError> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut text = String::new();
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' if pos + 1 < bytes.len() => {
                let escaped = bytes[pos + 1];
                match escaped {
                    b'\\' | b'"' | b'\'' => text.push(escaped as char),
                    b'n' => text.push('\n'),
                    b't' => text.push('\t'),
                    other => {
                        text.push('\\');
                        text.push(other as char);
                    }
                }
                pos += 2;
            }
            byte if byte == quote => return Ok((Token::Str(text), pos + 1)),
            _ => {
                let ch = source[pos..].chars().next().unwrap_or('?');
                text.push(ch);
                pos += ch.len_utf8();
            }
        }
    }
    Err(ParseError::UnterminatedString { offset: start })
}

fn lex_number(source: &str, start: usize) -> Result<(Token, usize), ParseError> {
    let bytes = source.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)
    {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    let text = &source[start..pos];
    let value = text.parse::<f64>().map_err(|_| ParseError::BadNumber {
        offset: start,
        text: text.to_string(),
    })?;
    Ok((Token::Num(value), pos))
}
