//! Lexer and recursive-descent parser for the extraction expression language.
//!
//! The grammar, loosest binding first:
//!
//! ```text
//! expr    := pipe ('//' pipe)*
//! pipe    := cmp ('|' cmp)*
//! cmp     := postfix (('==' | '!=') postfix)?
//! postfix := primary suffix*
//! suffix  := '.' ident '?'? | '[' int? ']' '?'?
//! primary := '.' suffix* | literal | 'select' '(' expr ')'
//!          | 'join' '(' expr ')' | '(' expr ')'
//! ```
//!
//! Note that `//` binds looser than `|`, so `a | b // c` is the whole
//! pipeline `a | b` with `c` as its default. jq nests the default inside the
//! last pipe stage instead, which makes pipeline-wide fallbacks impossible
//! to write without parentheses.

use serde_json::{Number, Value};
use thiserror::Error;

/// Compilation failure for an extraction expression.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
}

/// Compiled expression tree.
///
/// Path chains are normalized into nested `Pipe` nodes, so `.a.b` and
/// `.a | .b` compile to the same shape.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Identity,
    Field { name: String, optional: bool },
    Index { index: i64, optional: bool },
    Iterate { optional: bool },
    Pipe(Box<Expr>, Box<Expr>),
    Alt(Box<Expr>, Box<Expr>),
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Select(Box<Expr>),
    Join(Box<Expr>),
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Dot,
    LBracket,
    RBracket,
    Question,
    Pipe,
    Alt,
    Eq,
    Ne,
    LParen,
    RParen,
    Ident(String),
    Str(String),
    Num(Number),
}

fn lex(src: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '.' => {
                chars.next();
                tokens.push((Token::Dot, offset));
            }
            '[' => {
                chars.next();
                tokens.push((Token::LBracket, offset));
            }
            ']' => {
                chars.next();
                tokens.push((Token::RBracket, offset));
            }
            '?' => {
                chars.next();
                tokens.push((Token::Question, offset));
            }
            '(' => {
                chars.next();
                tokens.push((Token::LParen, offset));
            }
            ')' => {
                chars.next();
                tokens.push((Token::RParen, offset));
            }
            '|' => {
                chars.next();
                tokens.push((Token::Pipe, offset));
            }
            '/' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '/')) => {
                        chars.next();
                        tokens.push((Token::Alt, offset));
                    }
                    _ => return Err(ParseError::new("expected '//'", offset)),
                }
            }
            '=' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '=')) => {
                        chars.next();
                        tokens.push((Token::Eq, offset));
                    }
                    _ => return Err(ParseError::new("expected '=='", offset)),
                }
            }
            '!' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '=')) => {
                        chars.next();
                        tokens.push((Token::Ne, offset));
                    }
                    _ => return Err(ParseError::new("expected '!='", offset)),
                }
            }
            '"' => {
                chars.next();
                tokens.push((Token::Str(lex_string(src, &mut chars, offset)?), offset));
            }
            '-' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, d)) if d.is_ascii_digit() => {
                        tokens.push((Token::Num(lex_number(src, &mut chars, offset, true)?), offset));
                    }
                    _ => return Err(ParseError::new("expected digit after '-'", offset)),
                }
            }
            c if c.is_ascii_digit() => {
                tokens.push((Token::Num(lex_number(src, &mut chars, offset, false)?), offset));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(ident), offset));
            }
            c => {
                return Err(ParseError::new(format!("unexpected character '{c}'"), offset));
            }
        }
    }

    Ok(tokens)
}

fn lex_string(
    src: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices>,
    start: usize,
) -> Result<String, ParseError> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => return Ok(out),
            Some((offset, '\\')) => match chars.next() {
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, c)) => {
                    return Err(ParseError::new(format!("unknown escape '\\{c}'"), offset));
                }
                None => return Err(ParseError::new("unterminated string", start)),
            },
            Some((_, c)) => out.push(c),
            None => {
                let _ = src;
                return Err(ParseError::new("unterminated string", start));
            }
        }
    }
}

fn lex_number(
    src: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices>,
    start: usize,
    negative: bool,
) -> Result<Number, ParseError> {
    let digits_start = chars.peek().map(|&(i, _)| i).unwrap_or(src.len());
    let mut end = digits_start;
    let mut is_float = false;
    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            end = i + c.len_utf8();
            chars.next();
        } else if c == '.' || c == 'e' || c == 'E' {
            // A float component; '+'/'-' may follow an exponent marker.
            is_float = true;
            end = i + c.len_utf8();
            chars.next();
            if c != '.' {
                if let Some(&(j, sign @ ('+' | '-'))) = chars.peek() {
                    end = j + sign.len_utf8();
                    chars.next();
                }
            }
        } else {
            break;
        }
    }

    let text = &src[digits_start..end];
    if is_float {
        let parsed: f64 = text
            .parse()
            .map_err(|_| ParseError::new(format!("invalid number '{text}'"), start))?;
        let parsed = if negative { -parsed } else { parsed };
        Number::from_f64(parsed).ok_or_else(|| ParseError::new("number out of range", start))
    } else {
        let parsed: i64 = text
            .parse()
            .map_err(|_| ParseError::new(format!("invalid number '{text}'"), start))?;
        let parsed = if negative { -parsed } else { parsed };
        Ok(Number::from(parsed))
    }
}

pub(crate) fn parse(src: &str) -> Result<Expr, ParseError> {
    let tokens = lex(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: src.len(),
    };
    let expr = parser.expr()?;
    if let Some((token, offset)) = parser.tokens.get(parser.pos) {
        return Err(ParseError::new(
            format!("unexpected trailing input: {token:?}"),
            *offset,
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, o)| *o).unwrap_or(self.end)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), ParseError> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(ParseError::new(format!("expected {what}"), self.offset()))
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.pipe()?;
        while self.eat(&Token::Alt) {
            let right = self.pipe()?;
            left = Expr::Alt(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn pipe(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.compare()?;
        while self.eat(&Token::Pipe) {
            let right = self.compare()?;
            left = Expr::Pipe(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn compare(&mut self) -> Result<Expr, ParseError> {
        let left = self.postfix()?;
        let op = match self.peek() {
            Some(Token::Eq) => CmpOp::Eq,
            Some(Token::Ne) => CmpOp::Ne,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.postfix()?;
        Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.pos += 1;
                    let suffix = self.field_suffix()?;
                    expr = combine(expr, suffix);
                }
                Some(Token::LBracket) => {
                    self.pos += 1;
                    let suffix = self.bracket_suffix()?;
                    expr = combine(expr, suffix);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let offset = self.offset();
        match self.bump() {
            Some(Token::Dot) => match self.peek() {
                Some(Token::Ident(_)) => self.field_suffix(),
                // Bare '.' or '.[...]'; postfix picks up any brackets.
                _ => Ok(Expr::Identity),
            },
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::Num(n)) => Ok(Expr::Literal(Value::Number(n))),
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" => Ok(Expr::Literal(Value::Null)),
                "select" => {
                    self.expect(Token::LParen, "'(' after select")?;
                    let inner = self.expr()?;
                    self.expect(Token::RParen, "')' to close select")?;
                    Ok(Expr::Select(Box::new(inner)))
                }
                "join" => {
                    self.expect(Token::LParen, "'(' after join")?;
                    let inner = self.expr()?;
                    self.expect(Token::RParen, "')' to close join")?;
                    Ok(Expr::Join(Box::new(inner)))
                }
                _ => Err(ParseError::new(
                    format!("unknown function or keyword '{name}'"),
                    offset,
                )),
            },
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(token) => Err(ParseError::new(
                format!("unexpected token {token:?}"),
                offset,
            )),
            None => Err(ParseError::new("unexpected end of expression", offset)),
        }
    }

    /// Parses `ident '?'?` after a consumed dot.
    fn field_suffix(&mut self) -> Result<Expr, ParseError> {
        let offset = self.offset();
        match self.bump() {
            Some(Token::Ident(name)) => {
                let optional = self.eat(&Token::Question);
                Ok(Expr::Field { name, optional })
            }
            _ => Err(ParseError::new("expected field name after '.'", offset)),
        }
    }

    /// Parses `int? ']' '?'?` after a consumed opening bracket.
    fn bracket_suffix(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&Token::RBracket) {
            let optional = self.eat(&Token::Question);
            return Ok(Expr::Iterate { optional });
        }
        let offset = self.offset();
        match self.bump() {
            Some(Token::Num(n)) => {
                let index = n.as_i64().ok_or_else(|| {
                    ParseError::new("array index must be an integer", offset)
                })?;
                self.expect(Token::RBracket, "']'")?;
                let optional = self.eat(&Token::Question);
                Ok(Expr::Index { index, optional })
            }
            _ => Err(ParseError::new("expected ']' or array index", offset)),
        }
    }
}

/// Folds a path suffix onto an expression, eliding the identity prefix.
fn combine(expr: Expr, suffix: Expr) -> Expr {
    if expr == Expr::Identity {
        suffix
    } else {
        Expr::Pipe(Box::new(expr), Box::new(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> Expr {
        Expr::Field {
            name: name.to_string(),
            optional: false,
        }
    }

    #[test]
    fn test_parse_identity() {
        assert_eq!(parse(".").unwrap(), Expr::Identity);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse(".kind").unwrap(), field("kind"));
    }

    #[test]
    fn test_parse_field_chain() {
        let expr = parse(".status.phase").unwrap();
        assert_eq!(
            expr,
            Expr::Pipe(Box::new(field("status")), Box::new(field("phase")))
        );
    }

    #[test]
    fn test_parse_optional_iterate() {
        let expr = parse(".items[]?").unwrap();
        assert_eq!(
            expr,
            Expr::Pipe(
                Box::new(field("items")),
                Box::new(Expr::Iterate { optional: true })
            )
        );
    }

    #[test]
    fn test_parse_index() {
        let expr = parse(".[0]").unwrap();
        assert_eq!(
            expr,
            Expr::Index {
                index: 0,
                optional: false
            }
        );

        let expr = parse(".[-1]").unwrap();
        assert_eq!(
            expr,
            Expr::Index {
                index: -1,
                optional: false
            }
        );
    }

    #[test]
    fn test_parse_select_with_comparison() {
        let expr = parse(r#"select(.type=="Ready")"#).unwrap();
        let Expr::Select(inner) = expr else {
            panic!("expected select");
        };
        assert_eq!(
            *inner,
            Expr::Compare {
                op: CmpOp::Eq,
                left: Box::new(field("type")),
                right: Box::new(Expr::Literal(Value::String("Ready".to_string()))),
            }
        );
    }

    #[test]
    fn test_alternative_binds_looser_than_pipe() {
        // The whole pipeline gets the default, not just the last stage.
        let expr = parse(r#".a | .b // "x""#).unwrap();
        let Expr::Alt(left, right) = expr else {
            panic!("expected alternative at the root");
        };
        assert_eq!(
            *left,
            Expr::Pipe(Box::new(field("a")), Box::new(field("b")))
        );
        assert_eq!(*right, Expr::Literal(Value::String("x".to_string())));
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse("true").unwrap(), Expr::Literal(Value::Bool(true)));
        assert_eq!(parse("null").unwrap(), Expr::Literal(Value::Null));
        assert_eq!(
            parse("42").unwrap(),
            Expr::Literal(Value::Number(Number::from(42)))
        );
        assert_eq!(
            parse(r#""hi\n""#).unwrap(),
            Expr::Literal(Value::String("hi\n".to_string()))
        );
    }

    #[test]
    fn test_parse_join() {
        let expr = parse(r#". | join(", ")"#).unwrap();
        assert_eq!(
            expr,
            Expr::Pipe(
                Box::new(Expr::Identity),
                Box::new(Expr::Join(Box::new(Expr::Literal(Value::String(
                    ", ".to_string()
                )))))
            )
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse(".foo..bar").is_err());
        assert!(parse("frobnicate(.)").is_err());
        assert!(parse(".a = 1").is_err());
        assert!(parse(r#""unterminated"#).is_err());
        assert!(parse(".items[").is_err());
        assert!(parse(".a @").is_err());
    }

    #[test]
    fn test_parse_error_reports_offset() {
        let err = parse(".a #").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert!(parse(".a )").is_err());
    }
}
