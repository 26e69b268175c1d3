//! Reader for the shorthand configuration syntax.
//!
//! The syntax is a small data notation: maps `{k v}`, vectors `[a b]`,
//! strings, keywords, symbols, numbers, `nil`, `true` and `false`. Commas
//! count as whitespace and `;` starts a line comment.
//!
//! Tagged literal forms `#<name> <arg>` are the extension point. The reader
//! is constructed over a table of resolvers; when it encounters a tagged
//! form it parses the argument (resolving any nested literals first), then
//! substitutes the form with the resolver's return value. Resolution is
//! eager and bottom-up, in a single pass over the text.

use crate::error::{Error, Result};
use crate::value::Value;
use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, take_while1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, map, opt, value as fixed},
    error::{ErrorKind, FromExternalError, ParseError},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// A named literal resolver, invoked with the already-parsed argument of a
/// `#<name> <arg>` form. Implemented for free by any matching closure.
pub trait LiteralResolver {
    fn resolve(&self, arg: Value) -> Result<Value>;
}

impl<F> LiteralResolver for F
where
    F: Fn(Value) -> Result<Value>,
{
    fn resolve(&self, arg: Value) -> Result<Value> {
        self(arg)
    }
}

/// Mapping from literal name to its resolver for one read invocation.
pub type LiteralTable = IndexMap<String, Box<dyn LiteralResolver>>;

/// Parses shorthand text against an injected literal table.
pub struct Reader<'a> {
    literals: &'a LiteralTable,
}

impl<'a> Reader<'a> {
    pub fn new(literals: &'a LiteralTable) -> Self {
        Self { literals }
    }

    /// Reads a single value from `input`, resolving tagged literals inline.
    /// Trailing whitespace and comments are allowed; anything else after the
    /// value is a parse error.
    pub fn read(&self, input: &str) -> Result<Value> {
        match all_consuming(terminated(|i| expr(self.literals, i), ws))(input) {
            Ok((_, value)) => Ok(value),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_crate_error(input)),
            Err(nom::Err::Incomplete(_)) => Err(Error::Parse {
                offset: input.len(),
                message: "unexpected end of input".to_string(),
            }),
        }
    }
}

/// Parse error carrying either a syntax position or a resolver failure.
#[derive(Debug)]
struct ReadError<'a> {
    input: &'a str,
    cause: Option<Error>,
    context: Option<&'static str>,
}

impl<'a> ReadError<'a> {
    fn into_crate_error(self, source: &str) -> Error {
        if let Some(cause) = self.cause {
            return cause;
        }
        let offset = source.len() - self.input.len();
        let message = match self.context {
            Some(context) => context.to_string(),
            None => {
                let snippet: String = self.input.chars().take(24).collect();
                if snippet.is_empty() {
                    "unexpected end of input".to_string()
                } else {
                    format!("unexpected input near '{snippet}'")
                }
            }
        };
        Error::Parse { offset, message }
    }
}

impl<'a> ParseError<&'a str> for ReadError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self { input, cause: None, context: None }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> FromExternalError<&'a str, Error> for ReadError<'a> {
    fn from_external_error(input: &'a str, _kind: ErrorKind, e: Error) -> Self {
        Self { input, cause: Some(e), context: None }
    }
}

type PResult<'a, T> = IResult<&'a str, T, ReadError<'a>>;

fn fail<'a>(input: &'a str, e: Error) -> nom::Err<ReadError<'a>> {
    nom::Err::Failure(ReadError::from_external_error(input, ErrorKind::MapRes, e))
}

fn syntax<'a>(input: &'a str, context: &'static str) -> nom::Err<ReadError<'a>> {
    nom::Err::Failure(ReadError { input, cause: None, context: Some(context) })
}

/// Whitespace, commas and `;` line comments.
fn ws(input: &str) -> PResult<'_, ()> {
    fixed(
        (),
        many0(alt((
            fixed((), multispace1),
            fixed((), char(',')),
            fixed((), pair(char(';'), opt(is_not("\n")))),
        ))),
    )(input)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '.' | '*' | '+' | '!' | '-' | '_' | '?' | '$' | '%' | '&' | '=' | '<' | '>' | '/'
        )
}

/// Bare tokens: `nil`, booleans, numbers, otherwise a symbol.
fn bare_token(input: &str) -> PResult<'_, Value> {
    let (rest, token) = take_while1(is_token_char)(input)?;
    let value = match token {
        "nil" => Value::Nil,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => number_or_symbol(token),
    };
    Ok((rest, value))
}

fn number_or_symbol(token: &str) -> Value {
    let digit_start = token.starts_with(|c: char| c.is_ascii_digit())
        || (token.len() > 1
            && token.starts_with('-')
            && token[1..].starts_with(|c: char| c.is_ascii_digit()));
    if digit_start {
        if let Ok(n) = token.parse::<i64>() {
            return Value::Number(n.into());
        }
        if let Some(n) = token.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::Symbol(token.to_string())
}

fn keyword(input: &str) -> PResult<'_, Value> {
    map(preceded(char(':'), take_while1(is_token_char)), |name: &str| {
        Value::Symbol(name.to_string())
    })(input)
}

fn string(input: &str) -> PResult<'_, Value> {
    map(string_literal, Value::String)(input)
}

fn string_literal(input: &str) -> PResult<'_, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((
                    fixed('"', char('"')),
                    fixed('\\', char('\\')),
                    fixed('\n', char('n')),
                    fixed('\t', char('t')),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

fn vector<'a>(literals: &LiteralTable, input: &'a str) -> PResult<'a, Value> {
    let (mut rest, _) = char('[')(input)?;
    let mut items = Vec::new();
    loop {
        let (r, _) = ws(rest)?;
        if let Ok((r, _)) = char::<_, ReadError>(']')(r) {
            return Ok((r, Value::Seq(items)));
        }
        let (r, item) = expr(literals, r)?;
        items.push(item);
        rest = r;
    }
}

fn map_form<'a>(literals: &LiteralTable, input: &'a str) -> PResult<'a, Value> {
    let (mut rest, _) = char('{')(input)?;
    let mut entries = IndexMap::new();
    loop {
        let (r, _) = ws(rest)?;
        if let Ok((r, _)) = char::<_, ReadError>('}')(r) {
            return Ok((r, Value::Map(entries)));
        }
        let (r, key) = map_key(literals, r)?;
        let (r, value) = expr(literals, r)?;
        entries.insert(key, value);
        rest = r;
    }
}

/// Map keys may be symbols, keywords or strings; all normalize to their
/// display name.
fn map_key<'a>(literals: &LiteralTable, input: &'a str) -> PResult<'a, String> {
    let (rest, key) = expr(literals, input)?;
    match key.name() {
        Some(name) => Ok((rest, name.to_string())),
        None => Err(syntax(input, "map key must be a symbol, keyword or string")),
    }
}

fn tagged<'a>(literals: &LiteralTable, input: &'a str) -> PResult<'a, Value> {
    let (rest, name) = preceded(char('#'), take_while1(is_token_char))(input)?;
    let Some(resolver) = literals.get(name) else {
        return Err(fail(input, Error::UnknownLiteral(name.to_string())));
    };
    // The argument is fully parsed first, so nested literals are already
    // resolved when the outer resolver runs.
    let (rest, arg) = expr(literals, rest)?;
    match resolver.resolve(arg) {
        Ok(value) => Ok((rest, value)),
        Err(e) => Err(fail(input, e)),
    }
}

fn expr<'a>(literals: &LiteralTable, input: &'a str) -> PResult<'a, Value> {
    preceded(
        ws,
        alt((
            |i| map_form(literals, i),
            |i| vector(literals, i),
            |i| tagged(literals, i),
            string,
            keyword,
            bare_token,
        )),
    )(input)
}
