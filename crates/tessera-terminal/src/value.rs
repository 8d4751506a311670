//! Parameter values and the parsers that produce them.

use std::fmt;

use tessera_types::error::ParseError;

/// Unparsed input handed to a [`ValueParser`].
///
/// Scalar parameters receive `Single`, variadic parameters receive `Many`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Single(&'a str),
    Many(&'a [String]),
}

/// A parsed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A single token.
    Text(String),
    /// The tokens bound to a variadic parameter.
    List(Vec<String>),
    Integer(i64),
    /// A structured value, as produced by [`parse_json`].
    Json(serde_json::Value),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(",")),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Converts the raw token(s) bound to a parameter into a [`ParamValue`].
///
/// Any closure with the right shape is a parser.
pub trait ValueParser: Send + Sync {
    fn parse(&self, raw: RawValue<'_>) -> Result<ParamValue, ParseError>;
}

impl<F> ValueParser for F
where
    F: Fn(RawValue<'_>) -> Result<ParamValue, ParseError> + Send + Sync,
{
    fn parse(&self, raw: RawValue<'_>) -> Result<ParamValue, ParseError> {
        self(raw)
    }
}

/// Identity parser: a token becomes `Text`, a token list becomes `List`.
pub fn parse_text(raw: RawValue<'_>) -> Result<ParamValue, ParseError> {
    Ok(match raw {
        RawValue::Single(s) => ParamValue::Text(s.to_string()),
        RawValue::Many(items) => ParamValue::List(items.to_vec()),
    })
}

/// Parse a single token as a signed integer.
pub fn parse_integer(raw: RawValue<'_>) -> Result<ParamValue, ParseError> {
    let RawValue::Single(s) = raw else {
        return Err(ParseError::new("expected a single integer"));
    };
    s.parse::<i64>()
        .map(ParamValue::Integer)
        .map_err(|e| ParseError::new(format!("invalid integer {s:?}: {e}")))
}

/// Parse a single token as an identifier: ASCII letters, digits, and
/// underscores, not starting with a digit.
pub fn parse_identifier(raw: RawValue<'_>) -> Result<ParamValue, ParseError> {
    let RawValue::Single(s) = raw else {
        return Err(ParseError::new("expected a single identifier"));
    };
    if is_identifier(s) {
        Ok(ParamValue::Text(s.to_string()))
    } else {
        Err(ParseError::new(format!("invalid variable name: {s:?}")))
    }
}

/// Parse a JSON document. A token list is joined with single spaces first,
/// so `[1, 2]` typed without quotes still parses.
pub fn parse_json(raw: RawValue<'_>) -> Result<ParamValue, ParseError> {
    let text = match raw {
        RawValue::Single(s) => s.to_string(),
        RawValue::Many(items) => items.join(" "),
    };
    serde_json::from_str(&text)
        .map(ParamValue::Json)
        .map_err(|e| ParseError::new(format!("invalid JSON {text:?}: {e}")))
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
