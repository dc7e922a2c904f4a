//! Raw reply tree as handed back by the transport

use std::fmt::{self, Write};

use crate::core::error::DecodeError;

/// Upper bound on the characters kept in an error snippet
const SNIPPET_LIMIT: usize = 64;

/// One node of a RESP-shaped reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nil,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Reply>),
    /// Error reply sent in-band by the server
    Error(String),
}

impl Reply {
    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Reply::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Reply::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Bounded textual excerpt for diagnostics
    pub fn snippet(&self) -> String {
        let mut out = Bounded::new(SNIPPET_LIMIT);
        // Bounded 在超出上限时返回 Err，截断即可
        let truncated = write!(out, "{}", self).is_err();
        let mut text = out.buf;
        if truncated {
            text.push_str("...");
        }
        text
    }
}

/// `fmt::Write` sink that stops once `limit` characters are written
struct Bounded {
    buf: String,
    remaining: usize,
}

impl Bounded {
    fn new(limit: usize) -> Self {
        Self {
            buf: String::new(),
            remaining: limit,
        }
    }
}

impl Write for Bounded {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.remaining == 0 {
                return Err(fmt::Error);
            }
            self.buf.push(c);
            self.remaining -= 1;
        }
        Ok(())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Nil => write!(f, "nil"),
            Reply::Integer(i) => write!(f, "{}", i),
            Reply::Double(d) => write!(f, "{}", d),
            Reply::Boolean(b) => write!(f, "{}", b),
            Reply::String(s) => write!(f, "{:?}", s),
            Reply::Error(msg) => write!(f, "(error) {}", msg),
            Reply::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Reply {
    fn from(value: i64) -> Self {
        Reply::Integer(value)
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Reply::String(value.to_string())
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Reply::String(value)
    }
}

impl From<Vec<Reply>> for Reply {
    fn from(value: Vec<Reply>) -> Self {
        Reply::Array(value)
    }
}

/// Recorded replies and fixtures are kept as JSON
impl TryFrom<serde_json::Value> for Reply {
    type Error = DecodeError;

    fn try_from(value: serde_json::Value) -> Result<Self, DecodeError> {
        use serde_json::Value as Json;

        let reply = match value {
            Json::Null => Reply::Nil,
            Json::Bool(b) => Reply::Boolean(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Reply::Integer(i),
                None => Reply::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Reply::String(s),
            Json::Array(items) => Reply::Array(
                items
                    .into_iter()
                    .map(Reply::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(map) => {
                return Err(DecodeError::UnexpectedReply {
                    context: "json object",
                    snippet: Reply::String(Json::Object(map).to_string()).snippet(),
                })
            }
        };
        Ok(reply)
    }
}
