//! ValueDecoder - `[typeTag, payload]` fragments to `Value`

use indexmap::IndexMap;

use crate::cache::SchemaResolver;
use crate::core::codec::{EntityDecoder, Reply};
use crate::core::error::{DecodeError, GraphResult};
use crate::core::value::{Point, Value, ValueType};

/// Decodes one tagged fragment into a [`Value`]
///
/// Scalars are decoded in place. Nodes, edges and paths are handed to the
/// [`EntityDecoder`], which resolves names through `schema`.
pub struct ValueDecoder<'a> {
    schema: &'a dyn SchemaResolver,
}

impl<'a> ValueDecoder<'a> {
    pub fn new(schema: &'a dyn SchemaResolver) -> Self {
        Self { schema }
    }

    /// Decode a `[typeTag, payload]` fragment
    pub fn decode(&self, fragment: &Reply) -> GraphResult<Value> {
        let (tag, payload) = split_fragment(fragment)?;
        self.decode_tagged(tag, payload)
    }

    /// Decode a payload whose tag was carried separately (property triples)
    pub fn decode_tagged(&self, tag: i64, payload: &Reply) -> GraphResult<Value> {
        let ty = match ValueType::from_tag(tag) {
            Some(ValueType::Unknown) | None => {
                return Err(DecodeError::unknown_tag(tag, payload).into())
            }
            Some(ty) => ty,
        };

        let value = match ty {
            ValueType::Null => {
                if !payload.is_nil() {
                    return Err(DecodeError::malformed("null", "nil", payload).into());
                }
                Value::Null
            }
            ValueType::String => match payload {
                Reply::String(s) => Value::String(s.clone()),
                _ => return Err(DecodeError::malformed("string", "string", payload).into()),
            },
            ValueType::Integer => Value::Integer(parse_integer("integer", payload)?),
            ValueType::Boolean => Value::Boolean(parse_bool(payload)?),
            ValueType::Double => Value::Double(parse_double("double", payload)?),
            ValueType::Array => {
                let items = payload
                    .as_array()
                    .ok_or_else(|| DecodeError::malformed("array", "sequence of fragments", payload))?;
                Value::Array(
                    items
                        .iter()
                        .map(|item| self.decode(item))
                        .collect::<GraphResult<Vec<_>>>()?,
                )
            }
            ValueType::Map => Value::Map(self.decode_map(payload)?),
            ValueType::Point => Value::Point(decode_point(payload)?),
            ValueType::Node => Value::Node(Box::new(self.entities().decode_node(payload)?)),
            ValueType::Edge => Value::Edge(self.entities().decode_edge(payload)?),
            ValueType::Path => Value::Path(self.entities().decode_path(payload)?),
            ValueType::Unknown => return Err(DecodeError::unknown_tag(tag, payload).into()),
        };
        Ok(value)
    }

    fn entities(&self) -> EntityDecoder<'a> {
        EntityDecoder::new(self.schema)
    }

    /// Accepts either a flat `[key, fragment, key, fragment, ...]` sequence or a
    /// sequence of `[key, fragment]` pairs
    fn decode_map(&self, payload: &Reply) -> GraphResult<IndexMap<String, Value>> {
        let items = payload
            .as_array()
            .ok_or_else(|| DecodeError::malformed("map", "key/value sequence", payload))?;
        let mut map = IndexMap::with_capacity(items.len() / 2);

        if items.first().is_some_and(is_key_value_pair) {
            for item in items {
                match item.as_array() {
                    Some([key, value]) => {
                        map.insert(map_key(key)?, self.decode(value)?);
                    }
                    _ => return Err(DecodeError::malformed("map", "[key, fragment] pair", item).into()),
                }
            }
        } else {
            if items.len() % 2 != 0 {
                return Err(
                    DecodeError::malformed("map", "even number of key/value elements", payload).into(),
                );
            }
            for chunk in items.chunks_exact(2) {
                map.insert(map_key(&chunk[0])?, self.decode(&chunk[1])?);
            }
        }
        Ok(map)
    }
}

/// Split `[tag, payload]`
pub(crate) fn split_fragment(fragment: &Reply) -> Result<(i64, &Reply), DecodeError> {
    match fragment.as_array() {
        Some([Reply::Integer(tag), payload]) => Ok((*tag, payload)),
        Some([Reply::String(tag), payload]) => tag
            .trim()
            .parse::<i64>()
            .map(|tag| (tag, payload))
            .map_err(|_| DecodeError::malformed("fragment", "integer type tag", fragment)),
        _ => Err(DecodeError::malformed("fragment", "[typeTag, payload]", fragment)),
    }
}

pub(crate) fn parse_integer(context: &'static str, payload: &Reply) -> Result<i64, DecodeError> {
    match payload {
        Reply::Integer(i) => Ok(*i),
        Reply::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::invalid_number(context, payload)),
        _ => Err(DecodeError::malformed(context, "integer", payload)),
    }
}

pub(crate) fn parse_double(context: &'static str, payload: &Reply) -> Result<f64, DecodeError> {
    match payload {
        Reply::Double(d) => Ok(*d),
        Reply::Integer(i) => Ok(*i as f64),
        Reply::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DecodeError::invalid_number(context, payload)),
        _ => Err(DecodeError::malformed(context, "number", payload)),
    }
}

fn parse_bool(payload: &Reply) -> Result<bool, DecodeError> {
    match payload {
        Reply::Boolean(b) => Ok(*b),
        Reply::Integer(0) => Ok(false),
        Reply::Integer(1) => Ok(true),
        Reply::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Reply::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(DecodeError::malformed("boolean", "true or false", payload)),
    }
}

fn decode_point(payload: &Reply) -> Result<Point, DecodeError> {
    match payload.as_array() {
        Some([lat, lon]) => Ok(Point::new(
            parse_double("point latitude", lat)?,
            parse_double("point longitude", lon)?,
        )),
        _ => Err(DecodeError::malformed("point", "[latitude, longitude]", payload)),
    }
}

/// `[key, fragment]` where the key is bare or a `[2, "key"]` fragment
fn is_key_value_pair(item: &Reply) -> bool {
    match item.as_array() {
        Some([key, Reply::Array(_)]) => match key {
            Reply::String(_) => true,
            Reply::Array(inner) => matches!(
                inner.as_slice(),
                [Reply::Integer(tag), Reply::String(_)] if *tag == ValueType::String.tag()
            ),
            _ => false,
        },
        _ => false,
    }
}

/// Map keys arrive bare or as a string fragment `[2, "key"]`
fn map_key(key: &Reply) -> Result<String, DecodeError> {
    match key {
        Reply::String(s) => Ok(s.clone()),
        Reply::Array(items) => match items.as_slice() {
            [Reply::Integer(tag), Reply::String(s)] if *tag == ValueType::String.tag() => {
                Ok(s.clone())
            }
            _ => Err(DecodeError::malformed("map key", "string", key)),
        },
        _ => Err(DecodeError::malformed("map key", "string", key)),
    }
}
