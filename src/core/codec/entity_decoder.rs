//! EntityDecoder - nodes, edges and paths
//!
//! Wire shapes (payload only, the `[tag, ...]` wrapper is already stripped):
//!
//! - node: `[id, [labelIndex, ...], [[keyIndex, valueTag, payload], ...]]`
//! - edge: `[id, relTypeIndex, sourceId, destId, [[keyIndex, valueTag, payload], ...]]`
//! - path: `[nodes, edges]`, each a `[6, [fragment, ...]]` array fragment or a
//!   bare sequence of fragments

use indexmap::IndexMap;

use crate::cache::SchemaResolver;
use crate::core::codec::value_decoder::{parse_integer, split_fragment};
use crate::core::codec::{Reply, ValueDecoder};
use crate::core::error::{DecodeError, GraphResult};
use crate::core::value::{Value, ValueType};
use crate::core::vertex_edge_path::{Edge, Node, Path};

pub struct EntityDecoder<'a> {
    schema: &'a dyn SchemaResolver,
}

impl<'a> EntityDecoder<'a> {
    pub fn new(schema: &'a dyn SchemaResolver) -> Self {
        Self { schema }
    }

    pub fn decode_node(&self, payload: &Reply) -> GraphResult<Node> {
        let [id, labels, properties] = fields::<3>("node", "[id, labels, properties]", payload)?;

        let id = parse_id("node id", id)?;
        let indices = labels
            .as_array()
            .ok_or_else(|| DecodeError::malformed("node labels", "sequence of indices", labels))?;
        let mut seen = Vec::with_capacity(indices.len());
        for index in indices {
            let index = parse_index("label index", index)?;
            if seen.contains(&index) {
                return Err(
                    DecodeError::malformed("node labels", "distinct label indices", labels).into(),
                );
            }
            seen.push(index);
        }
        let names = seen
            .into_iter()
            .map(|index| self.schema.label(index))
            .collect::<GraphResult<Vec<_>>>()?;
        let properties = self.decode_properties(properties)?;

        Ok(Node::new(id, names, properties))
    }

    pub fn decode_edge(&self, payload: &Reply) -> GraphResult<Edge> {
        let [id, rel_type, src, dst, properties] = fields::<5>(
            "edge",
            "[id, relTypeIndex, sourceId, destId, properties]",
            payload,
        )?;

        let id = parse_id("edge id", id)?;
        let relationship_type = self
            .schema
            .relationship_type(parse_index("relationship type index", rel_type)?)?;
        let source_id = parse_id("edge source id", src)?;
        let destination_id = parse_id("edge destination id", dst)?;
        let properties = self.decode_properties(properties)?;

        Ok(Edge::new(
            id,
            relationship_type,
            source_id,
            destination_id,
            properties,
        ))
    }

    pub fn decode_path(&self, payload: &Reply) -> GraphResult<Path> {
        let [nodes, edges] = fields::<2>("path", "[nodes, edges]", payload)?;

        let nodes = entity_list("path nodes", nodes)?
            .iter()
            .map(|fragment| {
                let inner = expect_tag("path node", ValueType::Node, fragment)?;
                self.decode_node(inner)
            })
            .collect::<GraphResult<Vec<_>>>()?;
        let edges = entity_list("path edges", edges)?
            .iter()
            .map(|fragment| {
                let inner = expect_tag("path edge", ValueType::Edge, fragment)?;
                self.decode_edge(inner)
            })
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(Path::new(nodes, edges)?)
    }

    /// `[[keyIndex, valueTag, payload], ...]`, resolved and decoded in reply order
    fn decode_properties(&self, payload: &Reply) -> GraphResult<IndexMap<String, Value>> {
        let triples = payload
            .as_array()
            .ok_or_else(|| DecodeError::malformed("properties", "sequence of triples", payload))?;
        let values = ValueDecoder::new(self.schema);

        let mut properties = IndexMap::with_capacity(triples.len());
        for triple in triples {
            let [key, tag, value] = fields::<3>("property", "[keyIndex, valueTag, payload]", triple)?;
            let name = self
                .schema
                .property_key(parse_index("property key index", key)?)?;
            let tag = parse_integer("property value tag", tag)?;
            properties.insert(name, values.decode_tagged(tag, value)?);
        }
        Ok(properties)
    }
}

/// Borrow a payload as exactly `N` elements
fn fields<'r, const N: usize>(
    context: &'static str,
    expected: &'static str,
    payload: &'r Reply,
) -> Result<&'r [Reply; N], DecodeError> {
    payload
        .as_array()
        .and_then(|items| <&[Reply; N]>::try_from(items).ok())
        .ok_or_else(|| DecodeError::malformed(context, expected, payload))
}

fn parse_id(context: &'static str, reply: &Reply) -> Result<u64, DecodeError> {
    let raw = parse_integer(context, reply)?;
    u64::try_from(raw).map_err(|_| DecodeError::malformed(context, "non-negative integer", reply))
}

fn parse_index(context: &'static str, reply: &Reply) -> Result<usize, DecodeError> {
    let raw = parse_integer(context, reply)?;
    usize::try_from(raw).map_err(|_| DecodeError::malformed(context, "non-negative index", reply))
}

/// Unwrap a path component: a tagged array fragment or a bare sequence
fn entity_list<'r>(context: &'static str, reply: &'r Reply) -> Result<&'r [Reply], DecodeError> {
    let items = reply
        .as_array()
        .ok_or_else(|| DecodeError::malformed(context, "sequence of fragments", reply))?;
    match items {
        [Reply::Integer(_), _] => {
            let inner = expect_tag(context, ValueType::Array, reply)?;
            inner
                .as_array()
                .ok_or_else(|| DecodeError::malformed(context, "sequence of fragments", inner))
        }
        _ => Ok(items),
    }
}

/// Strip a fragment's tag, insisting on `expected`
fn expect_tag<'r>(
    context: &'static str,
    expected: ValueType,
    fragment: &'r Reply,
) -> Result<&'r Reply, DecodeError> {
    let (tag, payload) = split_fragment(fragment)?;
    if tag != expected.tag() {
        return Err(match ValueType::from_tag(tag) {
            Some(_) => DecodeError::malformed(context, expected.name(), fragment),
            None => DecodeError::unknown_tag(tag, fragment),
        });
    }
    Ok(payload)
}
