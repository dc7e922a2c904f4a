//! Codec module - compact reply decoding
//!
//! Turns the nested, integer-tagged reply of `GRAPH.QUERY ... --compact` into
//! typed values.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │          response_decoder            │
//! │   header / rows / statistics split   │
//! └──────────────────────────────────────┘
//!                    │ (lazily, per row)
//!                    ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │  value_decoder   │ ◀──▶ │  entity_decoder  │ ──▶ SchemaResolver
//! │ [tag, payload]   │      │ node/edge/path   │     (name lookup)
//! └──────────────────┘      └──────────────────┘
//!                    ▲
//!                    │
//!              ┌──────────┐
//!              │  reply   │  raw RESP-shaped tree
//!              └──────────┘
//! ```
//!
//! Decoding is synchronous. The only blocking point is a schema refresh
//! triggered through the resolver when a name index is unknown.

pub mod entity_decoder;
pub mod reply;
pub mod response_decoder;
pub mod value_decoder;

pub use entity_decoder::EntityDecoder;
pub use reply::Reply;
pub use response_decoder::ResponseDecoder;
pub use value_decoder::ValueDecoder;
