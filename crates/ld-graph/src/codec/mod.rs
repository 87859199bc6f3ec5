//! JSON-LD graph codec.
//!
//! Decoding turns a flat `@context`/`@graph` document into a [`Graph`] of
//! typed records; encoding writes one back out.
//!
//! [`Graph`]: crate::model::Graph

mod coerce;
pub mod decode;
pub mod encode;
mod table;

pub use decode::{decode, decode_with_options, DecodeOptions, Decoded};
pub use encode::{encode, encode_to_string};
