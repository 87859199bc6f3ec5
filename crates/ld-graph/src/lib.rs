//! ld-graph: typed object graphs from flat JSON-LD documents.
//!
//! This crate decodes a compacted JSON-LD document (`@context` plus a flat
//! `@graph` array of nodes) into an arena of statically-typed records that
//! reference each other by handle, and encodes such graphs back.
//!
//! # Overview
//!
//! Decoding is built for graphs as real producers write them:
//! - **Forward references and cycles**: every identified node gets its
//!   instance before any field is populated
//! - **Shared identity**: all references to one identifier resolve to the
//!   same [`ObjectRef`]
//! - **Best effort**: a bad node or field is reported and skipped; the rest
//!   of the document still decodes
//!
//! # Quick Start
//!
//! ```rust
//! use ld_graph::spdx::{Relationship, LD_CONTEXT};
//!
//! let json = r#"{
//!     "@context": "https://spdx.org/rdf/3.0.0/spdx-context.jsonld",
//!     "@graph": [
//!         { "type": "Relationship", "spdxId": "urn:rel", "from": "urn:pkg", "to": ["urn:file"] },
//!         { "type": "software_Package", "spdxId": "urn:pkg", "name": "pkg" },
//!         { "type": "software_File", "spdxId": "urn:file", "name": "file" }
//!     ]
//! }"#;
//!
//! let graph = LD_CONTEXT.decode_str(json).unwrap().into_result().unwrap();
//! let rel = graph.get_as::<Relationship>(graph.lookup("urn:rel").unwrap()).unwrap();
//! assert_eq!(rel.from, graph.lookup("urn:pkg"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Graph arena, record capability traits, type descriptors
//! - [`registry`]: Context and type registries
//! - [`codec`]: Two-pass decoder, value coercion, encoder
//! - [`spdx`]: SPDX 3 Core and Software record types
//! - [`error`]: Error types
//! - [`limits`]: Wire keywords and decoding limits
//!
//! # Defining record types
//!
//! A record is a plain struct implementing [`Record`] and, through
//! [`impl_properties!`], [`Properties`]. Its static [`TypeDescriptor`] lists
//! the wire fields and their shapes. See the [`spdx`] module for a complete
//! set.
//!
//! # Logging
//!
//! Decoding emits `tracing` events at `debug` (per decode, skipped nodes)
//! and `trace` (dropped references). No subscriber is installed.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod registry;
pub mod spdx;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{decode, decode_with_options, encode, encode_to_string, DecodeOptions, Decoded};
pub use error::{DecodeError, DecodeErrors, ErrorCode, NodeError};
pub use model::{
    Accepts, DateTime, FieldDescriptor, FieldShape, Graph, ObjectRef, Properties, Record, Slot,
    SlotMut, TypeDescriptor,
};
pub use registry::{ContextRegistry, TypeRegistry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
