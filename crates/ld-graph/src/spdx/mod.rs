//! SPDX 3 record types.
//!
//! These are the records a schema compiler emits for the SPDX 3.0 Core and
//! Software profiles, together with [`LD_CONTEXT`], the process-wide
//! context registry binding them to the SPDX context URLs.
//!
//! ```
//! use ld_graph::spdx::{Package, LD_CONTEXT};
//!
//! let decoded = LD_CONTEXT
//!     .decode_str(r#"{
//!         "@context": "https://spdx.org/rdf/3.0.0/spdx-context.jsonld",
//!         "@graph": [
//!             { "type": "software_Package", "spdxId": "urn:pkg", "name": "demo" }
//!         ]
//!     }"#)
//!     .unwrap();
//! let handle = decoded.graph.lookup("urn:pkg").unwrap();
//! let package = decoded.graph.get_as::<Package>(handle).unwrap();
//! assert_eq!(package.software.artifact.element.name.as_deref(), Some("demo"));
//! ```

mod core_profile;
mod software;

use lazy_static::lazy_static;

pub use self::core_profile::{
    Agent, Artifact, CreationInfo, Element, ElementCollection, ExternalIdentifier, Organization,
    Person, Relationship, SoftwareAgent, SpdxDocument, Tool, CREATION_INFO, EXTERNAL_IDENTIFIER,
    ORGANIZATION, PERSON, RELATIONSHIP, SOFTWARE_AGENT, SPDX_DOCUMENT, TOOL,
};
pub use self::software::{File, Package, Sbom, SoftwareArtifact, FILE, PACKAGE, SBOM};

use crate::model::{Record, TypeDescriptor};
use crate::registry::ContextRegistry;

/// SPDX 3.0.0 JSON-LD context.
pub const CONTEXT_URL: &str = "https://spdx.org/rdf/3.0.0/spdx-context.jsonld";

/// SPDX 3.0.1 JSON-LD context.
///
/// Registered with the 3.0.0 descriptors, so 3.0.1 documents resolve by
/// compact names (`software_Package`, `spdxId`). Full IRIs are matched only
/// in their `rdf/3.0.0/terms` form.
pub const CONTEXT_URL_3_0_1: &str = "https://spdx.org/rdf/3.0.1/spdx-context.jsonld";

/// Every concrete SPDX type, in registration order.
pub static TYPES: &[&TypeDescriptor] = &[
    &CREATION_INFO,
    &EXTERNAL_IDENTIFIER,
    &PERSON,
    &ORGANIZATION,
    &SOFTWARE_AGENT,
    &TOOL,
    &SPDX_DOCUMENT,
    &RELATIONSHIP,
    &PACKAGE,
    &FILE,
    &SBOM,
];

lazy_static! {
    /// SPDX types registered under both context URLs. Built on first use and
    /// read-only afterwards.
    pub static ref LD_CONTEXT: ContextRegistry = ContextRegistry::new()
        .with_types(CONTEXT_URL, TYPES)
        .with_types(CONTEXT_URL_3_0_1, TYPES);
}

/// The [`Element`] fields of any SPDX element record.
pub fn element_of<'a>(record: &'a (dyn Record + 'static)) -> Option<&'a Element> {
    if let Some(r) = record.downcast_ref::<Person>() {
        return Some(&r.agent.element);
    }
    if let Some(r) = record.downcast_ref::<Organization>() {
        return Some(&r.agent.element);
    }
    if let Some(r) = record.downcast_ref::<SoftwareAgent>() {
        return Some(&r.agent.element);
    }
    if let Some(r) = record.downcast_ref::<Tool>() {
        return Some(&r.element);
    }
    if let Some(r) = record.downcast_ref::<SpdxDocument>() {
        return Some(&r.collection.element);
    }
    if let Some(r) = record.downcast_ref::<Sbom>() {
        return Some(&r.collection.element);
    }
    if let Some(r) = record.downcast_ref::<Relationship>() {
        return Some(&r.element);
    }
    if let Some(r) = record.downcast_ref::<Package>() {
        return Some(&r.software.artifact.element);
    }
    if let Some(r) = record.downcast_ref::<File>() {
        return Some(&r.software.artifact.element);
    }
    None
}
