//! Graph decoding.
//!
//! Decoding runs in two passes over `@graph`. The allocation pass creates one
//! empty instance per identified node, including identified node objects
//! written inline in a field, so that every identifier is known before
//! anything is wired; the fill pass then populates each node's
//! instance through the coercer in `coerce.rs`. Because all slots exist
//! before the first reference is resolved, forward references and cycles
//! need no special handling.

use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::table::InstanceTable;
use crate::error::{DecodeError, DecodeErrors, NodeError};
use crate::limits::{CONTEXT_KEY, GRAPH_KEY, ID_KEY, MAX_GRAPH_NODES, MAX_NESTING_DEPTH, TYPE_KEY};
use crate::model::{wire_kind, Graph, ObjectRef, TypeDescriptor};
use crate::registry::{ContextRegistry, TypeRegistry};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Maximum number of top-level nodes in `@graph`. Larger documents are
    /// rejected before any allocation.
    pub max_nodes: usize,
    /// Maximum nesting of inline node objects and nested records below a
    /// top-level node.
    pub max_depth: usize,
    /// Record [`NodeError::UnresolvedReference`] for identifier strings that
    /// name no node. Off by default: such references are silently left
    /// unset.
    pub report_unresolved: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_nodes: MAX_GRAPH_NODES,
            max_depth: MAX_NESTING_DEPTH,
            report_unresolved: false,
        }
    }
}

impl DecodeOptions {
    /// Creates new decode options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that also report unresolved references.
    pub fn strict() -> Self {
        Self {
            report_unresolved: true,
            ..Self::default()
        }
    }
}

/// The result of a decode that got past the document preconditions.
///
/// `graph` holds every node that could be decoded; `errors` lists the
/// per-node problems encountered along the way.
#[derive(Debug)]
pub struct Decoded {
    pub graph: Graph,
    pub errors: DecodeErrors,
}

impl Decoded {
    /// True when no node or field reported an error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the graph only if decoding was error-free.
    pub fn into_result(self) -> Result<Graph, DecodeErrors> {
        if self.errors.is_empty() {
            Ok(self.graph)
        } else {
            Err(self.errors)
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a parsed document with default options.
pub fn decode(registry: &ContextRegistry, document: &Value) -> Result<Decoded, DecodeError> {
    decode_with_options(registry, document, &DecodeOptions::default())
}

/// Decodes a parsed document.
///
/// Fails only when the document root is malformed, its context is not
/// registered, or it exceeds `options.max_nodes`. Everything else is
/// reported per node in [`Decoded::errors`] and the remaining nodes are still
/// decoded.
pub fn decode_with_options(
    registry: &ContextRegistry,
    document: &Value,
    options: &DecodeOptions,
) -> Result<Decoded, DecodeError> {
    let root = document.as_object().ok_or(DecodeError::NotAnObject {
        found: wire_kind(document),
    })?;
    let context = root
        .get(CONTEXT_KEY)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingContext)?;
    let nodes = root
        .get(GRAPH_KEY)
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingGraph)?;
    let types = registry
        .resolve(context)
        .ok_or_else(|| DecodeError::UnknownContext {
            context: context.to_string(),
        })?;
    if nodes.len() > options.max_nodes {
        return Err(DecodeError::TooManyNodes {
            len: nodes.len(),
            max: options.max_nodes,
        });
    }

    debug!(context, nodes = nodes.len(), "decoding graph");

    let mut decoder = Decoder {
        types,
        options,
        table: InstanceTable::with_capacity(nodes.len()),
        errors: DecodeErrors::new(),
    };

    // Pass 1: allocate every node's instance.
    let slots: Vec<Option<ObjectRef>> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| decoder.allocate(node, &node_path(i)))
        .collect();

    // Pass 2: populate. Nodes that failed allocation have no slot.
    for (i, (node, slot)) in nodes.iter().zip(&slots).enumerate() {
        if let (Some(handle), Value::Object(map)) = (*slot, node) {
            decoder.fill(handle, map, &node_path(i), 0);
        }
    }

    let roots: Vec<ObjectRef> = slots.into_iter().flatten().collect();
    let Decoder { table, errors, .. } = decoder;

    debug!(
        context,
        instances = table.len(),
        roots = roots.len(),
        errors = errors.len(),
        "decoded graph"
    );

    Ok(Decoded {
        graph: table.into_graph(context.to_string(), roots),
        errors,
    })
}

fn node_path(index: usize) -> String {
    format!("{GRAPH_KEY}[{index}]")
}

/// State of one decode call.
pub(super) struct Decoder<'a> {
    pub(super) types: &'a TypeRegistry,
    pub(super) options: &'a DecodeOptions,
    pub(super) table: InstanceTable,
    pub(super) errors: DecodeErrors,
}

impl Decoder<'_> {
    /// Allocation pass for one top-level node.
    fn allocate(&mut self, node: &Value, path: &str) -> Option<ObjectRef> {
        let Value::Object(map) = node else {
            debug!(path, found = wire_kind(node), "skipping non-object node");
            self.errors.push(NodeError::UnexpectedValue {
                path: path.to_string(),
                found: wire_kind(node),
            });
            return None;
        };
        let ty = self.node_type(map, path)?;
        let handle = self.allocate_typed(node_id(map, ty), ty, path)?;
        self.register_inline(ty, map, 0);
        Some(handle)
    }

    /// Resolves a node's `type` discriminator, recording an error if it is
    /// missing or unregistered.
    pub(super) fn node_type(
        &mut self,
        map: &Map<String, Value>,
        path: &str,
    ) -> Option<&'static TypeDescriptor> {
        let Some(name) = map.get(TYPE_KEY).and_then(Value::as_str) else {
            debug!(path, "skipping node without type");
            self.errors.push(NodeError::MissingType {
                path: path.to_string(),
            });
            return None;
        };
        let ty = self.types.lookup(name);
        if ty.is_none() {
            debug!(path, type_name = name, "skipping node of unknown type");
            self.errors.push(NodeError::UnknownType {
                path: path.to_string(),
                type_name: name.to_string(),
            });
        }
        ty
    }

    /// Returns the instance already holding `id`, or allocates a new one.
    /// Anonymous nodes always get a fresh slot.
    pub(super) fn allocate_typed(
        &mut self,
        id: Option<&str>,
        ty: &'static TypeDescriptor,
        path: &str,
    ) -> Option<ObjectRef> {
        let Some(id) = id else {
            return Some(self.table.allocate(None, ty));
        };
        let Some(existing) = self.table.lookup(id) else {
            return Some(self.table.allocate(Some(id), ty));
        };
        let existing_ty = self.table.descriptor(existing);
        if existing_ty.same(ty) {
            return Some(existing);
        }
        debug!(path, id, "skipping node with conflicting type");
        self.errors.push(NodeError::TypeConflict {
            path: path.to_string(),
            id: id.to_string(),
            existing: existing_ty.name(),
            declared: ty.name(),
        });
        None
    }

    /// Populates an allocated instance from its property map.
    pub(super) fn fill(
        &mut self,
        handle: ObjectRef,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) {
        // Checked out means an enclosing call is filling this instance; the
        // reference to it is still valid.
        let Some(mut record) = self.table.checkout(handle) else {
            tracing::trace!(path, "instance already being filled");
            return;
        };
        self.populate(record.as_mut(), map, path, depth);
        self.table.restore(handle, record);
    }
}

/// The node's identifier: `@id`, else the type's identifier property.
/// Empty identifiers count as absent.
pub(super) fn node_id<'m>(map: &'m Map<String, Value>, ty: &TypeDescriptor) -> Option<&'m str> {
    let id = map.get(ID_KEY).and_then(Value::as_str).or_else(|| {
        ty.id_property
            .and_then(|property| map.get(property))
            .and_then(Value::as_str)
    });
    id.filter(|id| !id.is_empty())
}
