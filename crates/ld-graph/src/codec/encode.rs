//! Graph encoding.
//!
//! Writes a [`Graph`] back out as a flat `@context`/`@graph` document that
//! decodes to an isomorphic graph.

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

use crate::limits::{CONTEXT_KEY, GRAPH_KEY, ID_KEY, TYPE_KEY};
use crate::model::{blank_id, FieldShape, Graph, ObjectRef, Record, Slot};

/// Encodes a graph as a JSON-LD document.
///
/// Every instance becomes one top-level node, in allocation order. Anonymous
/// instances that something references are given blank identifiers
/// (`_:b0`, `_:b1`, ...) that do not collide with the graph's own ids.
pub fn encode(graph: &Graph) -> Value {
    let ids = node_ids(graph);
    let nodes: Vec<Value> = graph
        .iter()
        .map(|(handle, record)| {
            let mut node = Map::new();
            let ty = record.descriptor();
            node.insert(TYPE_KEY.to_string(), Value::from(ty.name()));
            if let Some(id) = &ids[handle.index()] {
                let key = ty.id_property.unwrap_or(ID_KEY);
                node.insert(key.to_string(), Value::from(id.as_str()));
            }
            encode_fields(record, &ids, graph, &mut node);
            Value::Object(node)
        })
        .collect();

    let mut root = Map::new();
    root.insert(CONTEXT_KEY.to_string(), Value::from(graph.context()));
    root.insert(GRAPH_KEY.to_string(), Value::Array(nodes));
    Value::Object(root)
}

/// Encodes a graph as compact JSON text.
pub fn encode_to_string(graph: &Graph) -> String {
    encode(graph).to_string()
}

/// Identifier to emit for each instance, indexed by handle.
fn node_ids(graph: &Graph) -> Vec<Option<String>> {
    let mut referenced = FxHashSet::default();
    for (_, record) in graph.iter() {
        collect_references(record, &mut referenced);
    }

    let mut next = 0usize;
    graph
        .iter()
        .map(|(handle, _)| {
            if let Some(id) = graph.id_of(handle) {
                return Some(id.to_string());
            }
            if !referenced.contains(&handle) {
                return None;
            }
            loop {
                let candidate = blank_id(next);
                next += 1;
                if graph.lookup(&candidate).is_none() {
                    return Some(candidate);
                }
            }
        })
        .collect()
}

fn collect_references(record: &dyn Record, out: &mut FxHashSet<ObjectRef>) {
    for field in record.descriptor().fields() {
        match record.slot(field.name) {
            Some(Slot::Ref(Some(target))) => {
                out.insert(*target);
            }
            Some(Slot::Refs(targets)) => out.extend(targets.iter().copied()),
            Some(Slot::Nested(inner)) => collect_references(inner, out),
            _ => {}
        }
    }
}

fn encode_fields(
    record: &dyn Record,
    ids: &[Option<String>],
    graph: &Graph,
    node: &mut Map<String, Value>,
) {
    let reference = |target: &ObjectRef| -> Option<Value> {
        graph.get(*target)?;
        ids[target.index()].as_deref().map(Value::from)
    };

    for field in record.descriptor().fields() {
        if field.shape == FieldShape::Marker {
            continue;
        }
        let value = match record.slot(field.name) {
            Some(Slot::Scalar(slot)) => slot.to_wire(),
            Some(Slot::Scalars(seq)) => {
                let items = seq.to_wire();
                (!items.is_empty()).then_some(Value::Array(items))
            }
            Some(Slot::Ref(target)) => target.as_ref().and_then(reference),
            Some(Slot::Refs(targets)) => {
                let items: Vec<Value> = targets.iter().filter_map(reference).collect();
                (!items.is_empty()).then_some(Value::Array(items))
            }
            Some(Slot::Nested(inner)) => {
                let mut nested = Map::new();
                encode_fields(inner, ids, graph, &mut nested);
                (!nested.is_empty()).then_some(Value::Object(nested))
            }
            None => None,
        };
        if let Some(value) = value {
            node.insert(field.name.to_string(), value);
        }
    }
}
