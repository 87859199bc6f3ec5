//! Value coercion: assigning wire values to record fields.
//!
//! The coercer walks a record's field descriptors in order and stores the
//! matching wire value in the field's slot. Reference values are resolved
//! through the instance table; inline node objects are allocated (or looked
//! up) and filled recursively.

use serde_json::{Map, Value};
use tracing::trace;

use crate::codec::decode::{node_id, Decoder};
use crate::error::NodeError;
use crate::limits::TYPE_KEY;
use crate::model::{
    wire_kind, Accepts, Element, FieldDescriptor, FieldShape, ObjectRef, Record, Slot, SlotMut,
    TypeDescriptor,
};

impl Decoder<'_> {
    /// Assigns every described field present in `map` to `record`.
    pub(super) fn populate(
        &mut self,
        record: &mut dyn Record,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) {
        let ty = record.descriptor();
        for field in ty.fields() {
            if field.shape == FieldShape::Marker {
                continue;
            }
            let Some(value) = field_value(map, field) else {
                continue;
            };
            let path = format!("{path}.{}", field.name);
            match record.slot_mut(field.name) {
                Some(slot) => self.assign(field, slot, value, &path, depth),
                None => self.errors.push(NodeError::ShapeMismatch {
                    path,
                    field: field.name,
                }),
            }
        }
    }

    fn assign(
        &mut self,
        field: &FieldDescriptor,
        slot: SlotMut<'_>,
        value: &Value,
        path: &str,
        depth: usize,
    ) {
        match (field.shape, slot) {
            (FieldShape::Scalar, SlotMut::Scalar(slot)) => {
                if !value.is_null() && !slot.assign(value) {
                    self.mismatch(path, slot.kind().name(), value);
                }
            }
            (FieldShape::Reference(accepts), SlotMut::Ref(slot)) => match value {
                Value::Null => {}
                Value::String(_) | Value::Object(_) => {
                    if let Some(target) = self.resolve(value, accepts, path, depth) {
                        *slot = Some(target);
                    }
                }
                other => self.mismatch(path, "reference", other),
            },
            (FieldShape::Nested, SlotMut::Nested(inner)) => match value {
                Value::Null => {}
                Value::Object(map) => {
                    if depth >= self.options.max_depth {
                        self.too_deep(path);
                    } else {
                        self.populate(inner, map, path, depth + 1);
                    }
                }
                other => self.mismatch(path, "object", other),
            },
            (FieldShape::Sequence(Element::Scalar), SlotMut::Scalars(seq)) => {
                let items = sequence_items(value);
                if items.is_empty() {
                    return;
                }
                seq.clear();
                for (i, item) in items.iter().enumerate() {
                    if !item.is_null() && !seq.push(item) {
                        self.mismatch(&format!("{path}[{i}]"), seq.kind().name(), item);
                    }
                }
            }
            (FieldShape::Sequence(Element::Reference(accepts)), SlotMut::Refs(refs)) => {
                let items = sequence_items(value);
                if items.is_empty() {
                    return;
                }
                let mut resolved = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item {
                        Value::Null => {}
                        Value::String(_) | Value::Object(_) => {
                            resolved.extend(self.resolve(item, accepts, &item_path, depth));
                        }
                        other => self.mismatch(&item_path, "reference", other),
                    }
                }
                *refs = resolved;
            }
            _ => self.errors.push(NodeError::ShapeMismatch {
                path: path.to_string(),
                field: field.name,
            }),
        }
    }

    /// Resolves a reference value to an instance the field accepts.
    ///
    /// Strings name existing instances; objects are inline nodes. Targets
    /// of the wrong type are dropped without an error.
    fn resolve(
        &mut self,
        value: &Value,
        accepts: Accepts,
        path: &str,
        depth: usize,
    ) -> Option<ObjectRef> {
        let target = match value {
            Value::String(id) => match self.table.lookup(id) {
                Some(target) => target,
                None => {
                    trace!(path, id = id.as_str(), "unresolved reference");
                    if self.options.report_unresolved {
                        self.errors.push(NodeError::UnresolvedReference {
                            path: path.to_string(),
                            id: id.clone(),
                        });
                    }
                    return None;
                }
            },
            Value::Object(map) => self.materialize(map, path, depth + 1)?,
            other => {
                self.mismatch(path, "reference", other);
                return None;
            }
        };
        let ty = self.table.descriptor(target);
        if !accepts.admits(ty) {
            trace!(path, found = ty.name(), "dropping reference of incompatible type");
            return None;
        }
        Some(target)
    }

    /// Allocates (or finds) the instance for an inline node and fills it.
    fn materialize(
        &mut self,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Option<ObjectRef> {
        if depth > self.options.max_depth {
            self.too_deep(path);
            return None;
        }
        let ty = self.node_type(map, path)?;
        let handle = self.allocate_typed(node_id(map, ty), ty, path)?;
        self.fill(handle, map, path, depth);
        Some(handle)
    }

    /// Allocation-pass walk over the inline node objects under `map`.
    ///
    /// Every typed inline node carrying an identifier gets its instance now,
    /// so string references to it resolve wherever they appear. Nothing is
    /// reported here: the fill pass revisits the same values and records any
    /// problem once.
    pub(super) fn register_inline(
        &mut self,
        ty: &'static TypeDescriptor,
        map: &Map<String, Value>,
        depth: usize,
    ) {
        for field in ty.fields() {
            let Some(value) = field_value(map, field) else {
                continue;
            };
            match field.shape {
                FieldShape::Reference(_) | FieldShape::Sequence(Element::Reference(_)) => {
                    for item in sequence_items(value) {
                        if let Value::Object(inner) = item {
                            self.register_node(inner, depth + 1);
                        }
                    }
                }
                FieldShape::Nested => {
                    if depth >= self.options.max_depth {
                        continue;
                    }
                    if let (Value::Object(inner), Some(nested)) = (value, nested_type(ty, field)) {
                        self.register_inline(nested, inner, depth + 1);
                    }
                }
                _ => {}
            }
        }
    }

    fn register_node(&mut self, map: &Map<String, Value>, depth: usize) {
        if depth > self.options.max_depth {
            return;
        }
        let Some(ty) = map
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .and_then(|name| self.types.lookup(name))
        else {
            return;
        };
        if let Some(id) = node_id(map, ty) {
            if self.table.lookup(id).is_none() {
                trace!(id, type_name = ty.name(), "allocating inline node");
                self.table.allocate(Some(id), ty);
            }
        }
        self.register_inline(ty, map, depth);
    }

    fn mismatch(&mut self, path: &str, expected: &'static str, found: &Value) {
        self.errors.push(NodeError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: wire_kind(found),
        });
    }

    fn too_deep(&mut self, path: &str) {
        self.errors.push(NodeError::NestingTooDeep {
            path: path.to_string(),
            max: self.options.max_depth,
        });
    }
}

/// Looks a field up under its compact name, then its IRI.
fn field_value<'m>(map: &'m Map<String, Value>, field: &FieldDescriptor) -> Option<&'m Value> {
    map.get(field.name).or_else(|| {
        if field.iri.is_empty() {
            None
        } else {
            map.get(field.iri)
        }
    })
}

/// The record type stored in a nested field of `ty`.
fn nested_type(ty: &TypeDescriptor, field: &FieldDescriptor) -> Option<&'static TypeDescriptor> {
    match ty.instantiate().slot(field.name) {
        Some(Slot::Nested(inner)) => Some(inner.descriptor()),
        _ => None,
    }
}

/// Compacted JSON-LD writes single-element arrays as the bare element.
fn sequence_items(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        Value::Null => &[],
        other => std::slice::from_ref(other),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::codec::{decode_with_options, DecodeOptions};
    use crate::error::DecodeErrors;
    use crate::model::{instantiate, Graph, TypeDescriptor};
    use crate::registry::ContextRegistry;

    const CTX: &str = "urn:test:context";

    #[derive(Debug, Default)]
    struct Dimensions {
        width: Option<f64>,
        height: Option<f64>,
    }

    crate::impl_properties!(Dimensions {
        "width" => Scalar(width),
        "height" => Scalar(height),
    });

    static DIMENSIONS: TypeDescriptor = TypeDescriptor {
        iri: "urn:test:Dimensions",
        compact: "Dimensions",
        id_property: None,
        superclasses: &[],
        fields: &[&[
            FieldDescriptor::scalar("width", "urn:test:width"),
            FieldDescriptor::scalar("height", "urn:test:height"),
        ]],
        new: instantiate::<Dimensions>,
    };

    impl Record for Dimensions {
        fn descriptor(&self) -> &'static TypeDescriptor {
            &DIMENSIONS
        }
    }

    #[derive(Debug, Default)]
    struct Part {
        label: Option<String>,
        count: Option<i64>,
        tags: Vec<String>,
        size: Dimensions,
        parent: Option<ObjectRef>,
        children: Vec<ObjectRef>,
    }

    crate::impl_properties!(Part {
        "label" => Scalar(label),
        "count" => Scalar(count),
        "tags" => Scalars(tags),
        "size" => Nested(size),
        "parent" => Ref(parent),
        "children" => Refs(children),
    });

    static PART: TypeDescriptor = TypeDescriptor {
        iri: "urn:test:Part",
        compact: "Part",
        id_property: Some("partId"),
        superclasses: &[],
        fields: &[&[
            FieldDescriptor::marker("_kind"),
            FieldDescriptor::scalar("label", "urn:test:label"),
            FieldDescriptor::scalar("count", "urn:test:count"),
            FieldDescriptor::scalars("tags", "urn:test:tags"),
            FieldDescriptor::nested("size", "urn:test:size"),
            FieldDescriptor::reference("parent", "urn:test:parent", "Part"),
            FieldDescriptor::references("children", "urn:test:children", "Part"),
            FieldDescriptor::scalar("undeclared", "urn:test:undeclared"),
        ]],
        new: instantiate::<Part>,
    };

    impl Record for Part {
        fn descriptor(&self) -> &'static TypeDescriptor {
            &PART
        }
    }

    #[derive(Debug, Default)]
    struct Note {
        text: Option<String>,
    }

    crate::impl_properties!(Note {
        "text" => Scalar(text),
    });

    static NOTE: TypeDescriptor = TypeDescriptor {
        iri: "urn:test:Note",
        compact: "Note",
        id_property: None,
        superclasses: &[],
        fields: &[&[FieldDescriptor::scalar("text", "urn:test:text")]],
        new: instantiate::<Note>,
    };

    impl Record for Note {
        fn descriptor(&self) -> &'static TypeDescriptor {
            &NOTE
        }
    }

    fn registry() -> ContextRegistry {
        ContextRegistry::new().with_types(CTX, &[&PART, &NOTE])
    }

    fn run(nodes: Value, options: DecodeOptions) -> (Graph, DecodeErrors) {
        let doc = json!({ "@context": CTX, "@graph": nodes });
        let decoded = decode_with_options(&registry(), &doc, &options).unwrap();
        (decoded.graph, decoded.errors)
    }

    fn part<'g>(graph: &'g Graph, id: &str) -> &'g Part {
        graph.get_as::<Part>(graph.lookup(id).unwrap()).unwrap()
    }

    #[test]
    fn test_scalars_and_iri_keys() {
        let (graph, errors) = run(
            json!([{
                "type": "Part",
                "partId": "urn:p",
                "_kind": "ignored",
                "urn:test:label": "by iri",
                "count": 3.0,
                "tags": "single",
            }]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        let p = part(&graph, "urn:p");
        assert_eq!(p.label.as_deref(), Some("by iri"));
        assert_eq!(p.count, Some(3));
        assert_eq!(p.tags, ["single"]);
    }

    #[test]
    fn test_scalar_mismatch_is_recorded() {
        let (graph, errors) = run(
            json!([{
                "type": "Part",
                "partId": "urn:p",
                "label": 7,
                "count": "three",
                "tags": ["a", 1, null, "b"],
            }]),
            DecodeOptions::new(),
        );
        let paths: Vec<String> = errors.iter().map(|e| e.path().to_string()).collect();
        assert_eq!(paths, ["@graph[0].label", "@graph[0].count", "@graph[0].tags[1]"]);
        let p = part(&graph, "urn:p");
        assert_eq!(p.label, None);
        assert_eq!(p.count, None);
        assert_eq!(p.tags, ["a", "b"]);
    }

    #[test]
    fn test_null_leaves_fields_untouched() {
        let (graph, errors) = run(
            json!([
                { "type": "Part", "partId": "urn:p", "label": "kept", "tags": ["x"] },
                { "type": "Part", "partId": "urn:p", "label": null, "tags": [], "parent": null },
            ]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        let p = part(&graph, "urn:p");
        assert_eq!(p.label.as_deref(), Some("kept"));
        assert_eq!(p.tags, ["x"]);
        assert_eq!(graph.roots().len(), 2);
        assert_eq!(graph.roots()[0], graph.roots()[1]);
    }

    #[test]
    fn test_field_without_storage() {
        let (graph, errors) = run(
            json!([{ "type": "Part", "partId": "urn:p", "undeclared": 1, "label": "ok" }]),
            DecodeOptions::new(),
        );
        assert_eq!(
            errors.into_vec(),
            [NodeError::ShapeMismatch {
                path: "@graph[0].undeclared".into(),
                field: "undeclared",
            }]
        );
        assert_eq!(part(&graph, "urn:p").label.as_deref(), Some("ok"));
    }

    #[test]
    fn test_nested_record_is_filled_in_place() {
        let (graph, errors) = run(
            json!([{
                "type": "Part",
                "partId": "urn:p",
                "size": { "width": 2.5, "height": 4 },
            }]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        assert_eq!(graph.len(), 1);
        let p = part(&graph, "urn:p");
        assert_eq!(p.size.width, Some(2.5));
        assert_eq!(p.size.height, Some(4.0));
    }

    #[test]
    fn test_nested_record_rejects_non_object() {
        let (_, errors) = run(
            json!([{ "type": "Part", "partId": "urn:p", "size": [1, 2] }]),
            DecodeOptions::new(),
        );
        assert_eq!(
            errors.into_vec(),
            [NodeError::TypeMismatch {
                path: "@graph[0].size".into(),
                expected: "object",
                found: "array",
            }]
        );
    }

    #[test]
    fn test_references_resolve_forward_and_inline() {
        let (graph, errors) = run(
            json!([
                {
                    "type": "Part",
                    "partId": "urn:root",
                    "children": [
                        "urn:later",
                        null,
                        { "type": "Part", "label": "inline" },
                        { "type": "Note", "text": "not a part" },
                        "urn:missing",
                    ],
                },
                { "type": "Part", "partId": "urn:later", "parent": "urn:root" },
            ]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        let root = graph.lookup("urn:root").unwrap();
        let later = graph.lookup("urn:later").unwrap();
        let children = &part(&graph, "urn:root").children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], later);
        assert_eq!(
            graph.get_as::<Part>(children[1]).unwrap().label.as_deref(),
            Some("inline")
        );
        assert_eq!(part(&graph, "urn:later").parent, Some(root));
        // The inline note is allocated but unreachable from the field.
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.roots(), &[root, later]);
    }

    #[test]
    fn test_inline_ids_are_allocated_up_front() {
        let (graph, errors) = run(
            json!([
                { "type": "Part", "partId": "urn:first", "children": ["urn:deep", "urn:mid"] },
                {
                    "type": "Part",
                    "partId": "urn:second",
                    "parent": {
                        "type": "Part",
                        "partId": "urn:mid",
                        "children": [{ "type": "Part", "partId": "urn:deep", "label": "deep" }],
                    },
                },
            ]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        let mid = graph.lookup("urn:mid").unwrap();
        let deep = graph.lookup("urn:deep").unwrap();
        assert_eq!(part(&graph, "urn:first").children, [deep, mid]);
        assert_eq!(part(&graph, "urn:second").parent, Some(mid));
        assert_eq!(part(&graph, "urn:mid").children, [deep]);
        assert_eq!(part(&graph, "urn:deep").label.as_deref(), Some("deep"));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_inline_ids_beyond_nesting_limit_stay_unallocated() {
        let options = DecodeOptions {
            max_depth: 1,
            ..DecodeOptions::new()
        };
        let (graph, errors) = run(
            json!([
                { "type": "Part", "partId": "urn:first", "parent": "urn:deep" },
                {
                    "type": "Part",
                    "partId": "urn:second",
                    "parent": {
                        "type": "Part",
                        "parent": { "type": "Part", "partId": "urn:deep" },
                    },
                },
            ]),
            options,
        );
        assert_eq!(
            errors.into_vec(),
            [NodeError::NestingTooDeep {
                path: "@graph[1].parent.parent".into(),
                max: 1,
            }]
        );
        assert!(graph.lookup("urn:deep").is_none());
        assert_eq!(part(&graph, "urn:first").parent, None);
    }

    #[test]
    fn test_reference_wire_kind_mismatch() {
        let (graph, errors) = run(
            json!([{ "type": "Part", "partId": "urn:p", "parent": 42, "children": [true] }]),
            DecodeOptions::new(),
        );
        let paths: Vec<&str> = errors.iter().map(NodeError::path).collect();
        assert_eq!(paths, ["@graph[0].parent", "@graph[0].children[0]"]);
        assert_eq!(part(&graph, "urn:p").parent, None);
    }

    #[test]
    fn test_report_unresolved() {
        let nodes = json!([{ "type": "Part", "partId": "urn:p", "parent": "urn:nowhere" }]);
        let (_, errors) = run(nodes.clone(), DecodeOptions::new());
        assert!(errors.is_empty());

        let (graph, errors) = run(nodes, DecodeOptions::strict());
        assert_eq!(
            errors.into_vec(),
            [NodeError::UnresolvedReference {
                path: "@graph[0].parent".into(),
                id: "urn:nowhere".into(),
            }]
        );
        assert_eq!(part(&graph, "urn:p").parent, None);
    }

    #[test]
    fn test_self_reference() {
        let (graph, errors) = run(
            json!([{
                "type": "Part",
                "partId": "urn:loop",
                "parent": { "type": "Part", "partId": "urn:loop", "label": "inner" },
                "children": ["urn:loop"],
            }]),
            DecodeOptions::new(),
        );
        assert!(errors.is_empty());
        let handle = graph.lookup("urn:loop").unwrap();
        let p = part(&graph, "urn:loop");
        assert_eq!(p.parent, Some(handle));
        assert_eq!(p.children, [handle]);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_nesting_limit() {
        let nodes = json!([{
            "type": "Part",
            "partId": "urn:top",
            "parent": {
                "type": "Part",
                "parent": { "type": "Part", "label": "too deep" },
            },
        }]);
        let options = DecodeOptions {
            max_depth: 1,
            ..DecodeOptions::new()
        };
        let (graph, errors) = run(nodes, options);
        assert_eq!(
            errors.into_vec(),
            [NodeError::NestingTooDeep {
                path: "@graph[0].parent.parent".into(),
                max: 1,
            }]
        );
        assert_eq!(graph.len(), 2);
    }
}
