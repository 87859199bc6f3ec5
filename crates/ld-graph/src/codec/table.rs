//! Per-decode instance table.
//!
//! The table is the arena a decode allocates into. Every identifier gets at
//! most one slot, so all references to it resolve to the same instance no
//! matter where they appear relative to its definition. When the decode
//! finishes the table becomes the returned [`Graph`].

use rustc_hash::FxHashMap;

use crate::model::id::GraphTag;
use crate::model::{Graph, ObjectRef, Record, TypeDescriptor};

struct Entry {
    id: Option<String>,
    descriptor: &'static TypeDescriptor,
    /// `None` while the record is checked out for filling.
    record: Option<Box<dyn Record>>,
}

pub(crate) struct InstanceTable {
    tag: GraphTag,
    entries: Vec<Entry>,
    index: FxHashMap<String, ObjectRef>,
}

impl InstanceTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: GraphTag::next(),
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub(crate) fn lookup(&self, id: &str) -> Option<ObjectRef> {
        self.index.get(id).copied()
    }

    /// Type of an allocated slot; stays available while the record is
    /// checked out.
    pub(crate) fn descriptor(&self, handle: ObjectRef) -> &'static TypeDescriptor {
        self.entries[handle.index()].descriptor
    }

    /// Allocates an empty instance. Identified slots are indexed; anonymous
    /// ones are reachable only through the returned handle.
    pub(crate) fn allocate(&mut self, id: Option<&str>, ty: &'static TypeDescriptor) -> ObjectRef {
        let handle = ObjectRef::new(self.tag, self.entries.len());
        if let Some(id) = id {
            self.index.insert(id.to_string(), handle);
        }
        self.entries.push(Entry {
            id: id.map(str::to_string),
            descriptor: ty,
            record: Some(ty.instantiate()),
        });
        handle
    }

    /// Takes the record out for filling. Returns `None` if it is already
    /// checked out, i.e. the node is being filled further up the stack.
    pub(crate) fn checkout(&mut self, handle: ObjectRef) -> Option<Box<dyn Record>> {
        self.entries[handle.index()].record.take()
    }

    pub(crate) fn restore(&mut self, handle: ObjectRef, record: Box<dyn Record>) {
        self.entries[handle.index()].record = Some(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_graph(self, context: String, roots: Vec<ObjectRef>) -> Graph {
        let mut graph = Graph::with_tag(self.tag, context);
        for entry in self.entries {
            let record = entry.record.unwrap_or_else(|| entry.descriptor.instantiate());
            graph.insert(entry.id, record);
        }
        for root in roots {
            graph.push_root(root);
        }
        graph
    }
}
