//! The decoded object graph.
//!
//! A [`Graph`] owns every instance produced by one decode in an arena.
//! Cross-references between instances are [`ObjectRef`] handles into that
//! arena, which is what lets cyclic and shared structures be represented
//! without reference counting.

use rustc_hash::FxHashMap;

use crate::model::id::GraphTag;
use crate::model::{ObjectRef, Record};

struct Object {
    id: Option<String>,
    record: Box<dyn Record>,
}

/// A typed, cross-referenced graph of records.
pub struct Graph {
    tag: GraphTag,
    context: String,
    objects: Vec<Object>,
    index: FxHashMap<String, ObjectRef>,
    roots: Vec<ObjectRef>,
}

impl Graph {
    /// Creates an empty graph for the given context identifier.
    pub fn new(context: impl Into<String>) -> Self {
        Self::with_tag(GraphTag::next(), context.into())
    }

    pub(crate) fn with_tag(tag: GraphTag, context: String) -> Self {
        Self {
            tag,
            context,
            objects: Vec::new(),
            index: FxHashMap::default(),
            roots: Vec::new(),
        }
    }

    /// The context identifier the graph was decoded under.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Adds an instance and returns its handle.
    ///
    /// If `id` already names an instance, that instance's record is replaced
    /// and its existing handle is returned, so references to it stay valid.
    pub fn insert(&mut self, id: Option<String>, record: Box<dyn Record>) -> ObjectRef {
        if let Some(existing) = id.as_deref().and_then(|id| self.index.get(id).copied()) {
            self.objects[existing.index()].record = record;
            return existing;
        }
        let handle = ObjectRef::new(self.tag, self.objects.len());
        if let Some(id) = &id {
            self.index.insert(id.clone(), handle);
        }
        self.objects.push(Object { id, record });
        handle
    }

    /// Appends a top-level instance.
    pub fn push_root(&mut self, handle: ObjectRef) {
        self.roots.push(handle);
    }

    /// Top-level instances in document order.
    pub fn roots(&self) -> &[ObjectRef] {
        &self.roots
    }

    fn object(&self, handle: ObjectRef) -> Option<&Object> {
        if !handle.belongs_to(self.tag) {
            return None;
        }
        self.objects.get(handle.index())
    }

    pub fn get(&self, handle: ObjectRef) -> Option<&(dyn Record + 'static)> {
        self.object(handle).map(|o| o.record.as_ref())
    }

    pub fn get_mut(&mut self, handle: ObjectRef) -> Option<&mut (dyn Record + 'static)> {
        if !handle.belongs_to(self.tag) {
            return None;
        }
        self.objects
            .get_mut(handle.index())
            .map(|o| o.record.as_mut())
    }

    /// Returns the instance if it is of type `T`.
    pub fn get_as<T: Record>(&self, handle: ObjectRef) -> Option<&T> {
        self.get(handle)?.downcast_ref::<T>()
    }

    /// Resolves an identifier (IRI or blank) to its instance.
    pub fn lookup(&self, id: &str) -> Option<ObjectRef> {
        self.index.get(id).copied()
    }

    /// The identifier of an instance; `None` for anonymous instances.
    pub fn id_of(&self, handle: ObjectRef) -> Option<&str> {
        self.object(handle)?.id.as_deref()
    }

    /// All instances in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &(dyn Record + 'static))> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectRef::new(self.tag, i), o.record.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("context", &self.context)
            .field("objects", &self.objects.len())
            .field("roots", &self.roots)
            .finish()
    }
}
