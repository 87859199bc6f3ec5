//! Node identifiers and instance handles.
//!
//! Wire nodes are named by IRIs or by document-local blank identifiers
//! (`_:name`). Decoded instances are addressed by [`ObjectRef`], a handle
//! into the arena of the [`Graph`](crate::model::Graph) that owns them.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::limits::BLANK_PREFIX;

/// Handle to one instance inside a [`Graph`](crate::model::Graph).
///
/// Two handles are equal exactly when they name the same instance of the
/// same graph. Handles carry the tag of the graph that issued them, so a
/// handle from one decode never aliases an instance of another, even when
/// both documents use the same blank identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    graph: u32,
    index: u32,
}

impl ObjectRef {
    pub(crate) fn new(graph: GraphTag, index: usize) -> Self {
        Self {
            graph: graph.0,
            index: index as u32,
        }
    }

    /// Position of the instance in its graph's arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn belongs_to(self, graph: GraphTag) -> bool {
        self.graph == graph.0
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.graph, self.index)
    }
}

/// Process-unique tag distinguishing the arenas of different graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GraphTag(u32);

impl GraphTag {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Returns true if `id` is a document-local blank identifier.
pub fn is_blank(id: &str) -> bool {
    id.starts_with(BLANK_PREFIX)
}

/// Formats the `n`th generated blank identifier (`_:b<n>`).
pub fn blank_id(n: usize) -> String {
    format!("{BLANK_PREFIX}b{n}")
}
