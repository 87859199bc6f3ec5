//! Wire-format keywords and decoding limits.
//!
//! The limits bound the work a single decode can be made to do by an
//! untrusted document. They are the defaults of [`DecodeOptions`].
//!
//! [`DecodeOptions`]: crate::codec::DecodeOptions

/// Root key holding the context identifier.
pub const CONTEXT_KEY: &str = "@context";

/// Root key holding the flat node list.
pub const GRAPH_KEY: &str = "@graph";

/// Node key holding an explicit identifier.
pub const ID_KEY: &str = "@id";

/// Node key holding the type discriminator.
pub const TYPE_KEY: &str = "type";

/// Prefix of document-local (blank) identifiers.
pub const BLANK_PREFIX: &str = "_:";

/// Maximum number of top-level nodes in one `@graph`.
pub const MAX_GRAPH_NODES: usize = 1 << 20;

/// Maximum nesting depth of inline node objects.
///
/// Only inline objects recurse during decoding; references by identifier
/// never do, so this is the only source of stack growth.
pub const MAX_NESTING_DEPTH: usize = 64;
