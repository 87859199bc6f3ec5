//! Static type and field metadata.
//!
//! Descriptors are what a schema compiler emits alongside each record type.
//! They are declared as `static` items and shared read-only by every decode.

use std::fmt;
use std::ptr;

use crate::model::Record;

/// Which resolved types a reference field admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    /// Any registered type.
    Any,
    /// The named class or any of its subclasses (compact name or IRI).
    Class(&'static str),
}

impl Accepts {
    pub fn admits(&self, ty: &TypeDescriptor) -> bool {
        match self {
            Accepts::Any => true,
            Accepts::Class(class) => ty.is_a(class),
        }
    }
}

/// Element shape of a sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Scalar,
    Reference(Accepts),
}

/// Static shape of one settable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Type-level metadata with no wire form. Never read from or written to
    /// the wire.
    Marker,
    /// A single primitive value.
    Scalar,
    /// An ordered sequence of scalars or references.
    Sequence(Element),
    /// An inline record embedded in the field itself.
    Nested,
    /// A single reference to another instance.
    Reference(Accepts),
}

/// One settable slot on a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Compact wire property name.
    pub name: &'static str,
    /// Full property IRI, accepted on the wire as an alternative key.
    pub iri: &'static str,
    pub shape: FieldShape,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, iri: &'static str, shape: FieldShape) -> Self {
        Self { name, iri, shape }
    }

    pub const fn scalar(name: &'static str, iri: &'static str) -> Self {
        Self::new(name, iri, FieldShape::Scalar)
    }

    pub const fn scalars(name: &'static str, iri: &'static str) -> Self {
        Self::new(name, iri, FieldShape::Sequence(Element::Scalar))
    }

    pub const fn reference(name: &'static str, iri: &'static str, class: &'static str) -> Self {
        Self::new(name, iri, FieldShape::Reference(Accepts::Class(class)))
    }

    pub const fn references(name: &'static str, iri: &'static str, class: &'static str) -> Self {
        Self::new(
            name,
            iri,
            FieldShape::Sequence(Element::Reference(Accepts::Class(class))),
        )
    }

    pub const fn nested(name: &'static str, iri: &'static str) -> Self {
        Self::new(name, iri, FieldShape::Nested)
    }

    pub const fn marker(name: &'static str) -> Self {
        Self::new(name, "", FieldShape::Marker)
    }
}

/// Describes one concrete record type.
pub struct TypeDescriptor {
    /// Canonical type IRI.
    pub iri: &'static str,
    /// Compact alias used as the `type` discriminator in compacted documents.
    pub compact: &'static str,
    /// Property supplying a node's identifier when `@id` is absent.
    pub id_property: Option<&'static str>,
    /// Every ancestor class, by compact name.
    pub superclasses: &'static [&'static str],
    /// Field groups, one per class in the inheritance chain, base first.
    pub fields: &'static [&'static [FieldDescriptor]],
    /// Allocates an empty, zero-valued instance.
    pub new: fn() -> Box<dyn Record>,
}

impl TypeDescriptor {
    /// The compact alias, or the IRI when the type has none.
    pub fn name(&self) -> &'static str {
        if self.compact.is_empty() {
            self.iri
        } else {
            self.compact
        }
    }

    /// Returns true if this type is `class` or one of its subclasses.
    pub fn is_a(&self, class: &str) -> bool {
        self.compact == class || self.iri == class || self.superclasses.contains(&class)
    }

    /// All fields, base class first, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        let groups: &'static [&'static [FieldDescriptor]] = self.fields;
        groups.iter().flat_map(|group| group.iter())
    }

    /// Looks up a field by compact name or IRI.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().find(|f| f.name == name || (!f.iri.is_empty() && f.iri == name))
    }

    pub fn instantiate(&self) -> Box<dyn Record> {
        (self.new)()
    }

    /// Identity comparison; descriptors are unique statics.
    pub fn same(&self, other: &TypeDescriptor) -> bool {
        ptr::eq(self, other)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("iri", &self.iri)
            .field("compact", &self.compact)
            .field("id_property", &self.id_property)
            .finish_non_exhaustive()
    }
}

/// Factory usable as [`TypeDescriptor::new`].
pub fn instantiate<T: Record + Default>() -> Box<dyn Record> {
    Box::<T>::default()
}
