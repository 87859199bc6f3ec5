//! Context and type registries.
//!
//! A [`ContextRegistry`] binds context identifiers (the `@context` string of
//! a document) to the [`TypeRegistry`] of types legal in documents declaring
//! that context. Registries are built once, typically in a `lazy_static`,
//! and are read-only afterwards: every mutating method takes `&mut self`.

use std::io::Read;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::codec::{decode_with_options, DecodeOptions, Decoded};
use crate::error::DecodeError;
use crate::model::TypeDescriptor;

/// Types legal within one context, indexed by discriminator.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    by_name: FxHashMap<&'static str, &'static TypeDescriptor>,
    types: Vec<&'static TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type under its IRI and compact alias. Registering the same
    /// descriptor again is a no-op.
    pub fn register(&mut self, ty: &'static TypeDescriptor) {
        if self.types.iter().any(|t| t.same(ty)) {
            return;
        }
        for name in [ty.iri, ty.compact] {
            if !name.is_empty() {
                self.by_name.insert(name, ty);
            }
        }
        self.types.push(ty);
    }

    /// Looks up a discriminator (case-sensitive, exact match).
    pub fn lookup(&self, discriminator: &str) -> Option<&'static TypeDescriptor> {
        self.by_name.get(discriminator).copied()
    }

    /// Registered types in registration order.
    pub fn types(&self) -> &[&'static TypeDescriptor] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Context identifier → type registry bindings.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: FxHashMap<String, TypeRegistry>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds types to a context. Later registrations for the same context
    /// accumulate.
    pub fn register(
        &mut self,
        context: impl Into<String>,
        types: &[&'static TypeDescriptor],
    ) -> &mut Self {
        let registry = self.contexts.entry(context.into()).or_default();
        for &ty in types {
            registry.register(ty);
        }
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_types(mut self, context: impl Into<String>, types: &[&'static TypeDescriptor]) -> Self {
        self.register(context, types);
        self
    }

    pub fn resolve(&self, context: &str) -> Option<&TypeRegistry> {
        self.contexts.get(context)
    }

    /// Registered context identifiers, in no particular order.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Decodes a parsed document with default options.
    pub fn decode(&self, document: &Value) -> Result<Decoded, DecodeError> {
        decode_with_options(self, document, &DecodeOptions::default())
    }

    pub fn decode_with_options(
        &self,
        document: &Value,
        options: &DecodeOptions,
    ) -> Result<Decoded, DecodeError> {
        decode_with_options(self, document, options)
    }

    /// Parses JSON text, then decodes it.
    pub fn decode_str(&self, json: &str) -> Result<Decoded, DecodeError> {
        let document: Value = serde_json::from_str(json)?;
        self.decode(&document)
    }

    /// Reads and parses JSON, then decodes it.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Decoded, DecodeError> {
        let document: Value = serde_json::from_reader(reader)?;
        self.decode(&document)
    }
}
