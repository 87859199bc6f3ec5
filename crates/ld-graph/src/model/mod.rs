//! Data model types.
//!
//! This module contains the types a decoded graph is made of:
//! - Identifiers and instance handles
//! - Scalar values and their slot views
//! - Static type and field descriptors
//! - The record capability interface
//! - The graph arena

pub mod descriptor;
pub mod graph;
pub mod id;
pub mod record;
pub mod value;

pub use descriptor::{instantiate, Accepts, Element, FieldDescriptor, FieldShape, TypeDescriptor};
pub use graph::Graph;
pub use id::{blank_id, is_blank, ObjectRef};
pub use record::{Properties, Record, Slot, SlotMut};
pub use value::{wire_kind, DateTime, ScalarKind, ScalarSeq, ScalarSlot, WireScalar};
