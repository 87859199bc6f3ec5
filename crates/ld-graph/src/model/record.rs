//! The capability interface decoded records implement.
//!
//! Instead of reflecting over struct layouts, every record type exposes its
//! fields by wire property name as tagged [`Slot`]/[`SlotMut`] views. Base
//! classes are plain structs embedded in their subclasses; the generated
//! [`Properties`] impl of a subclass falls back to its bases for names it
//! does not own. [`impl_properties!`](crate::impl_properties) generates these
//! impls.

use std::any::Any;
use std::fmt;

use crate::model::{ObjectRef, ScalarSeq, ScalarSlot, TypeDescriptor};

/// Read view of one field's storage.
pub enum Slot<'a> {
    Scalar(&'a dyn ScalarSlot),
    Scalars(&'a dyn ScalarSeq),
    Ref(&'a Option<ObjectRef>),
    Refs(&'a Vec<ObjectRef>),
    Nested(&'a dyn Record),
}

/// Write view of one field's storage.
pub enum SlotMut<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    Scalars(&'a mut dyn ScalarSeq),
    Ref(&'a mut Option<ObjectRef>),
    Refs(&'a mut Vec<ObjectRef>),
    Nested(&'a mut dyn Record),
}

/// Field access by wire property name.
pub trait Properties {
    fn slot(&self, property: &str) -> Option<Slot<'_>>;

    fn slot_mut(&mut self, property: &str) -> Option<SlotMut<'_>>;
}

/// A concrete record type known to a [`TypeDescriptor`].
pub trait Record: Properties + Any + fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &'static TypeDescriptor;
}

impl dyn Record {
    pub fn is<T: Record>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Record>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

/// Implements [`Properties`] for a struct from a property table.
///
/// ```ignore
/// impl_properties!(Package {
///     "software_packageVersion" => Scalar(package_version),
///     "originatedBy" => Refs(artifact.originated_by),
/// } extends element);
/// ```
///
/// Variants name the [`Slot`] kind; field paths may reach into embedded
/// structs. Names not in the table are looked up in each `extends` base in
/// order.
#[macro_export]
macro_rules! impl_properties {
    (
        $ty:ty {
            $($property:literal => $variant:ident($($field:ident).+)),* $(,)?
        }
        $(extends $($base:ident),+)?
    ) => {
        impl $crate::model::Properties for $ty {
            fn slot(&self, property: &str) -> ::core::option::Option<$crate::model::Slot<'_>> {
                match property {
                    $($property => ::core::option::Option::Some(
                        $crate::model::Slot::$variant(&self.$($field).+)
                    ),)*
                    _ => {
                        $($(
                            if let ::core::option::Option::Some(slot) =
                                $crate::model::Properties::slot(&self.$base, property)
                            {
                                return ::core::option::Option::Some(slot);
                            }
                        )+)?
                        ::core::option::Option::None
                    }
                }
            }

            fn slot_mut(
                &mut self,
                property: &str,
            ) -> ::core::option::Option<$crate::model::SlotMut<'_>> {
                match property {
                    $($property => ::core::option::Option::Some(
                        $crate::model::SlotMut::$variant(&mut self.$($field).+)
                    ),)*
                    _ => {
                        $($(
                            if let ::core::option::Option::Some(slot) =
                                $crate::model::Properties::slot_mut(&mut self.$base, property)
                            {
                                return ::core::option::Option::Some(slot);
                            }
                        )+)?
                        ::core::option::Option::None
                    }
                }
            }
        }
    };
}
