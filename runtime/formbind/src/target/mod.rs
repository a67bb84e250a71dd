//! The types that form values can be bound to.
//!
//! # Overview
//!
//! Every bindable type implements [`Bindable`]. The trait plays two roles:
//!
//! 1. It lets the [resolver](crate::resolve) walk nested structs, via
//!    [`Bindable::as_struct_mut`] and [`Bindable::as_pointer_mut`].
//! 2. It is the coercion engine for leaves: [`Bindable::assign`] converts the raw
//!    values received for a key into the concrete type, reporting any failure to the
//!    [`Leaf`]'s sink.
//!
//! Implementations are provided for text, booleans, integers, floats,
//! [`jiff::Timestamp`], `Option<T>`, `Box<T>`, `Vec<T>` and `[T; N]`.
//! Structs get theirs from `#[derive(Bind)]`.
use std::fmt;

use crate::coerce::Leaf;
use crate::errors::FieldError;

mod pointer;
mod scalar;
mod sequence;
mod time;

pub use time::TIMESTAMP_FORMATS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The broad category a bindable type belongs to.
pub enum Kind {
    String,
    Bool,
    Int,
    Uint,
    Float,
    Struct,
    Timestamp,
    /// A nilable indirection, i.e. `Option<T>`.
    Pointer,
    Slice,
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Struct => "struct",
            Kind::Timestamp => "timestamp",
            Kind::Pointer => "pointer",
            Kind::Slice => "slice",
            Kind::Array => "array",
        };
        f.write_str(s)
    }
}

/// A value that can be populated from raw form values.
pub trait Bindable {
    fn kind(&self) -> Kind;

    /// The name used to refer to this type in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Expose the fields of this value, if it is a struct.
    fn as_struct_mut(&mut self) -> Option<&mut dyn BindStruct> {
        None
    }

    /// Expose the pointee of this value, if it is a nilable indirection.
    fn as_pointer_mut(&mut self) -> Option<&mut dyn BindPointer> {
        None
    }

    /// Convert `values` and store the result in `self`.
    ///
    /// Failures are reported through `leaf` and leave `self` unchanged.
    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        leaf.report(
            values.first().map(String::as_str),
            FieldError::Unsupported {
                type_name: self.type_name(),
            },
        );
    }

    /// Convert a single value, as an element of a sequence.
    ///
    /// Only scalars (text, booleans and numbers) are valid sequence elements.
    fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
        let _ = raw;
        Err(FieldError::UnsupportedElement {
            type_name: self.type_name(),
        })
    }
}

/// A struct whose fields can be looked up by name.
///
/// Implemented by `#[derive(Bind)]`.
pub trait BindStruct {
    /// The name of the struct, e.g. `User`.
    fn struct_name(&self) -> &'static str;

    /// The descriptors of all the fields of this struct, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Look up a field by its (normalized) bound name.
    fn field_mut(&mut self, name: &str) -> FieldLookup<'_>;
}

/// A nilable indirection that can allocate its target on demand.
pub trait BindPointer {
    /// Return the pointee, allocating a default value first if there is none.
    fn get_or_alloc(&mut self) -> &mut dyn Bindable;

    /// Whether there is a pointee.
    fn is_allocated(&self) -> bool;

    /// Drop the pointee, if any.
    fn release(&mut self);
}

/// The outcome of [`BindStruct::field_mut`].
pub enum FieldLookup<'a> {
    /// The field exists and can be bound.
    Settable {
        value: &'a mut dyn Bindable,
        descriptor: &'static FieldDescriptor,
    },
    /// The field exists, but it isn't public or it is skipped.
    Unsettable { descriptor: &'static FieldDescriptor },
    /// There is no field with that name.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static metadata about a struct field.
pub struct FieldDescriptor {
    name: &'static str,
    ident: &'static str,
    settable: bool,
    tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        ident: &'static str,
        settable: bool,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            ident,
            settable,
            tags,
        }
    }

    /// The name the field is bound under, after renaming and normalization.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The Rust identifier of the field.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Whether the field is public and not skipped.
    pub fn is_settable(&self) -> bool {
        self.settable
    }

    /// The value of the annotation tag called `name`, if any.
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, value)| *value)
    }
}
