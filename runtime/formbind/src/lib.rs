//! # formbind
//!
//! Bind flat request fields (`user[address][city]=London`) onto nested,
//! statically-typed Rust structs.
//!
//! The entrypoint is [`Binder`]. Targets implement [`Bindable`], usually through
//! `#[derive(Bind)]`:
//!
//! ```rust
//! use formbind::{Bind, Binder, CollectingSink};
//! use formbind::request::FormValues;
//!
//! #[derive(Bind, Default)]
//! pub struct Signup {
//!     pub email: String,
//!     pub newsletter: bool,
//!     pub interests: Vec<String>,
//! }
//!
//! let form = FormValues::parse(
//!     b"email=ada%40example.com&newsletter=1&interests[]=math&interests[]=poetry",
//! );
//! let sink = CollectingSink::new();
//! let binder = Binder::builder().sink(&sink).build();
//!
//! let mut signup = Signup::default();
//! binder.bind_values(&form, &mut signup);
//!
//! assert_eq!(signup.email, "ada@example.com");
//! assert!(signup.newsletter);
//! assert_eq!(signup.interests, ["math", "poetry"]);
//! ```
//!
//! Binding is best-effort: keys that can't be bound are reported to a
//! [`DiagnosticSink`] and skipped.

// Lets the code generated by `#[derive(Bind)]` refer to `::formbind` from within this crate.
extern crate self as formbind;

pub use binder::{Binder, BinderBuilder};
pub use coerce::Leaf;
pub use conversion::{BoxError, FromConversion, ToConversion};
pub use diagnostic::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use errors::{BindError, BindErrorKind, FieldError};
pub use formbind_macros::Bind;
pub use target::{BindPointer, BindStruct, Bindable, FieldDescriptor, FieldLookup, Kind};

mod binder;
mod coerce;
pub mod config;
pub mod content_type;
mod conversion;
mod diagnostic;
pub mod errors;
pub mod filter;
pub mod key;
pub mod request;
mod resolve;
pub mod tags;
pub mod target;
