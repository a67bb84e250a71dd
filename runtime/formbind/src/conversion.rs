//! Opt-in capabilities for types that know how to convert themselves from,
//! or render themselves to, a single form value.

/// A type-erased error, returned by [`FromConversion::from_string`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type that can be populated from a single raw form value.
///
/// Structs deriving [`Bind`](crate::Bind) with `#[bind(from_conversion)]` route leaf
/// assignments through this trait. Without it, assigning a raw value to a struct
/// field is reported as a [`FieldError::NoConversion`](crate::FieldError::NoConversion).
///
/// ```rust
/// use formbind::{Bind, BoxError, FromConversion};
///
/// #[derive(Bind, Default)]
/// #[bind(from_conversion)]
/// pub struct Cents(u64);
///
/// impl FromConversion for Cents {
///     fn from_string(&mut self, content: &str) -> Result<(), BoxError> {
///         let (units, cents) = content.split_once('.').unwrap_or((content, "0"));
///         self.0 = units.parse::<u64>()? * 100 + cents.parse::<u64>()?;
///         Ok(())
///     }
/// }
/// ```
pub trait FromConversion {
    /// Overwrite `self` with the value represented by `content`.
    fn from_string(&mut self, content: &str) -> Result<(), BoxError>;
}

/// A type that can render itself as a single form value.
///
/// The binder never calls it; it is the counterpart of [`FromConversion`] for
/// code that renders bound values back into forms or templates.
pub trait ToConversion {
    fn to_form_string(&self) -> String;
}
