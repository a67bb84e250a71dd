use proc_macro::TokenStream;

mod bind;

/// Implement `formbind::Bindable` (and `formbind::BindStruct`) for a struct.
///
/// # Container attributes
///
/// - `#[bind(rename_all = "...")]`: rename all fields according to the given case
///   convention (`lowercase`, `UPPERCASE`, `camelCase`, `PascalCase`, `snake_case`,
///   `SCREAMING_SNAKE_CASE`, `kebab-case`).
/// - `#[bind(from_conversion)]`: route leaf assignments through the struct's
///   `formbind::FromConversion` implementation. Required for tuple and unit structs.
///
/// # Field attributes
///
/// - `#[bind(rename = "...")]`: bind the field under a different name.
/// - `#[bind(skip)]`: never bind the field.
/// - `#[bind(filter = "...")]`: apply the named string filter before assignment.
/// - `#[bind(options = "...")]`: set the raw value of the `form_options` tag.
///
/// Only `pub` fields can be bound. Other fields are reported as unsettable and
/// their types don't need to implement `Bindable`.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive_bind(input)
}
