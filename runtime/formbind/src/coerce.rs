//! The per-leaf context handed to [`Bindable::assign`].
use std::borrow::Cow;

use crate::conversion::FromConversion;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::errors::FieldError;
use crate::target::Bindable;

/// A named string transformation, applied to text leaves before assignment.
pub type FilterFn = dyn Fn(&str) -> String + Send + Sync;

/// Everything a [`Bindable`] needs to know about the key it is being bound from.
///
/// It carries the original form key, the string filter configured on the field (if any)
/// and the sink that receives field-level problems.
pub struct Leaf<'a> {
    key: &'a str,
    filter: Option<&'a FilterFn>,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Leaf<'a> {
    pub fn new(key: &'a str, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            key,
            filter: None,
            sink,
        }
    }

    /// Set the filter to apply to text values.
    pub fn with_filter(mut self, filter: Option<&'a FilterFn>) -> Self {
        self.filter = filter;
        self
    }

    /// The flat form key being bound.
    pub fn key(&self) -> &str {
        self.key
    }

    /// Run the configured filter on `raw`, if there is one.
    pub fn apply_filter<'v>(&self, raw: &'v str) -> Cow<'v, str> {
        match self.filter {
            Some(filter) => Cow::Owned(filter(raw)),
            None => Cow::Borrowed(raw),
        }
    }

    /// Report a problem with this leaf.
    pub fn report(&self, value: Option<&str>, error: impl Into<FieldError>) {
        let mut diagnostic = Diagnostic::new(self.key, error);
        if let Some(value) = value {
            diagnostic = diagnostic.with_value(value);
        }
        self.sink.warn(diagnostic);
    }

    /// Report a problem with the element at `index` of a sequence leaf.
    pub fn report_element(&self, index: usize, raw: &str, error: impl Into<FieldError>) {
        self.sink.warn(
            Diagnostic::new(self.key, error)
                .with_value(raw)
                .with_index(index),
        );
    }

    /// Assign the first raw value with the scalar rule of `target`.
    ///
    /// On failure, the problem is reported and `target` is left unchanged.
    pub fn assign_first<T>(&self, target: &mut T, values: &[String])
    where
        T: Bindable + ?Sized,
    {
        let Some(first) = values.first() else {
            return;
        };
        if let Err(e) = target.assign_element(first) {
            self.report(Some(first), e);
        }
    }

    /// Hand the first raw value over to a [`FromConversion`] implementation.
    pub fn convert<T>(&self, target: &mut T, type_name: &'static str, values: &[String])
    where
        T: FromConversion + ?Sized,
    {
        let Some(first) = values.first() else {
            return;
        };
        if let Err(source) = target.from_string(first) {
            self.report(Some(first), FieldError::Conversion { type_name, source });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Leaf;
    use crate::conversion::{BoxError, FromConversion};
    use crate::diagnostic::CollectingSink;
    use crate::errors::FieldError;

    fn values(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Default)]
    struct Celsius(f64);

    impl FromConversion for Celsius {
        fn from_string(&mut self, content: &str) -> Result<(), BoxError> {
            let degrees = content
                .strip_suffix("C")
                .ok_or("missing the `C` unit suffix")?;
            self.0 = degrees.parse()?;
            Ok(())
        }
    }

    #[test]
    fn filter_is_applied() {
        let sink = CollectingSink::new();
        let upper = |s: &str| s.to_uppercase();
        let leaf = Leaf::new("name", &sink).with_filter(Some(&upper));
        assert_eq!(leaf.apply_filter("ada"), "ADA");
        assert_eq!(Leaf::new("name", &sink).apply_filter("ada"), "ada");
    }

    #[test]
    fn conversion_failures_are_reported() {
        let sink = CollectingSink::new();
        let leaf = Leaf::new("temperature", &sink);

        let mut t = Celsius::default();
        leaf.convert(&mut t, "Celsius", &values(&["21.5C", "30C"]));
        assert_eq!(t.0, 21.5);
        assert!(sink.is_empty());

        leaf.convert(&mut t, "Celsius", &values(&["hot"]));
        assert_eq!(t.0, 21.5);
        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].value.as_deref(), Some("hot"));
        assert!(matches!(
            diagnostics[0].error,
            FieldError::Conversion {
                type_name: "Celsius",
                ..
            }
        ));
    }

    #[test]
    fn scalar_failures_leave_the_target_unchanged() {
        let sink = CollectingSink::new();
        let leaf = Leaf::new("age", &sink);
        let mut age: i8 = 7;
        leaf.assign_first(&mut age, &values(&["300"]));
        assert_eq!(age, 7);
        let diagnostics = sink.take();
        insta::assert_snapshot!(diagnostics[0], @r#"`age` = "300": Failed to parse the value as `i8`"#);
    }
}
