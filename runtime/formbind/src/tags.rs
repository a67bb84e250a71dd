//! Per-field binding policy.
//!
//! Two tags are consulted while binding:
//!
//! - [`OPT_OUT_TAG`] (`form_options`): a value of [`OPT_OUT`] (`-`) prevents the field
//!   from being bound, silently;
//! - [`FILTER_TAG`] (`form_filter`): the name of a [filter](crate::filter::FilterRegistry)
//!   to run on text values before they are assigned.
//!
//! By default, tags come from `#[bind(...)]` annotations (see [`AnnotationTags`]).
//! [`TagOverrides`] lets you set or replace them at runtime.
use crate::target::FieldDescriptor;

/// The tag that marks a field as excluded from binding.
pub const OPT_OUT_TAG: &str = "form_options";
/// The tag that names the filter to apply to a text field.
pub const FILTER_TAG: &str = "form_filter";
/// The value of [`OPT_OUT_TAG`] that excludes a field.
pub const OPT_OUT: &str = "-";

/// Look up the value of a tag on a struct field.
pub trait TagInspector: Send + Sync {
    /// The value of `tag` on `field`, a field of the struct called `container`.
    fn tag_value<'a>(
        &'a self,
        container: &'static str,
        field: &'a FieldDescriptor,
        tag: &str,
    ) -> Option<&'a str>;
}

#[derive(Debug, Default, Clone, Copy)]
/// Read tags from the `#[bind(...)]` annotations captured by `#[derive(Bind)]`.
///
/// `#[bind(skip)]` and `#[bind(options = "...")]` populate `form_options`,
/// `#[bind(filter = "...")]` populates `form_filter`.
pub struct AnnotationTags;

impl TagInspector for AnnotationTags {
    fn tag_value<'a>(
        &'a self,
        _container: &'static str,
        field: &'a FieldDescriptor,
        tag: &str,
    ) -> Option<&'a str> {
        field.tag(tag)
    }
}

#[derive(Debug, Default, Clone)]
/// Tag values set at runtime, layered on top of the field annotations.
///
/// ```rust
/// use formbind::tags::{TagOverrides, OPT_OUT, OPT_OUT_TAG};
///
/// // Never bind `User::is_admin`, whatever its annotations say.
/// let tags = TagOverrides::new().set("User", "is_admin", OPT_OUT_TAG, OPT_OUT);
/// ```
pub struct TagOverrides {
    overrides: Vec<TagOverride>,
}

#[derive(Debug, Clone)]
struct TagOverride {
    container: String,
    field: String,
    tag: String,
    value: String,
}

impl TagOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `tag` to `value` on the field of `container` whose identifier
    /// (or bound name) is `field`.
    ///
    /// Later calls take precedence over earlier ones.
    pub fn set(
        mut self,
        container: impl Into<String>,
        field: impl Into<String>,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.overrides.push(TagOverride {
            container: container.into(),
            field: field.into(),
            tag: tag.into(),
            value: value.into(),
        });
        self
    }
}

impl TagInspector for TagOverrides {
    fn tag_value<'a>(
        &'a self,
        container: &'static str,
        field: &'a FieldDescriptor,
        tag: &str,
    ) -> Option<&'a str> {
        self.overrides
            .iter()
            .rev()
            .find(|o| {
                o.container == container
                    && (o.field == field.ident() || o.field == field.name())
                    && o.tag == tag
            })
            .map(|o| o.value.as_str())
            .or_else(|| field.tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnotationTags, FILTER_TAG, OPT_OUT, OPT_OUT_TAG, TagInspector, TagOverrides};
    use crate::target::FieldDescriptor;

    static BIO: FieldDescriptor =
        FieldDescriptor::new("bio", "bio", true, &[(FILTER_TAG, "html")]);

    #[test]
    fn annotations() {
        assert_eq!(
            AnnotationTags.tag_value("User", &BIO, FILTER_TAG),
            Some("html")
        );
        assert_eq!(AnnotationTags.tag_value("User", &BIO, OPT_OUT_TAG), None);
    }

    #[test]
    fn overrides_take_precedence() {
        let tags = TagOverrides::new()
            .set("User", "bio", OPT_OUT_TAG, OPT_OUT)
            .set("User", "bio", FILTER_TAG, "markdown")
            .set("Post", "bio", FILTER_TAG, "plain");
        assert_eq!(tags.tag_value("User", &BIO, OPT_OUT_TAG), Some(OPT_OUT));
        assert_eq!(tags.tag_value("User", &BIO, FILTER_TAG), Some("markdown"));
        // Other containers fall back to the annotations.
        assert_eq!(tags.tag_value("Author", &BIO, FILTER_TAG), Some("html"));
    }
}
