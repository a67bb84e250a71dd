use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::coerce::Leaf;
use crate::config::BinderConfig;
use crate::content_type::Strategy;
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::errors::{BindError, JsonDeserializationError, MissingBody, XmlDeserializationError};
use crate::filter::FilterRegistry;
use crate::key::{FieldPath, is_reserved};
use crate::request::{BindRequest, FormValues};
use crate::resolve::Resolver;
use crate::tags::{AnnotationTags, TagInspector};
use crate::target::Bindable;

#[derive(Debug, Clone)]
/// Populate statically-typed targets from request data.
///
/// # Strategies
///
/// The `Content-Type` of the request determines how it is bound:
///
/// - `application/json` (and `application/*+json`): the body is decoded as a JSON document
///   and replaces the target;
/// - `application/xml`, `text/xml` (and `application/*+xml`): same, for XML documents;
/// - `application/x-www-form-urlencoded`: the form fields of the request are bound
///   key by key, see [`Binder::bind_values`];
/// - `multipart/form-data`: the value parts of the multipart payload are merged over
///   the form fields, then bound key by key.
///
/// Any other content type is rejected.
///
/// # Structured bodies
///
/// JSON and XML documents are decoded into a new value, which then replaces the target.
/// They are not merged into it: fields missing from the document are not kept from
/// the current target. A document that lacks a field without a `serde` default is
/// rejected with a [`BindError`] and the target is left untouched. Add
/// `#[serde(default)]` to the target to accept partial documents.
///
/// # Form keys
///
/// Keys address nested fields with dots (`user.address.city`) or brackets
/// (`user[address][city]`). Binding is best-effort: a key that can't be bound is
/// reported to the [`DiagnosticSink`] and skipped, the other keys are bound regardless.
///
/// # Example
///
/// ```rust
/// use formbind::{Bind, Binder, CollectingSink};
/// use formbind::request::IncomingRequest;
///
/// #[derive(Bind, Default, serde::Deserialize)]
/// pub struct User {
///     pub name: String,
///     pub age: u8,
///     pub address: Option<Address>,
/// }
///
/// #[derive(Bind, Default, serde::Deserialize)]
/// pub struct Address {
///     pub city: String,
/// }
///
/// let sink = CollectingSink::new();
/// let binder = Binder::builder().sink(&sink).build();
///
/// let mut request = IncomingRequest::urlencoded("name=Ada&age=36&address[city]=London");
/// let mut user = User::default();
/// binder.bind(&mut request, &mut user).unwrap();
///
/// assert_eq!(user.name, "Ada");
/// assert_eq!(user.age, 36);
/// assert_eq!(user.address.unwrap().city, "London");
/// assert!(sink.is_empty());
/// ```
pub struct Binder<I = AnnotationTags, S = TracingSink> {
    config: BinderConfig,
    tags: I,
    sink: S,
    filters: FilterRegistry,
}

impl Binder {
    /// A binder with the default configuration, annotation-based tags and the
    /// [`TracingSink`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> BinderBuilder {
        BinderBuilder::new()
    }
}

impl Default for Binder {
    fn default() -> Self {
        BinderBuilder::new().build()
    }
}

impl<I, S> Binder<I, S>
where
    I: TagInspector,
    S: DiagnosticSink,
{
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Bind the data of `request` to `target`.
    ///
    /// An error is returned only if the request can't be bound at all: see [`BindError`].
    /// Problems with individual form keys are reported to the sink and don't
    /// cause `bind` to fail.
    pub fn bind<R, T>(&self, request: &mut R, target: &mut T) -> Result<(), BindError>
    where
        R: BindRequest + ?Sized,
        T: Bindable + DeserializeOwned,
    {
        self.bind_with(request, target, None)
    }

    /// Like [`Binder::bind`], but form keys are bound only if their first segment is
    /// `name`, with that segment removed.
    ///
    /// `user[name]=Ada&user[age]=36&token=x`, bound with `name = "user"`, sets
    /// `target.name` and `target.age`. `token` is ignored.
    /// JSON and XML bodies are decoded as a whole, regardless of `name`.
    pub fn bind_named<R, T>(
        &self,
        request: &mut R,
        target: &mut T,
        name: &str,
    ) -> Result<(), BindError>
    where
        R: BindRequest + ?Sized,
        T: Bindable + DeserializeOwned,
    {
        self.bind_with(request, target, Some(name))
    }

    fn bind_with<R, T>(
        &self,
        request: &mut R,
        target: &mut T,
        prefix: Option<&str>,
    ) -> Result<(), BindError>
    where
        R: BindRequest + ?Sized,
        T: Bindable + DeserializeOwned,
    {
        let Some(body) = request.take_body() else {
            return Err(MissingBody.into());
        };
        let strategy = Strategy::detect(request.headers())?;

        let span = tracing::debug_span!(
            "Binding request data",
            form.strategy = %strategy,
            form.target = target.type_name(),
        );
        let _guard = span.enter();

        match strategy {
            Strategy::Json => {
                let bytes = body.buffer(request.headers(), self.config.body_size_limit)?;
                let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
                let decoded = serde_path_to_error::deserialize(&mut deserializer)
                    .map_err(|source| JsonDeserializationError { source })?;
                *target = decoded;
            }
            Strategy::Xml => {
                let bytes = body.buffer(request.headers(), self.config.body_size_limit)?;
                let decoded = quick_xml::de::from_reader(bytes.as_ref())
                    .map_err(|source| XmlDeserializationError { source })?;
                *target = decoded;
            }
            Strategy::UrlEncoded => {
                self.bind_form(request.form(), target, prefix);
            }
            Strategy::Multipart => {
                let values = match request.multipart_form() {
                    Some(multipart) => {
                        let mut merged = request.form().clone();
                        merged.merge(&multipart.values);
                        Cow::Owned(merged)
                    }
                    None => Cow::Borrowed(request.form()),
                };
                self.bind_form(&values, target, prefix);
            }
        }
        Ok(())
    }

    /// Bind every key of `values` to `target`.
    ///
    /// This never fails: keys that can't be bound are reported to the sink and skipped.
    pub fn bind_values<T>(&self, values: &FormValues, target: &mut T)
    where
        T: Bindable,
    {
        self.bind_form(values, target, None)
    }

    /// Bind the keys of `values` whose first segment is `name`, with that segment removed.
    pub fn bind_values_named<T>(&self, values: &FormValues, target: &mut T, name: &str)
    where
        T: Bindable,
    {
        self.bind_form(values, target, Some(name))
    }

    fn bind_form<T>(&self, values: &FormValues, target: &mut T, prefix: Option<&str>)
    where
        T: Bindable,
    {
        for (key, raw) in values {
            self.bind_key(key, raw, target, prefix);
        }
    }

    fn bind_key<T>(&self, key: &str, raw: &[String], target: &mut T, prefix: Option<&str>)
    where
        T: Bindable,
    {
        if is_reserved(key, &self.config.reserved_prefix) {
            return;
        }
        let path = match FieldPath::parse(key) {
            Ok(path) => path,
            Err(e) => {
                self.sink.warn(Diagnostic::new(key, e));
                return;
            }
        };
        let path = match prefix {
            Some(prefix) => match path.strip_prefix(prefix) {
                Some(path) => path,
                None => return,
            },
            None => path,
        };

        let resolver = Resolver {
            key,
            tags: &self.tags,
            sink: &self.sink,
            opt_out_tag: &self.config.opt_out_tag,
        };
        resolver.resolve(target, &path, |field| {
            let filter = self
                .tags
                .tag_value(field.container, field.descriptor, &self.config.filter_tag)
                .and_then(|name| self.filters.get(name));
            let leaf = Leaf::new(key, &self.sink).with_filter(filter.map(|f| &**f));
            field.value.assign(raw, &leaf);
        });
    }
}

#[derive(Debug, Clone, Default)]
/// Assemble a [`Binder`].
pub struct BinderBuilder<I = AnnotationTags, S = TracingSink> {
    config: BinderConfig,
    tags: I,
    sink: S,
    filters: FilterRegistry,
}

impl BinderBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I, S> BinderBuilder<I, S> {
    pub fn config(mut self, config: BinderConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a named string filter, replacing any filter with the same name.
    pub fn filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.register(name, filter);
        self
    }

    pub fn filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    /// Replace the source of field tags.
    pub fn tag_inspector<J>(self, tags: J) -> BinderBuilder<J, S>
    where
        J: TagInspector,
    {
        BinderBuilder {
            config: self.config,
            tags,
            sink: self.sink,
            filters: self.filters,
        }
    }

    /// Replace the destination of field-level diagnostics.
    pub fn sink<T>(self, sink: T) -> BinderBuilder<I, T>
    where
        T: DiagnosticSink,
    {
        BinderBuilder {
            config: self.config,
            tags: self.tags,
            sink,
            filters: self.filters,
        }
    }

    pub fn build(self) -> Binder<I, S> {
        Binder {
            config: self.config,
            tags: self.tags,
            sink: self.sink,
            filters: self.filters,
        }
    }
}
