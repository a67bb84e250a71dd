//! Named string filters, applied to text fields tagged with `form_filter`.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use crate::coerce::FilterFn;

/// A shareable string filter.
pub type StringFilter = Arc<FilterFn>;

/// The name of the built-in HTML filter.
///
/// It is registered as the identity transform: plug in your sanitizer of choice with
/// [`FilterRegistry::register`].
pub const HTML_FILTER: &str = "html";

#[derive(Clone)]
/// The set of filters a [`Binder`](crate::Binder) can apply, by name.
///
/// Fields tagged with an unknown filter name are bound without filtering.
pub struct FilterRegistry {
    filters: HashMap<String, StringFilter>,
}

impl FilterRegistry {
    /// A registry with the built-in filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no filters at all.
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register `filter` under `name`, replacing any filter with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }

    pub fn get(&self, name: &str) -> Option<&StringFilter> {
        self.filters.get(name)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(HTML_FILTER, str::to_owned);
        registry
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.filters.keys().collect();
        names.sort();
        f.debug_struct("FilterRegistry")
            .field("filters", &names)
            .finish()
    }
}
