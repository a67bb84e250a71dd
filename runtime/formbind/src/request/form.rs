use indexmap::IndexMap;
use indexmap::map::Iter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Flat request fields: every key maps to one or more values, in the order they were received.
///
/// Keys are visited in insertion order.
pub struct FormValues(IndexMap<String, Vec<String>>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` payload.
    ///
    /// Repeated keys accumulate their values.
    ///
    /// ```rust
    /// use formbind::request::FormValues;
    ///
    /// let form = FormValues::parse(b"name=Ada+Lovelace&tags=math&tags=poetry");
    /// assert_eq!(form.get("name"), Some(&["Ada Lovelace".to_string()][..]));
    /// assert_eq!(form.get("tags").map(|v| v.len()), Some(2));
    /// ```
    pub fn parse(input: &[u8]) -> Self {
        form_urlencoded::parse(input)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Set the values of `key`, replacing any previous ones.
    ///
    /// An empty `values` removes the key.
    pub fn insert<K, V>(&mut self, key: K, values: V) -> &mut Self
    where
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let key = key.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.0.shift_remove(&key);
        } else {
            self.0.insert(key, values);
        }
        self
    }

    /// Add a value to `key`, after the values it already has.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`: keys present in both take the values of `other`.
    pub fn merge(&mut self, other: &FormValues) {
        for (key, values) in other {
            self.0.insert(key.clone(), values.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (key, value) in iter {
            form.append(key, value);
        }
        form
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default)]
#[non_exhaustive]
/// The outcome of parsing a `multipart/form-data` body upstream.
///
/// Only the value parts take part in binding; file parts are left to the caller.
pub struct MultipartForm {
    pub values: FormValues,
}

impl MultipartForm {
    pub fn new(values: FormValues) -> Self {
        Self { values }
    }
}
