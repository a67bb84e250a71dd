use http::{HeaderMap, Method, Uri, Version};

#[non_exhaustive]
#[derive(Debug, Clone)]
/// The part of an HTTP request that is transmitted ahead of the body.
///
/// The binder only looks at the headers, to pick a strategy based on `Content-Type`.
/// The rest is kept so that an `http::Request` converted into an
/// [`IncomingRequest`](super::IncomingRequest) can be inspected as a whole.
pub struct RequestHead {
    pub method: Method,
    pub target: Uri,
    pub version: Version,
    pub headers: HeaderMap,
}

impl RequestHead {
    /// A `POST /` HTTP/1.1 request head with the given headers.
    pub fn post(headers: HeaderMap) -> Self {
        Self {
            method: Method::POST,
            target: Uri::from_static("/"),
            version: Version::HTTP_11,
            headers,
        }
    }
}

impl From<http::request::Parts> for RequestHead {
    fn from(parts: http::request::Parts) -> Self {
        Self {
            method: parts.method,
            target: parts.uri,
            version: parts.version,
            headers: parts.headers,
        }
    }
}
