//! The request abstraction consumed by the [`Binder`](crate::Binder).
//!
//! Routing, header parsing and multipart decoding happen upstream: the binder only
//! needs the headers, the raw body and the already-parsed form fields.
//! Any type implementing [`BindRequest`] can be bound. [`IncomingRequest`] is the
//! provided implementation.
use http::HeaderMap;
use http::header::CONTENT_TYPE;

pub use body::RequestBody;
pub use form::{FormValues, MultipartForm};
pub use limit::BodySizeLimit;
pub use request_head::RequestHead;

mod body;
mod form;
mod limit;
mod request_head;

/// What the [`Binder`](crate::Binder) needs to know about a request.
pub trait BindRequest {
    fn headers(&self) -> &HeaderMap;

    /// Take ownership of the request body.
    ///
    /// Returns `None` if the request has no body, or if it was already taken.
    fn take_body(&mut self) -> Option<RequestBody>;

    /// The flat form fields of the request (query string and url-encoded body).
    fn form(&self) -> &FormValues;

    /// The parsed `multipart/form-data` payload, if any.
    fn multipart_form(&self) -> Option<&MultipartForm> {
        None
    }
}

#[derive(Debug)]
/// A request whose body and form fields have been gathered by the caller.
///
/// ```rust
/// use formbind::request::{IncomingRequest, RequestHead};
///
/// let mut headers = http::HeaderMap::new();
/// headers.insert(http::header::CONTENT_TYPE, "application/json".parse().unwrap());
/// let request = IncomingRequest::new(RequestHead::post(headers))
///     .with_body(r#"{"name": "Ada"}"#);
/// ```
pub struct IncomingRequest {
    head: RequestHead,
    body: Option<RequestBody>,
    form: FormValues,
    multipart: Option<MultipartForm>,
}

impl IncomingRequest {
    /// A request without a body or form fields.
    pub fn new(head: RequestHead) -> Self {
        Self {
            head,
            body: None,
            form: FormValues::new(),
            multipart: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_form(mut self, form: FormValues) -> Self {
        self.form = form;
        self
    }

    pub fn with_multipart(mut self, multipart: MultipartForm) -> Self {
        self.multipart = Some(multipart);
        self
    }

    /// A `POST` request carrying an `application/x-www-form-urlencoded` body.
    ///
    /// The payload is decoded into form fields and also kept as the request body.
    pub fn urlencoded(payload: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            http::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        Self::new(RequestHead::post(headers))
            .with_form(FormValues::parse(payload.as_bytes()))
            .with_body(payload.to_owned())
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }
}

impl<B> From<http::Request<B>> for IncomingRequest
where
    B: Into<RequestBody>,
{
    /// Keep the head and the body of `request`.
    ///
    /// Form fields aren't extracted: attach them with [`IncomingRequest::with_form`].
    fn from(request: http::Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts.into()).with_body(body)
    }
}

impl BindRequest for IncomingRequest {
    fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    fn take_body(&mut self) -> Option<RequestBody> {
        self.body.take()
    }

    fn form(&self) -> &FormValues {
        &self.form
    }

    fn multipart_form(&self) -> Option<&MultipartForm> {
        self.multipart.as_ref()
    }
}

impl<R> BindRequest for &mut R
where
    R: BindRequest + ?Sized,
{
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn take_body(&mut self) -> Option<RequestBody> {
        (**self).take_body()
    }

    fn form(&self) -> &FormValues {
        (**self).form()
    }

    fn multipart_form(&self) -> Option<&MultipartForm> {
        (**self).multipart_form()
    }
}
