//! Errors that can occur while binding request data.
//!
//! There are two tiers:
//!
//! - [`BindError`] is returned by [`Binder::bind`](crate::Binder::bind) and aborts
//!   the whole call (missing body, unsupported content type, malformed JSON/XML payload).
//! - [`FieldError`] describes a problem with a single form key or value. It is never
//!   returned: it is wrapped in a [`Diagnostic`](crate::Diagnostic), handed to the
//!   configured [`DiagnosticSink`](crate::DiagnosticSink), and binding moves on.
use http::StatusCode;
use ubyte::ByteUnit;

use crate::conversion::BoxError;
use crate::key::KeyParseError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`Binder::bind`](crate::Binder::bind) when the request
/// can't be bound at all.
pub enum BindError {
    #[error(transparent)]
    /// See [`MissingBody`] for details.
    MissingBody(#[from] MissingBody),
    #[error(transparent)]
    /// See [`MissingContentType`] for details.
    MissingContentType(#[from] MissingContentType),
    #[error(transparent)]
    /// See [`ContentTypeMismatch`] for details.
    ContentTypeMismatch(#[from] ContentTypeMismatch),
    #[error(transparent)]
    /// See [`JsonDeserializationError`] for details.
    Json(#[from] JsonDeserializationError),
    #[error(transparent)]
    /// See [`XmlDeserializationError`] for details.
    Xml(#[from] XmlDeserializationError),
    #[error(transparent)]
    /// See [`SizeLimitExceeded`] for details.
    SizeLimitExceeded(#[from] SizeLimitExceeded),
    #[error(transparent)]
    /// See [`UnexpectedBodyError`] for details.
    UnexpectedBody(#[from] UnexpectedBodyError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The class of a [`BindError`], for callers that want to pick a response.
pub enum BindErrorKind {
    /// The client sent a request that can't be bound (missing or malformed body).
    BadRequest,
    /// The `Content-Type` of the request isn't one the binder understands.
    UnsupportedMediaType,
    /// The body is larger than the configured limit.
    PayloadTooLarge,
    /// Something went wrong on our side while reading the body.
    Internal,
}

impl BindError {
    /// The class this error belongs to.
    pub fn kind(&self) -> BindErrorKind {
        match self {
            BindError::MissingBody(_) | BindError::Json(_) | BindError::Xml(_) => {
                BindErrorKind::BadRequest
            }
            BindError::MissingContentType(_) | BindError::ContentTypeMismatch(_) => {
                BindErrorKind::UnsupportedMediaType
            }
            BindError::SizeLimitExceeded(_) => BindErrorKind::PayloadTooLarge,
            BindError::UnexpectedBody(_) => BindErrorKind::Internal,
        }
    }

    /// The HTTP status code that best represents this error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            BindErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            BindErrorKind::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            BindErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            BindErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The request body is missing. Binding requires a request body")]
#[non_exhaustive]
/// The request has no body.
pub struct MissingBody;

#[derive(Debug, thiserror::Error)]
#[error(
    "The `Content-Type` header is missing. This endpoint expects requests with a `Content-Type` header set to `application/json`, `application/xml`, `application/x-www-form-urlencoded` or `multipart/form-data`"
)]
#[non_exhaustive]
/// The `Content-Type` header is missing, or it isn't valid UTF-8.
pub struct MissingContentType;

#[derive(Debug, thiserror::Error)]
#[error(
    "The `Content-Type` header was set to `{actual}`. This endpoint expects requests with a `Content-Type` header set to `application/json`, `application/xml`, `application/x-www-form-urlencoded` or `multipart/form-data`"
)]
#[non_exhaustive]
/// The `Content-Type` header is set to a media type the binder doesn't support.
pub struct ContentTypeMismatch {
    /// The actual value of the `Content-Type` header for this request.
    pub actual: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deserialize the body as a JSON document.\n{source}")]
#[non_exhaustive]
/// The body isn't a JSON document matching the target type.
pub struct JsonDeserializationError {
    #[source]
    pub(crate) source: serde_path_to_error::Error<serde_json::Error>,
}

impl JsonDeserializationError {
    /// The path to the value that failed to deserialize, e.g. `user.age`.
    pub fn path(&self) -> String {
        self.source.path().to_string()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deserialize the body as an XML document.\n{source}")]
#[non_exhaustive]
/// The body isn't an XML document matching the target type.
pub struct XmlDeserializationError {
    #[source]
    pub(crate) source: quick_xml::DeError,
}

#[derive(Debug, thiserror::Error)]
#[error("The request body is larger than the maximum size limit enforced by this server.")]
#[non_exhaustive]
/// The request body is larger than the configured [`BodySizeLimit`](crate::request::BodySizeLimit).
pub struct SizeLimitExceeded {
    /// The maximum size limit enforced by this server.
    pub max_size: ByteUnit,
    /// The value of the `Content-Length` header for the request that breached the limit.
    ///
    /// It's set to `None` if the `Content-Length` header was missing or invalid.
    pub content_length: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
#[error("Something went wrong while reading the request body.")]
#[non_exhaustive]
/// Reading the request body failed.
pub struct UnexpectedBodyError {
    #[source]
    pub(crate) source: std::io::Error,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// A problem with a single form key or value.
///
/// Field errors are reported through the [`DiagnosticSink`](crate::DiagnosticSink)
/// and never interrupt the binding of other fields.
pub enum FieldError {
    #[error("Unrecognized form key: {0}")]
    MalformedKey(#[from] KeyParseError),
    #[error("`{segment}` can't be resolved: `{type_name}` is not a struct")]
    NotAStruct {
        segment: String,
        type_name: &'static str,
    },
    #[error("`{container}` has no field named `{segment}`")]
    UnknownField {
        segment: String,
        container: &'static str,
    },
    #[error("`{container}.{segment}` can't be set")]
    Unsettable {
        segment: String,
        container: &'static str,
    },
    #[error("Failed to parse the value as `{type_name}`")]
    InvalidInteger {
        type_name: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Failed to parse the value as `{type_name}`")]
    InvalidFloat {
        type_name: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("`{type_name}` failed to convert the value")]
    Conversion {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("The value doesn't match any of the supported timestamp formats")]
    TimestampFormat {
        #[source]
        source: jiff::Error,
    },
    #[error("`{type_name}` can't be bound from a string: it doesn't implement `FromConversion`")]
    NoConversion { type_name: &'static str },
    #[error("`{type_name}` can't be bound: pointers to pointers are not supported")]
    PointerToPointer { type_name: &'static str },
    #[error("`{type_name}` is not a supported sequence element type")]
    UnsupportedElement { type_name: &'static str },
    #[error("The value is out of range: the array only has {len} elements")]
    ElementOutOfRange { len: usize },
    #[error("`{type_name}` can't be bound from form values")]
    Unsupported { type_name: &'static str },
}
