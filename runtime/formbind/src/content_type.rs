//! Pick a binding strategy from the `Content-Type` of a request.
use std::fmt;

use http::HeaderMap;

use crate::errors::{BindError, ContentTypeMismatch, MissingContentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// How the data of a request is bound to the target.
pub enum Strategy {
    /// Decode the body as a JSON document.
    Json,
    /// Decode the body as an XML document.
    Xml,
    /// Bind the form fields of the request, key by key.
    UrlEncoded,
    /// Bind the form fields of the request, overlaid with the value parts of the
    /// multipart payload, key by key.
    Multipart,
}

impl Strategy {
    /// Determine the strategy for a request with the given headers.
    ///
    /// Media type parameters (e.g. `charset`) are ignored.
    pub fn detect(headers: &HeaderMap) -> Result<Self, BindError> {
        let Some(content_type) = headers.get(http::header::CONTENT_TYPE) else {
            return Err(MissingContentType.into());
        };
        let Ok(content_type) = content_type.to_str() else {
            return Err(MissingContentType.into());
        };
        let mismatch = || ContentTypeMismatch {
            actual: content_type.to_string(),
        };

        let Ok(mime) = content_type.parse::<mime::Mime>() else {
            return Err(mismatch().into());
        };

        let type_ = mime.type_();
        let subtype = mime.subtype();
        let suffix = mime.suffix();
        let strategy = if type_ == mime::APPLICATION
            && (subtype == mime::JSON || suffix == Some(mime::JSON))
        {
            Strategy::Json
        } else if (type_ == mime::APPLICATION || type_ == mime::TEXT)
            && (subtype == mime::XML || suffix == Some(mime::XML))
        {
            Strategy::Xml
        } else if type_ == mime::APPLICATION && subtype == mime::WWW_FORM_URLENCODED {
            Strategy::UrlEncoded
        } else if type_ == mime::MULTIPART && subtype == mime::FORM_DATA {
            Strategy::Multipart
        } else {
            return Err(mismatch().into());
        };
        Ok(strategy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Json => "json",
            Strategy::Xml => "xml",
            Strategy::UrlEncoded => "urlencoded",
            Strategy::Multipart => "multipart",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;
    use http::header::CONTENT_TYPE;

    use super::Strategy;

    fn detect(content_type: &str) -> Result<Strategy, crate::BindError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type.parse().unwrap());
        Strategy::detect(&headers)
    }

    #[test]
    fn supported_media_types() {
        assert_eq!(detect("application/json").unwrap(), Strategy::Json);
        assert_eq!(
            detect("application/vnd.api+json; charset=utf-8").unwrap(),
            Strategy::Json
        );
        assert_eq!(detect("application/xml").unwrap(), Strategy::Xml);
        assert_eq!(detect("text/xml").unwrap(), Strategy::Xml);
        assert_eq!(detect("application/atom+xml").unwrap(), Strategy::Xml);
        assert_eq!(
            detect("application/x-www-form-urlencoded").unwrap(),
            Strategy::UrlEncoded
        );
        assert_eq!(
            detect("multipart/form-data; boundary=X-BOUNDARY").unwrap(),
            Strategy::Multipart
        );
    }

    #[test]
    fn missing_content_type() {
        let err = Strategy::detect(&HeaderMap::new()).unwrap_err();
        insta::assert_debug_snapshot!(err, @r"
        MissingContentType(
            MissingContentType,
        )
        ");
    }

    #[test]
    fn unsupported_content_type() {
        let err = detect("text/plain").unwrap_err();
        insta::assert_debug_snapshot!(err, @r#"
        ContentTypeMismatch(
            ContentTypeMismatch {
                actual: "text/plain",
            },
        )
        "#);
        assert!(detect("not a mime").is_err());
    }
}
