use std::fmt;
use std::io::{Cursor, Read};

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_LENGTH;
use ubyte::ByteUnit;

use super::BodySizeLimit;
use crate::errors::{BindError, SizeLimitExceeded, UnexpectedBodyError};

/// The raw body of a request, as a byte stream.
///
/// The stream is closed when the `RequestBody` is dropped.
pub struct RequestBody(Box<dyn Read + Send>);

impl RequestBody {
    pub fn new<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self(Box::new(reader))
    }

    /// Read the entire body into memory, enforcing `limit`.
    pub fn buffer(self, headers: &HeaderMap, limit: BodySizeLimit) -> Result<Bytes, BindError> {
        match limit {
            BodySizeLimit::Enabled { max_size } => self.buffer_with_limit(headers, max_size),
            BodySizeLimit::Disabled => {
                let mut buffer = Vec::new();
                let mut reader = self.0;
                reader
                    .read_to_end(&mut buffer)
                    .map_err(|source| UnexpectedBodyError { source })?;
                Ok(buffer.into())
            }
        }
    }

    fn buffer_with_limit(
        self,
        headers: &HeaderMap,
        max_size: ByteUnit,
    ) -> Result<Bytes, BindError> {
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok()?.parse::<usize>().ok());

        let limit_error = || SizeLimitExceeded {
            max_size,
            content_length,
        };

        // A declared length above the limit fails without reading anything.
        if let Some(len) = content_length {
            if len > max_size {
                return Err(limit_error().into());
            }
        }

        // Read one byte past the limit to tell "exactly at the limit" from "above it".
        let max_n_bytes = max_size.as_u64();
        let mut buffer = Vec::new();
        self.0
            .take(max_n_bytes.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|source| UnexpectedBodyError { source })?;
        if buffer.len() as u64 > max_n_bytes {
            return Err(limit_error().into());
        }
        Ok(buffer.into())
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBody").finish_non_exhaustive()
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        Self::new(Cursor::new(s))
    }
}

impl From<&'static str> for RequestBody {
    fn from(s: &'static str) -> Self {
        Self::new(Cursor::new(s))
    }
}
