use ubyte::{ByteUnit, ToByteUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
/// An upper limit on the size of request bodies buffered for JSON or XML decoding.
///
/// Form fields are parsed upstream and are not affected.
pub enum BodySizeLimit {
    /// There is an active limit on the size of request bodies.
    Enabled {
        /// The maximum size of request bodies, in bytes.
        max_size: ByteUnit,
    },
    /// There is no limit on the size of request bodies.
    Disabled,
}

impl Default for BodySizeLimit {
    fn default() -> Self {
        Self::Enabled {
            max_size: 2.megabytes(),
        }
    }
}
