//! Trait-based conversions between external error types and `StrataError`.

use super::StrataError;

/// Convert JSON encoding failures raised while snapshotting override objects.
impl From<serde_json::Error> for StrataError {
    fn from(e: serde_json::Error) -> Self {
        Self::UnsupportedShape {
            key: String::new(),
            message: format!("cannot serialise object: {e}"),
        }
    }
}
