//! Reader configuration.

use serde::{Deserialize, Serialize};

/// How a `null` entry in the `data` array is treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullRecordPolicy {
    /// Fail the load with `MalformedSpec`.
    #[default]
    Reject,
    /// Leave the id unregistered. References to it still fail with `UnresolvedId`.
    Skip,
}

/// Reader configuration.
///
/// Deserializable from JSON with camelCase keys; missing keys take their
/// default values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderOptions {
    /// Every global must have a single-segment qualified name.
    ///
    /// When disabled, qualified globals stay in the globals catalog but are
    /// not added as properties of the global node.
    pub require_flat_globals: bool,
    pub null_records: NullRecordPolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            require_flat_globals: true,
            null_records: NullRecordPolicy::Reject,
        }
    }
}

impl ReaderOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
