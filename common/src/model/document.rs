use serde::{Deserialize, Serialize};

/// A file uploaded for a `file`, `multifile` or `image` field.
///
/// The form value of the field stays the original `file_name`; `stored_name`
/// is the content-addressed name on the server (`<md5>_<file_name>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub file_name: String,
    pub stored_name: String,
    pub size: u64,
}
