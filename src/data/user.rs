//! Per-user information structures

use serde::Serialize;

/// One registered, non-system account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub username: String,
    /// Inner text of the entry page's `<title>`, empty if unavailable
    #[serde(rename = "title")]
    pub page_title: String,
    /// Newest mtime under the user's public_html, 0 if unknown
    #[serde(rename = "mtime")]
    pub last_modified: i64,
    /// Entry page is byte-identical to the skeleton page
    #[serde(rename = "default")]
    pub is_default_page: bool,
}
