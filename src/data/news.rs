//! Community news structures

use serde::Serialize;

/// One community announcement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsEntry {
    pub title: String,
    /// Free-form date string, kept exactly as written
    pub pubdate: String,
    /// Body lines, each prefixed with a newline
    pub content: String,
}
