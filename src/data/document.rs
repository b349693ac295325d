//! The top-level status document

use super::news::NewsEntry;
use super::user::UserRecord;
use serde::Serialize;

/// Everything townstats reports about the server, in tilde data protocol
/// field order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusDocument {
    pub name: String,
    pub url: String,
    pub signup_url: String,
    pub want_users: bool,
    pub admin_email: String,
    pub description: String,
    pub user_count: usize,
    pub users: Vec<UserRecord>,
    pub live_user_count: usize,
    pub active_user_count: usize,
    #[serde(rename = "uptime")]
    pub uptime_text: String,
    pub news: Vec<NewsEntry>,
    pub generated_at: String,
    #[serde(rename = "generated_at_msec")]
    pub generated_at_epoch: i64,
}

impl StatusDocument {
    /// Serialize as a single JSON object
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
