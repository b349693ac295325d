//! String parsing utilities

use regex::Regex;
use std::sync::OnceLock;

fn title_regex() -> &'static Regex {
    static TITLE: OnceLock<Regex> = OnceLock::new();
    TITLE.get_or_init(|| {
        Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid")
    })
}

/// Inner text of the first `<title>` element, trimmed. Empty if there is none.
pub fn extract_title(html: &str) -> String {
    title_regex()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Split a `key: value` line on the first colon.
///
/// The key is trimmed and lowercased, the value trimmed. A line without a
/// colon has no pair.
pub fn split_key_value(line: &str) -> Option<(String, String)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
}

/// Everything before the first run of whitespace.
///
/// A line that starts with whitespace yields an empty token.
pub fn first_token(line: &str) -> &str {
    line.split(char::is_whitespace).next().unwrap_or("")
}

/// Parse a comma separated list, dropping blank entries
pub fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
