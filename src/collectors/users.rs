//! User discovery and per-user profiling

use crate::config::Config;
use crate::data::UserRecord;
use crate::error::{Result, TownstatsError};
use crate::utils::file::{file_exists, latest_mtime, list_dir_names, read_bytes};
use crate::utils::parsing::extract_title;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Entry page candidates, tried in order
pub const ENTRY_PAGES: &[&str] = &["index.html", "index.htm"];

/// Directory under each home that holds published content
pub const PUBLIC_DIR: &str = "public_html";

/// The skeleton page every new account starts with.
///
/// Loaded once per run and handed to every profile call. If it could not be
/// read, nothing matches it and every user counts as live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultPage(Option<Vec<u8>>);

impl DefaultPage {
    /// Read the template from disk, degrading to [`DefaultPage::unavailable`]
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match read_bytes(path) {
            Ok(bytes) => Self(Some(bytes)),
            Err(err) => {
                warn!("default page {} unreadable, treating everyone as live: {}", path.display(), err);
                Self(None)
            }
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Some(bytes.into()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }

    /// `page` is byte-for-byte the template
    pub fn matches(&self, page: &[u8]) -> bool {
        self.0.as_deref() == Some(page)
    }
}

/// First existing entry page in a public_html directory
pub fn find_entry_page(public_dir: &Path) -> Option<PathBuf> {
    ENTRY_PAGES
        .iter()
        .map(|name| public_dir.join(name))
        .find(|path| file_exists(path))
}

/// Build the record for one account. Never fails; missing data degrades
/// the affected fields only.
pub fn profile_user(home_root: &Path, username: &str, default_page: &DefaultPage) -> UserRecord {
    let public_dir = home_root.join(username).join(PUBLIC_DIR);

    let page = match find_entry_page(&public_dir) {
        Some(path) => match read_bytes(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!("{}: cannot read {}: {}", username, path.display(), err);
                None
            }
        },
        None => {
            debug!("{}: no entry page in {}", username, public_dir.display());
            None
        }
    };

    let (page_title, is_default_page) = match page {
        Some(bytes) => (
            extract_title(&String::from_utf8_lossy(&bytes)),
            default_page.matches(&bytes),
        ),
        None => (String::new(), false),
    };

    let last_modified = latest_mtime(&public_dir).unwrap_or_else(|err| {
        debug!("{}: no mtime for {}: {}", username, public_dir.display(), err);
        0
    });

    UserRecord {
        username: username.to_string(),
        page_title,
        last_modified,
        is_default_page,
    }
}

/// Profile every candidate that is not an excluded account, keeping the
/// candidates' order.
pub fn discover_users(
    home_root: &Path,
    candidates: &[String],
    excluded: &HashSet<String>,
    default_page: &DefaultPage,
) -> Vec<UserRecord> {
    candidates
        .iter()
        .filter(|name| !excluded.contains(name.as_str()))
        .map(|name| profile_user(home_root, name, default_page))
        .collect()
}

/// List the home root and profile everyone on it
pub fn collect_users(config: &Config, default_page: &DefaultPage) -> Result<Vec<UserRecord>> {
    let candidates =
        list_dir_names(&config.home_root).map_err(|source| TownstatsError::HomeListing {
            path: config.home_root.clone(),
            source,
        })?;

    let users = discover_users(
        &config.home_root,
        &candidates,
        &config.excluded_users(),
        default_page,
    );
    info!(
        "profiled {} users out of {} home entries",
        users.len(),
        candidates.len()
    );
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SKEL: &[u8] = b"<html></html>";

    fn add_page(root: &Path, user: &str, file: &str, body: &[u8]) {
        let dir = root.join(user).join(PUBLIC_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn identical_page_is_default() {
        let home = tempfile::tempdir().unwrap();
        add_page(home.path(), "amy", "index.html", SKEL);

        let record = profile_user(home.path(), "amy", &DefaultPage::from_bytes(SKEL));
        assert!(record.is_default_page);
        assert_eq!(record.page_title, "");
        assert!(record.last_modified > 0);
    }

    #[test]
    fn one_byte_off_is_live() {
        let home = tempfile::tempdir().unwrap();
        add_page(home.path(), "amy", "index.html", b"<html></html>\n");

        let record = profile_user(home.path(), "amy", &DefaultPage::from_bytes(SKEL));
        assert!(!record.is_default_page);
    }

    #[test]
    fn htm_is_used_when_html_is_absent() {
        let home = tempfile::tempdir().unwrap();
        add_page(
            home.path(),
            "bo",
            "index.htm",
            b"<html><title>bo's burrow</title></html>",
        );

        let record = profile_user(home.path(), "bo", &DefaultPage::unavailable());
        assert_eq!(record.page_title, "bo's burrow");
        assert!(!record.is_default_page);
    }

    #[test]
    fn html_wins_over_htm() {
        let home = tempfile::tempdir().unwrap();
        add_page(home.path(), "cy", "index.htm", b"<title>old</title>");
        add_page(home.path(), "cy", "index.html", b"<title>new</title>");

        let record = profile_user(home.path(), "cy", &DefaultPage::unavailable());
        assert_eq!(record.page_title, "new");
    }

    #[test]
    fn missing_home_degrades() {
        let home = tempfile::tempdir().unwrap();

        let record = profile_user(home.path(), "ghost", &DefaultPage::from_bytes(SKEL));
        assert_eq!(
            record,
            UserRecord {
                username: "ghost".to_string(),
                page_title: String::new(),
                last_modified: 0,
                is_default_page: false,
            }
        );
    }

    #[test]
    fn unavailable_template_matches_nothing() {
        assert!(!DefaultPage::unavailable().matches(b""));
        assert!(!DefaultPage::load("/nonexistent/townstats/skel.html").matches(SKEL));
    }

    #[test]
    fn excluded_names_never_appear() {
        let home = tempfile::tempdir().unwrap();
        for user in ["root", "amy", "vagrant", "bo"] {
            add_page(home.path(), user, "index.html", SKEL);
        }
        let candidates: Vec<String> = ["amy", "bo", "root", "vagrant"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let excluded: HashSet<String> =
            ["root", "vagrant"].iter().map(|s| s.to_string()).collect();

        let users = discover_users(
            home.path(),
            &candidates,
            &excluded,
            &DefaultPage::from_bytes(SKEL),
        );
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "bo"]);
    }

    #[test]
    fn unlistable_root_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        let config = Config {
            home_root: home.path().join("missing"),
            ..Config::default()
        };

        let err = collect_users(&config, &DefaultPage::unavailable()).unwrap_err();
        assert!(matches!(err, TownstatsError::HomeListing { .. }));
    }
}
