//! townstats library
//!
//! Gathers facts about a shared community host (registered users, their
//! pages, logins, uptime, news) into one tilde data protocol document.

pub mod collectors;
pub mod config;
pub mod data;
pub mod error;
pub mod utils;

pub use config::{load_config, Config};
pub use data::{NewsEntry, StatusDocument, UserRecord};
pub use error::{Result, TownstatsError};

use chrono::{DateTime, Local};
use collectors::users::DefaultPage;
use collectors::{news, sessions, users};
use tracing::info;
use utils::command::CommandRunner;

pub const SERVER_NAME: &str = "tilde.town";
pub const SERVER_URL: &str = "https://tilde.town";
pub const SIGNUP_URL: &str = "https://cgi.tilde.town/users/signup";
pub const WANT_USERS: bool = true;
pub const ADMIN_EMAIL: &str = "root@tilde.town";
pub const DESCRIPTION: &str = "an intentional digital community for creating and sharing \
works of art, peer education, and technological anachronism. we are non-commercial, \
donation supported, and committed to rejecting false technological progress in favor of \
empathy and sustainable computing.";

const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Collect everything and build the status document
pub fn collect_status_document(
    config: &Config,
    runner: &dyn CommandRunner,
) -> Result<StatusDocument> {
    let default_page = DefaultPage::load(&config.default_page);
    collect_with_default_page(config, runner, &default_page)
}

/// Same as [`collect_status_document`], with the skeleton page supplied by
/// the caller instead of read from `config.default_page`.
pub fn collect_with_default_page(
    config: &Config,
    runner: &dyn CommandRunner,
    default_page: &DefaultPage,
) -> Result<StatusDocument> {
    let users = users::collect_users(config, default_page)?;
    let active_user_count = sessions::collect_active_user_count(runner)?;
    let news = news::collect_news(&config.news_path)?;
    let uptime_text = sessions::collect_uptime(runner)?;

    let document = assemble(users, active_user_count, news, uptime_text, Local::now());
    info!(
        "{} users, {} live, {} active, {} news entries",
        document.user_count,
        document.live_user_count,
        document.active_user_count,
        document.news.len()
    );
    Ok(document)
}

/// Stitch gathered facts into a document stamped with `generated_at`
pub fn assemble(
    users: Vec<UserRecord>,
    active_user_count: usize,
    news: Vec<NewsEntry>,
    uptime_text: String,
    generated_at: DateTime<Local>,
) -> StatusDocument {
    StatusDocument {
        name: SERVER_NAME.to_string(),
        url: SERVER_URL.to_string(),
        signup_url: SIGNUP_URL.to_string(),
        want_users: WANT_USERS,
        admin_email: ADMIN_EMAIL.to_string(),
        description: DESCRIPTION.to_string(),
        user_count: users.len(),
        live_user_count: sessions::count_live_users(&users),
        users,
        active_user_count,
        uptime_text,
        news,
        generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
        generated_at_epoch: generated_at.timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(name: &str, is_default_page: bool) -> UserRecord {
        UserRecord {
            username: name.to_string(),
            page_title: format!("{name}'s page"),
            last_modified: 1_700_000_000,
            is_default_page,
        }
    }

    #[test]
    fn counts_follow_users() {
        let when = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let doc = assemble(
            vec![user("amy", true), user("bo", false), user("cy", false)],
            1,
            Vec::new(),
            "up 1 day".to_string(),
            when,
        );

        assert_eq!(doc.user_count, 3);
        assert_eq!(doc.live_user_count, 2);
        assert!(doc.live_user_count <= doc.user_count);
        assert_eq!(doc.active_user_count, 1);
        assert_eq!(doc.generated_at, "2024-05-06 07:08:09");
        assert_eq!(doc.generated_at_epoch, when.timestamp() * 1000);
    }

    #[test]
    fn serialized_keys_match_protocol() {
        let when = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let news = vec![NewsEntry {
            title: "t".to_string(),
            pubdate: "p".to_string(),
            content: "\nc".to_string(),
        }];
        let doc = assemble(vec![user("amy", false)], 0, news, "up".to_string(), when);
        let value: serde_json::Value = serde_json::from_str(&doc.to_json(false).unwrap()).unwrap();

        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "active_user_count",
                "admin_email",
                "description",
                "generated_at",
                "generated_at_msec",
                "live_user_count",
                "name",
                "news",
                "signup_url",
                "uptime",
                "url",
                "user_count",
                "users",
                "want_users",
            ]
        );
        assert_eq!(
            value["users"][0],
            serde_json::json!({
                "username": "amy",
                "title": "amy's page",
                "mtime": 1_700_000_000,
                "default": false,
            })
        );
        assert_eq!(
            value["news"][0],
            serde_json::json!({"title": "t", "pubdate": "p", "content": "\nc"})
        );
        assert_eq!(value["want_users"], serde_json::json!(true));
    }
}
