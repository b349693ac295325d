//! Where townstats looks for things.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Every path is tilde-expanded.

use crate::error::{Result, TownstatsError};
use crate::utils::parsing::parse_csv_list;
use dirs::config_dir;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_HOME_ROOT: &str = "/home";
pub const DEFAULT_PAGE_PATH: &str = "/etc/skel/public_html/index.html";
pub const DEFAULT_NEWS_PATH: &str = "/town/news.posts";
const SYSTEM_CONFIG_PATH: &str = "/etc/townstats/config.toml";

/// Accounts that are never reported, whatever the config says.
pub const BUILTIN_SYSTEM_USERS: &[&str] = &["root", "ubuntu", "ttadmin"];

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home_root: PathBuf,
    /// Extra accounts to exclude, on top of [`BUILTIN_SYSTEM_USERS`]
    pub system_users: Vec<String>,
    pub default_page: PathBuf,
    pub news_path: PathBuf,
}

/// On-disk shape of the config file. Everything is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    home_root: Option<String>,
    system_users: Option<Vec<String>>,
    default_page: Option<String>,
    news_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_root: PathBuf::from(DEFAULT_HOME_ROOT),
            system_users: Vec::new(),
            default_page: PathBuf::from(DEFAULT_PAGE_PATH),
            news_path: PathBuf::from(DEFAULT_NEWS_PATH),
        }
    }
}

impl Config {
    /// Full exclusion set: built-ins merged with configured extras
    pub fn excluded_users(&self) -> HashSet<String> {
        BUILTIN_SYSTEM_USERS
            .iter()
            .map(|name| name.to_string())
            .chain(self.system_users.iter().cloned())
            .collect()
    }

    /// Layer a parsed TOML document over the current values
    pub fn merge_toml(&mut self, raw: &str) -> Result<()> {
        let file: FileConfig =
            toml::de::from_str(raw).map_err(|err| TownstatsError::Config(err.to_string()))?;

        if let Some(root) = file.home_root {
            self.home_root = expand_path(&root);
        }
        if let Some(users) = file.system_users {
            self.system_users.extend(users);
        }
        if let Some(page) = file.default_page {
            self.default_page = expand_path(&page);
        }
        if let Some(news) = file.news_path {
            self.news_path = expand_path(&news);
        }
        Ok(())
    }

    /// Layer environment overrides. `lookup` is usually `std::env::var`.
    pub fn merge_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("HOME_ROOT") {
            self.home_root = expand_path(&root);
        }
        if let Some(users) = lookup("SYSTEM_USERS") {
            self.system_users.extend(parse_csv_list(&users));
        }
        if let Some(page) = lookup("DEFAULT_INDEX_PATH") {
            self.default_page = expand_path(&page);
        }
        if let Some(news) = lookup("NEWS_PATH") {
            self.news_path = expand_path(&news);
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

/// Pick the config file to read, if any.
///
/// An explicit path must exist. Otherwise the per-user file wins over the
/// system-wide one, and having neither is fine.
fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(TownstatsError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let user_config_path = config_dir().map(|p| p.join("townstats/config.toml"));
    if let Some(path) = user_config_path.filter(|p| p.is_file()) {
        return Ok(Some(path));
    }

    let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
    Ok(system_path.is_file().then_some(system_path))
}

/// Build the run's configuration from defaults, file and environment
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = locate_config_file(explicit)? {
        debug!("reading config from {}", path.display());
        let raw = fs::read_to_string(&path).map_err(|err| {
            TownstatsError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        config.merge_toml(&raw)?;
    }

    config.merge_env(|key| std::env::var(key).ok());
    Ok(config)
}
