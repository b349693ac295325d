//! Centralized error handling for townstats

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort building the status document.
///
/// Per-user problems (missing pages, unreadable content directories) never
/// show up here; they degrade the affected record instead.
#[derive(Debug, Error)]
pub enum TownstatsError {
    /// I/O errors not tied to a specific stage
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The home directory root could not be listed
    #[error("cannot list home directories in {}: {source}", path.display())]
    HomeListing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The news source could not be opened or read
    #[error("cannot read news from {}: {source}", path.display())]
    News {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external command could not be run or exited unsuccessfully
    #[error("command '{program}' failed: {reason}")]
    Command { program: String, reason: String },

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// The final document could not be serialized
    #[error("cannot serialize status document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Type alias for Results in townstats
pub type Result<T> = std::result::Result<T, TownstatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_is_named_in_message() {
        let err = TownstatsError::News {
            path: PathBuf::from("/town/news.posts"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read news from /town/news.posts: gone");

        let err = TownstatsError::Command {
            program: "who".to_string(),
            reason: "exit code Some(1)".to_string(),
        };
        assert!(err.to_string().starts_with("command 'who' failed"));
    }
}
