//! Community news feed parsing.
//!
//! The news file is hand-edited plain text. Each record is a block of
//! `key: value` metadata lines followed by body lines, closed by a line of
//! dashes:
//!
//! ```text
//! # comments and blank lines are ignored anywhere
//! title: Potluck
//! pubdate: Friday, March 3rd
//! bring a dish!
//! --
//! ```
//!
//! Body starts once both `title` and `pubdate` are known. A record that is
//! not closed by a delimiter before the end of the file is dropped.

use crate::data::NewsEntry;
use crate::error::{Result, TownstatsError};
use crate::utils::parsing::split_key_value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Metadata,
    Content,
}

/// Line-at-a-time parser for the news file format
#[derive(Debug)]
pub struct NewsParser {
    state: State,
    current: NewsEntry,
    has_title: bool,
    has_pubdate: bool,
    entries: Vec<NewsEntry>,
}

impl Default for NewsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsParser {
    pub fn new() -> Self {
        Self {
            state: State::Metadata,
            current: NewsEntry::default(),
            has_title: false,
            has_pubdate: false,
            entries: Vec::new(),
        }
    }

    /// Feed one line (without its line terminator)
    pub fn feed(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        if is_delimiter(trimmed) {
            self.close_entry();
            return;
        }

        match self.state {
            State::Metadata => self.read_metadata(trimmed),
            State::Content => {
                self.current.content.push('\n');
                self.current.content.push_str(trimmed);
            }
        }
    }

    fn read_metadata(&mut self, line: &str) {
        let Some((key, value)) = split_key_value(line) else {
            warn!("ignoring news metadata line without a key: '{}'", line);
            return;
        };
        match key.as_str() {
            "title" => {
                self.current.title = value;
                self.has_title = true;
            }
            "pubdate" => {
                self.current.pubdate = value;
                self.has_pubdate = true;
            }
            _ => warn!("ignoring unknown news key '{}'", key),
        }

        if self.has_title && self.has_pubdate {
            self.state = State::Content;
        }
    }

    fn close_entry(&mut self) {
        let entry = std::mem::take(&mut self.current);
        self.entries.push(entry);
        self.state = State::Metadata;
        self.has_title = false;
        self.has_pubdate = false;
    }

    /// Every delimiter-closed entry, in file order. An unterminated trailing
    /// entry is discarded.
    pub fn finish(self) -> Vec<NewsEntry> {
        if self.has_title || self.has_pubdate || !self.current.content.is_empty() {
            debug!(
                "dropping unterminated news entry '{}'",
                self.current.title
            );
        }
        self.entries
    }
}

/// A line made only of two or more dashes
fn is_delimiter(line: &str) -> bool {
    line.len() >= 2 && line.bytes().all(|b| b == b'-')
}

/// Parse news from any buffered reader.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn parse_news<R: BufRead>(mut reader: R) -> std::io::Result<Vec<NewsEntry>> {
    let mut parser = NewsParser::new();
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.feed(&String::from_utf8_lossy(&buf));
    }
    Ok(parser.finish())
}

/// Parse news already held in memory
pub fn parse_news_str(text: &str) -> Vec<NewsEntry> {
    let mut parser = NewsParser::new();
    text.lines().for_each(|line| parser.feed(line));
    parser.finish()
}

/// Read and parse the news file at `path`
pub fn collect_news<P: AsRef<Path>>(path: P) -> Result<Vec<NewsEntry>> {
    let path = path.as_ref();
    let news_error = |source: std::io::Error| TownstatsError::News {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(news_error)?;
    let entries = parse_news(BufReader::new(file)).map_err(news_error)?;
    debug!("parsed {} news entries from {}", entries.len(), path.display());
    Ok(entries)
}
