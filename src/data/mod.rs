//! Plain data gathered by the collectors

pub mod document;
pub mod news;
pub mod user;

pub use document::StatusDocument;
pub use news::NewsEntry;
pub use user::UserRecord;
