//! Fact gathering from the host

pub mod news;
pub mod sessions;
pub mod users;
