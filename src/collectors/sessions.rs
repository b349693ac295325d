//! Login sessions, uptime and the live-user counter

use crate::data::UserRecord;
use crate::error::Result;
use crate::utils::command::CommandRunner;
use crate::utils::parsing::first_token;
use std::collections::HashSet;

/// Users whose page differs from the skeleton
pub fn count_live_users(users: &[UserRecord]) -> usize {
    users.iter().filter(|user| !user.is_default_page).count()
}

/// Distinct usernames in `who` output.
///
/// The username is whatever precedes the first whitespace, so a line that
/// starts with whitespace contributes one empty name.
pub fn count_active_users(who_output: &str) -> usize {
    who_output
        .lines()
        .map(first_token)
        .collect::<HashSet<&str>>()
        .len()
}

/// Ask `who` how many distinct users are logged in
pub fn collect_active_user_count(runner: &dyn CommandRunner) -> Result<usize> {
    let output = runner.run("who", &[])?;
    Ok(count_active_users(&output))
}

/// Human readable uptime, e.g. `up 3 weeks, 2 days`
pub fn collect_uptime(runner: &dyn CommandRunner) -> Result<String> {
    Ok(runner.run("uptime", &["-p"])?.trim().to_string())
}
