use crate::types::{GitHubFork, GitHubUser, GitHubUserDetail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitHub login, as extracted from a stargazer or fork listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(pub String);

impl Identity {
    pub fn login(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&GitHubUser> for Identity {
    fn from(user: &GitHubUser) -> Self {
        Identity(user.login.clone())
    }
}

impl From<&GitHubFork> for Identity {
    fn from(fork: &GitHubFork) -> Self {
        Identity(fork.owner.login.clone())
    }
}

/// Flat profile row written to the stargazer/forker CSV files.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub person_name: String,
    pub github_profile_link: String,
    pub email: String,
    pub company: String,
    pub interests: String,
}

impl UserProfile {
    pub const KEY_COLUMN: &'static str = "github_profile_link";
}

impl From<GitHubUserDetail> for UserProfile {
    fn from(detail: GitHubUserDetail) -> Self {
        UserProfile {
            person_name: detail.name.unwrap_or_default(),
            github_profile_link: detail.html_url.unwrap_or_default(),
            email: detail.email.unwrap_or_default(),
            company: detail.company.unwrap_or_default(),
            interests: detail.bio.unwrap_or_default(),
        }
    }
}

/// Rate limit state parsed from the `X-RateLimit-*` headers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}
