use serde::Deserialize;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
}

/// Minimal user object as embedded in stargazer and fork listings.
///
/// Only `login` is required so one sparse entry cannot fail a whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A fork listing entry; the forker is its owner.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubFork {
    #[serde(default)]
    pub full_name: Option<String>,
    pub owner: GitHubUser,
}

/// Full user object from `/users/{username}`.
///
/// Every field is optional: GitHub returns `null` for anything the user
/// has not filled in, and older accounts may lack fields entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubUserDetail {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
