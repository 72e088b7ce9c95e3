use crate::error::{CollectorError, Result};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MERGE_PATTERN: &str = "*.csv";
pub const DEFAULT_MERGE_OUTPUT: &str = "combined_data.csv";

/// Settings for a collection run against one repository.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub owner: String,
    pub repo: String,
    /// Personal access token; empty means unauthenticated requests.
    pub token: String,
    pub api_base_url: Url,
    pub output_dir: PathBuf,
}

impl CollectorConfig {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let config = CollectorConfig {
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
            api_base_url: Url::parse(DEFAULT_API_URL)
                .map_err(|e| CollectorError::ConfigError(e.to_string()))?,
            output_dir: PathBuf::from("."),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(CollectorError::ConfigError("repository owner is empty".to_string()));
        }
        if self.repo.trim().is_empty() {
            return Err(CollectorError::ConfigError("repository name is empty".to_string()));
        }
        if self.owner.contains('/') || self.repo.contains('/') {
            return Err(CollectorError::ConfigError(format!(
                "owner and repo must not contain '/': {}/{}",
                self.owner, self.repo
            )));
        }
        Ok(())
    }

    /// API base without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> &str {
        self.api_base_url.as_str().trim_end_matches('/')
    }

    pub fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_base(), self.owner, self.repo)
    }

    pub fn user_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.api_base(), login)
    }

    pub fn stargazers_csv(&self) -> PathBuf {
        self.output_dir.join(format!("{}_stargazers.csv", self.repo))
    }

    pub fn forkers_csv(&self) -> PathBuf {
        self.output_dir.join(format!("{}_forkers.csv", self.repo))
    }
}

/// Settings for a merge pass.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub pattern: String,
    pub output: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            pattern: DEFAULT_MERGE_PATTERN.to_string(),
            output: PathBuf::from(DEFAULT_MERGE_OUTPUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let config = CollectorConfig::new("octo", "widgets", "")
            .unwrap()
            .with_api_base_url(Url::parse("http://127.0.0.1:1234/").unwrap());

        assert_eq!(config.repo_url(), "http://127.0.0.1:1234/repos/octo/widgets");
        assert_eq!(config.user_url("alice"), "http://127.0.0.1:1234/users/alice");
    }

    #[test]
    fn test_default_merge_config() {
        let config = MergeConfig::default();
        assert_eq!(config.pattern, "*.csv");
        assert_eq!(config.output, PathBuf::from("combined_data.csv"));
    }
}
