use crate::config::CollectorConfig;
use crate::csv_writer::write_records;
use crate::enricher::UserEnricher;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::Identity;
use crate::paginator::{CountField, Paginator};
use crate::progress::ProgressReporter;
use crate::types::{GitHubFork, GitHubUser};
use std::path::PathBuf;
use tracing::{info, warn};

/// Which listing of the repository to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Stargazers,
    Forks,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Stargazers, Source::Forks];

    pub fn endpoint(&self, config: &CollectorConfig) -> String {
        match self {
            Source::Stargazers => format!("{}/stargazers", config.repo_url()),
            Source::Forks => format!("{}/forks", config.repo_url()),
        }
    }

    pub fn count_field(&self) -> CountField {
        match self {
            Source::Stargazers => CountField::Stargazers,
            Source::Forks => CountField::Forks,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::Stargazers => "Fetching stargazers",
            Source::Forks => "Fetching forks",
        }
    }

    /// Plural name of the people this source yields.
    pub fn people(&self) -> &'static str {
        match self {
            Source::Stargazers => "stargazers",
            Source::Forks => "forkers",
        }
    }

    pub fn output_path(&self, config: &CollectorConfig) -> PathBuf {
        match self {
            Source::Stargazers => config.stargazers_csv(),
            Source::Forks => config.forkers_csv(),
        }
    }
}

/// Result of one collection run.
#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub source: Source,
    pub identities: usize,
    pub profiles: usize,
    /// CSV written, or `None` when nothing was found.
    pub output: Option<PathBuf>,
}

pub struct Pipeline {
    client: GitHubClient,
}

impl Pipeline {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: GitHubClient::new(config)?,
        })
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Page through the source listing and extract each login.
    pub async fn identities(
        &self,
        source: Source,
        progress: &mut dyn ProgressReporter,
    ) -> Vec<Identity> {
        let paginator = Paginator::new(&self.client);
        let endpoint = source.endpoint(self.client.config());
        let count_field = Some(source.count_field());

        match source {
            Source::Stargazers => {
                let users: Vec<GitHubUser> = paginator
                    .collect(&endpoint, source.label(), count_field, progress)
                    .await;
                users.iter().map(Identity::from).collect()
            }
            Source::Forks => {
                let forks: Vec<GitHubFork> = paginator
                    .collect(&endpoint, source.label(), count_field, progress)
                    .await;
                forks.iter().map(Identity::from).collect()
            }
        }
    }

    pub async fn collect(
        &self,
        source: Source,
        progress: &mut dyn ProgressReporter,
    ) -> Result<CollectionOutcome> {
        let identities = self.identities(source, progress).await;

        if identities.is_empty() {
            warn!("No {} found or failed to fetch data.", source.people());
            return Ok(CollectionOutcome {
                source,
                identities: 0,
                profiles: 0,
                output: None,
            });
        }

        let profiles = UserEnricher::new(&self.client)
            .enrich(&identities, progress)
            .await;
        let output = write_records(&profiles, source.output_path(self.client.config()))?;

        if let Some(path) = &output {
            info!(path = %path.display(), "{} data saved", source.people());
        }

        Ok(CollectionOutcome {
            source,
            identities: identities.len(),
            profiles: profiles.len(),
            output,
        })
    }

    /// Stargazers first, then forks; each is independent of the other.
    pub async fn collect_all(
        &self,
        progress: &mut dyn ProgressReporter,
    ) -> Result<Vec<CollectionOutcome>> {
        let mut outcomes = Vec::with_capacity(Source::ALL.len());
        for source in Source::ALL {
            outcomes.push(self.collect(source, progress).await?);
        }
        Ok(outcomes)
    }
}
