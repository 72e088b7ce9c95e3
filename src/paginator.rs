use crate::github::{GitHubClient, PER_PAGE};
use crate::progress::ProgressReporter;
use crate::types::GitHubRepo;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Repository counter used as the expected total of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Stargazers,
    Forks,
}

impl CountField {
    pub fn read(&self, repo: &GitHubRepo) -> u32 {
        match self {
            CountField::Stargazers => repo.stargazers_count,
            CountField::Forks => repo.forks_count,
        }
    }
}

pub struct Paginator<'a> {
    client: &'a GitHubClient,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Fetch every page of `endpoint` until one comes back empty.
    ///
    /// A failed page counts as empty, so collection ends there with the
    /// items gathered so far.
    pub async fn collect<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        label: &str,
        count_field: Option<CountField>,
        progress: &mut dyn ProgressReporter,
    ) -> Vec<T> {
        let total = match count_field {
            Some(field) => {
                let total = self
                    .client
                    .get_repository()
                    .await
                    .map(|repo| field.read(&repo))
                    .unwrap_or(0);
                Some(u64::from(total))
            }
            None => None,
        };
        progress.start(label, total);

        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let query = [("page", page.to_string()), ("per_page", PER_PAGE.to_string())];
            let batch: Vec<T> = match self.client.get_json(endpoint, &query).await {
                Some(batch) => batch,
                None => Vec::new(),
            };
            if batch.is_empty() {
                debug!(endpoint, page, "Empty page, stopping");
                break;
            }

            debug!(endpoint, page, count = batch.len(), "Fetched page");
            progress.advance(batch.len() as u64);
            items.extend(batch);
            page += 1;
        }

        progress.finish();
        info!(endpoint, items = items.len(), pages = page - 1, "Pagination complete");
        items
    }
}
