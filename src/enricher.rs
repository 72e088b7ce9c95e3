use crate::github::GitHubClient;
use crate::models::{Identity, UserProfile};
use crate::progress::ProgressReporter;
use tracing::{debug, info};

/// Turns identities into profile records, one user lookup each.
pub struct UserEnricher<'a> {
    client: &'a GitHubClient,
}

impl<'a> UserEnricher<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Users whose lookup fails are left out of the result.
    pub async fn enrich(
        &self,
        identities: &[Identity],
        progress: &mut dyn ProgressReporter,
    ) -> Vec<UserProfile> {
        progress.start("Collecting user info", Some(identities.len() as u64));

        let mut profiles = Vec::with_capacity(identities.len());
        for identity in identities {
            match self.client.get_user(identity.login()).await {
                Some(detail) => profiles.push(UserProfile::from(detail)),
                None => debug!(login = %identity, "Skipping user without profile data"),
            }
            progress.advance(1);
            progress.collected(profiles.len() as u64);
        }

        progress.finish();
        info!(
            requested = identities.len(),
            collected = profiles.len(),
            "User enrichment complete"
        );
        profiles
    }
}
