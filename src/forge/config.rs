//! Configuration for the GitHub connection of a single repository.
use secrecy::SecretString;
use url::Url;

use crate::{
    config::Environment,
    error::{AutoreleaseError, Result},
};

/// Separates the source and destination branch in merge-up branch names.
pub const MERGE_UP_BRANCH_INFIX: &str = "merge-up-into";
/// Length of the random suffix that keeps merge-up branch names unique.
pub const MERGE_UP_SUFFIX_LENGTH: usize = 8;

/// Remote repository connection configuration for authenticating and
/// interacting with GitHub.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST/GraphQL API base (e.g. "https://api.github.com").
    pub api_base_uri: String,
    /// Web base used for clone URLs and links (e.g. "https://github.com").
    pub server_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl RemoteConfig {
    /// Build from an `owner/name` repository name as found in event
    /// payloads.
    pub fn new(full_name: &str, env: &Environment) -> Result<Self> {
        let (owner, repo) = full_name
            .split_once('/')
            .filter(|(owner, repo)| {
                !owner.is_empty() && !repo.is_empty() && !repo.contains('/')
            })
            .ok_or_else(|| {
                AutoreleaseError::invalid_config(format!(
                    "repository name must be <owner>/<name>, got '{full_name}'"
                ))
            })?;

        Ok(Self {
            api_base_uri: env.api_url.trim_end_matches('/').to_string(),
            server_url: env.server_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: env.github_token.clone(),
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// HTTPS clone URL, without credentials.
    pub fn clone_url(&self) -> Result<Url> {
        let url = Url::parse(&format!(
            "{}/{}/{}.git",
            self.server_url, self.owner, self.repo
        ))?;

        Ok(url)
    }
}
