//! Runtime configuration read from the process environment.
//!
//! The tool is meant to run as a workflow step, so everything it needs is
//! handed over through environment variables:
//!
//! | variable               | required | default                  |
//! |------------------------|----------|--------------------------|
//! | `GITHUB_TOKEN`         | yes      |                          |
//! | `GIT_AUTHOR_NAME`      | yes      |                          |
//! | `GIT_AUTHOR_EMAIL`     | yes      |                          |
//! | `GITHUB_EVENT_PATH`    | yes      |                          |
//! | `SIGNING_SECRET_KEY`   | release  |                          |
//! | `GITHUB_WORKSPACE`     | no       | `.`                      |
//! | `GITHUB_API_URL`       | no       | `https://api.github.com` |
//! | `GITHUB_SERVER_URL`    | no       | `https://github.com`     |
//! | `TWITTER_ACCESS_TOKEN` | no       | announcements disabled   |
//! | `CHANGELOG_FILE`       | no       | `CHANGELOG.md`           |
use derive_builder::Builder;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::error::{AutoreleaseError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const DEFAULT_WORKSPACE: &str = ".";

/// Identity used for commits and tags created during a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitAuthor {
    pub name: String,
    pub email: String,
}

/// Resolved environment for a single run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Environment {
    /// Token used for the GitHub API and for authenticated git transport.
    pub github_token: SecretString,
    /// ASCII armored secret key used to sign release tags.
    #[builder(default, setter(strip_option))]
    pub signing_secret_key: Option<SecretString>,
    pub git_author: GitAuthor,
    /// Path to the JSON payload of the triggering event.
    pub event_path: PathBuf,
    /// Local checkout of the repository being released.
    #[builder(default = "PathBuf::from(DEFAULT_WORKSPACE)")]
    pub workspace: PathBuf,
    #[builder(default = "DEFAULT_API_URL.to_string()")]
    pub api_url: String,
    #[builder(default = "DEFAULT_SERVER_URL.to_string()")]
    pub server_url: String,
    /// Enables release announcements when present.
    #[builder(default, setter(strip_option))]
    pub twitter_access_token: Option<SecretString>,
    /// Keep-a-changelog file, relative to the workspace.
    #[builder(default = "DEFAULT_CHANGELOG_FILE.to_string()")]
    pub changelog_file: String,
}

impl Environment {
    /// Read the environment of the current process.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_token: SecretString::from(required("GITHUB_TOKEN")?),
            signing_secret_key: optional("SIGNING_SECRET_KEY")
                .map(SecretString::from),
            git_author: GitAuthor {
                name: required("GIT_AUTHOR_NAME")?,
                email: required("GIT_AUTHOR_EMAIL")?,
            },
            event_path: PathBuf::from(required("GITHUB_EVENT_PATH")?),
            workspace: PathBuf::from(
                optional("GITHUB_WORKSPACE")
                    .unwrap_or_else(|| DEFAULT_WORKSPACE.into()),
            ),
            api_url: optional("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            server_url: optional("GITHUB_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.into()),
            twitter_access_token: optional("TWITTER_ACCESS_TOKEN")
                .map(SecretString::from),
            changelog_file: optional("CHANGELOG_FILE")
                .unwrap_or_else(|| DEFAULT_CHANGELOG_FILE.into()),
        })
    }

    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Absolute location of the changelog inside the workspace.
    pub fn changelog_path(&self) -> PathBuf {
        self.workspace.join(&self.changelog_file)
    }

    /// The signing key, which only the release command needs.
    pub fn require_signing_secret_key(&self) -> Result<&SecretString> {
        self.signing_secret_key
            .as_ref()
            .ok_or_else(|| AutoreleaseError::missing_env("SIGNING_SECRET_KEY"))
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| AutoreleaseError::missing_env(name))
}
