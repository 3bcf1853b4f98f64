//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures so individual test suites only
//! spell out what they actually vary.
use secrecy::SecretString;

use crate::{
    config::{Environment, GitAuthor},
    event::MilestoneClosedEvent,
    forge::{
        config::RemoteConfig,
        request::{Milestone, MilestoneEntry},
    },
    git::branch_name::BranchName,
};

pub fn create_test_author() -> GitAuthor {
    GitAuthor {
        name: "Release Bot".to_string(),
        email: "bot@example.com".to_string(),
    }
}

/// Creates a test Environment pointing at github.com with no signing key
/// and announcements disabled.
pub fn create_test_environment() -> Environment {
    Environment::builder()
        .github_token(SecretString::from("test-token".to_string()))
        .git_author(create_test_author())
        .event_path("/tmp/event.json")
        .build()
        .unwrap()
}

/// Creates a test RemoteConfig for `test/repo`.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        api_base_uri: "https://api.github.com".to_string(),
        server_url: "https://github.com".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a closed milestone event for `acme/widgets`.
pub fn create_test_event(title: &str) -> MilestoneClosedEvent {
    MilestoneClosedEvent {
        action: "closed".to_string(),
        repository_full_name: "acme/widgets".to_string(),
        milestone_title: title.to_string(),
        milestone_number: 1,
    }
}

/// Creates an empty closed milestone of `acme/widgets` with number 1.
pub fn create_test_milestone(title: &str) -> Milestone {
    Milestone {
        number: 1,
        title: title.to_string(),
        description: "".to_string(),
        url: "https://github.com/acme/widgets/milestone/1".to_string(),
        closed: true,
        entries: vec![],
    }
}

pub fn create_test_entry(
    number: u64,
    title: &str,
    author: &str,
    labels: &[&str],
    is_pull_request: bool,
) -> MilestoneEntry {
    let kind = if is_pull_request { "pull" } else { "issues" };

    MilestoneEntry {
        number,
        title: title.to_string(),
        url: format!("https://github.com/acme/widgets/{kind}/{number}"),
        author: author.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        is_pull_request,
    }
}

/// Parses branch names, panicking on invalid ones.
pub fn branches(names: &[&str]) -> Vec<BranchName> {
    names
        .iter()
        .map(|name| BranchName::from_name(name).unwrap())
        .collect()
}

pub fn branch(name: &str) -> BranchName {
    BranchName::from_name(name).unwrap()
}
