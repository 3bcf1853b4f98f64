use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A closed issue or merged pull request assigned to a milestone.
pub struct MilestoneEntry {
    pub number: u64,
    pub title: String,
    pub url: String,
    /// Login of the author, empty for deleted accounts.
    pub author: String,
    pub labels: Vec<String>,
    pub is_pull_request: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Milestone with everything needed to write release notes for it.
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub closed: bool,
    pub entries: Vec<MilestoneEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Pull request information.
pub struct PullRequest {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to publish a release for an already pushed tag.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub name: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Published release.
pub struct Release {
    pub url: String,
}
