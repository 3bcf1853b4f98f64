use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

pub const MILESTONE_ISSUES_QUERY: &str = r#"
query GetMilestoneIssues($owner: String!, $repo: String!, $number: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    milestone(number: $number) {
      number
      title
      description
      url
      closed
      issues(first: 100, after: $cursor, states: [CLOSED]) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          number
          title
          url
          author {
            login
          }
          labels(first: 100) {
            nodes {
              name
            }
          }
        }
      }
    }
  }
}"#;

pub const MILESTONE_PULL_REQUESTS_QUERY: &str = r#"
query GetMilestonePullRequests($owner: String!, $repo: String!, $number: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    milestone(number: $number) {
      number
      title
      description
      url
      closed
      pullRequests(first: 100, after: $cursor, states: [MERGED]) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          number
          title
          url
          author {
            login
          }
          labels(first: 100) {
            nodes {
              name
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
pub struct MilestoneQueryVariables {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryAuthor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryLabels {
    pub nodes: Vec<EntryLabel>,
}

#[derive(Debug, Deserialize)]
pub struct EntryNode {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: Option<EntryAuthor>,
    pub labels: EntryLabels,
}

#[derive(Debug, Deserialize)]
pub struct EntryConnection {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub nodes: Vec<EntryNode>,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneNode {
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub closed: bool,
    // one query asks for issues, the other for pull requests
    #[serde(alias = "issues", alias = "pullRequests")]
    pub entries: EntryConnection,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneRepository {
    pub milestone: Option<MilestoneNode>,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneData {
    pub repository: MilestoneRepository,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneResult {
    pub data: MilestoneData,
}
