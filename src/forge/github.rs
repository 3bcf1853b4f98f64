//! Implements the Forge trait for Github
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;

mod graphql;

use crate::{
    error::AutoreleaseError,
    forge::{
        config::RemoteConfig,
        request::{
            CreatePrRequest, CreateReleaseRequest, Milestone, MilestoneEntry,
            PullRequest, Release,
        },
        traits::Forge,
    },
    git::branch_name::BranchName,
    result::Result,
};

use graphql::{
    MILESTONE_ISSUES_QUERY, MILESTONE_PULL_REQUESTS_QUERY, MilestoneNode,
    MilestoneQueryVariables, MilestoneResult,
};

/// GitHub forge implementation using Octocrab for milestones, pull
/// requests, releases and repository settings.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_base_uri.clone())?
            .build()?;

        Ok(Self { config, instance })
    }

    /// Walk every page of one milestone query, returning the milestone as
    /// seen on the first page and all entries.
    async fn query_milestone(
        &self,
        query: &str,
        number: u64,
        is_pull_request: bool,
    ) -> Result<(Milestone, Vec<MilestoneEntry>)> {
        let mut milestone = None;
        let mut entries = vec![];
        let mut cursor = None;

        loop {
            let vars = MilestoneQueryVariables {
                owner: self.config.owner.clone(),
                repo: self.config.repo.clone(),
                number,
                cursor: cursor.clone(),
            };

            let json = serde_json::json!({
              "query": query,
              "variables": vars,
            });

            let result: MilestoneResult = self.instance.graphql(&json).await?;

            let node: MilestoneNode =
                result.data.repository.milestone.ok_or(eyre!(
                    "milestone {number} not found in {}",
                    self.config.full_name()
                ))?;

            if milestone.is_none() {
                milestone = Some(Milestone {
                    number: node.number,
                    title: node.title.clone(),
                    description: node.description.clone().unwrap_or_default(),
                    url: node.url.clone(),
                    closed: node.closed,
                    entries: vec![],
                });
            }

            entries.extend(node.entries.nodes.into_iter().map(|n| {
                MilestoneEntry {
                    number: n.number,
                    title: n.title,
                    url: n.url,
                    author: n.author.map(|a| a.login).unwrap_or_default(),
                    labels: n
                        .labels
                        .nodes
                        .into_iter()
                        .map(|l| l.name)
                        .collect(),
                    is_pull_request,
                }
            }));

            match node.entries.page_info.end_cursor {
                Some(end) if node.entries.page_info.has_next_page => {
                    cursor = Some(end)
                }
                _ => break,
            }
        }

        let milestone =
            milestone.ok_or(eyre!("milestone {number} returned no data"))?;

        Ok((milestone, entries))
    }
}

#[async_trait]
impl Forge for Github {
    async fn get_milestone(&self, number: u64) -> Result<Milestone> {
        info!("fetching milestone {number} of {}", self.config.full_name());

        let (mut milestone, issues) = self
            .query_milestone(MILESTONE_ISSUES_QUERY, number, false)
            .await?;

        let (_, pulls) = self
            .query_milestone(MILESTONE_PULL_REQUESTS_QUERY, number, true)
            .await?;

        milestone.entries = issues.into_iter().chain(pulls).collect();
        milestone.entries.sort_by_key(|e| e.number);

        debug!(
            "milestone {number} has {} closed entries",
            milestone.entries.len()
        );

        Ok(milestone)
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.name)
            .body(&req.body)
            .draft(false)
            .prerelease(false)
            .send()
            .await?;

        Ok(Release {
            url: release.html_url.to_string(),
        })
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.head_branch, req.base_branch)
            .body(req.body)
            .send()
            .await?;

        Ok(PullRequest {
            number: pr.number,
            url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
        })
    }

    async fn set_default_branch(&self, branch: &BranchName) -> Result<()> {
        let endpoint =
            format!("/repos/{}/{}", self.config.owner, self.config.repo);

        let _: serde_json::Value = self
            .instance
            .patch(
                endpoint,
                Some(&serde_json::json!({
                  "default_branch": branch.name(),
                })),
            )
            .await?;

        Ok(())
    }

    async fn create_milestone(&self, title: &str) -> Result<bool> {
        let endpoint = format!(
            "/repos/{}/{}/milestones",
            self.config.owner, self.config.repo
        );

        let result: std::result::Result<serde_json::Value, octocrab::Error> =
            self.instance
                .post(endpoint, Some(&serde_json::json!({ "title": title })))
                .await;

        match result {
            Ok(_) => Ok(true),
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::UNPROCESSABLE_ENTITY =>
            {
                debug!("milestone {title} rejected: {}", source.message);
                Ok(false)
            }
            Err(err) => Err(AutoreleaseError::from(err).into()),
        }
    }
}
