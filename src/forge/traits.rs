//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    forge::request::{
        CreatePrRequest, CreateReleaseRequest, Milestone, PullRequest, Release,
    },
    git::branch_name::BranchName,
    result::Result,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    async fn get_milestone(&self, number: u64) -> Result<Milestone>;
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
    async fn set_default_branch(&self, branch: &BranchName) -> Result<()>;
    /// Returns `false` when a milestone with that title already exists.
    async fn create_milestone(&self, title: &str) -> Result<bool>;
}
