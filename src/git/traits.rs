//! Traits related to the local git checkout
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;

use crate::{
    git::{branch_name::BranchName, signing::SigningKey},
    result::Result,
};

#[cfg_attr(test, automock)]
pub trait Git {
    /// Point `origin` at the authenticated remote and fetch all branches
    /// and tags.
    fn fetch(&self) -> Result<()>;
    /// Branches of `origin`, without the remote prefix.
    fn remote_branches(&self) -> Result<Vec<BranchName>>;
    /// Reset the local branch to `origin/<branch>` and switch to it.
    fn checkout(&self, branch: &BranchName) -> Result<()>;
    /// Detach HEAD at the commit `tag` points to.
    fn checkout_tag(&self, tag: &str) -> Result<()>;
    /// Create a local branch at HEAD and switch to it.
    fn create_branch(&self, branch: &BranchName) -> Result<()>;
    fn commit_all(&self, message: &str) -> Result<()>;
    fn create_signed_tag(
        &self,
        tag: &str,
        message: &str,
        key: &SigningKey,
    ) -> Result<()>;
    /// Push a local ref (`refs/heads/..`, `refs/tags/..`) to a remote ref.
    fn push(&self, local_ref: &str, remote_ref: &str) -> Result<()>;
    fn workdir(&self) -> PathBuf;
}

pub fn branch_ref(branch: &BranchName) -> String {
    format!("refs/heads/{branch}")
}

pub fn tag_ref(tag: &str) -> String {
    format!("refs/tags/{tag}")
}
