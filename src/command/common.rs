//! Shared setup and helpers used across release commands.
use log::*;
use std::path::PathBuf;

use crate::{
    changelog::keep_a_changelog::KeepAChangelog,
    config::Environment,
    event::MilestoneClosedEvent,
    forge::traits::Forge,
    git::{
        branch_name::BranchName,
        merge_target::MergeTargetCandidateBranches,
        traits::{Git, branch_ref},
        version::SemVerVersion,
    },
    result::Result,
};

/// Everything a command needs to act on one closed milestone.
pub struct ReleaseContext<'a> {
    pub git: &'a dyn Git,
    pub forge: &'a dyn Forge,
    pub env: &'a Environment,
    pub event: &'a MilestoneClosedEvent,
    pub version: SemVerVersion,
}

impl<'a> ReleaseContext<'a> {
    pub fn new(
        git: &'a dyn Git,
        forge: &'a dyn Forge,
        env: &'a Environment,
        event: &'a MilestoneClosedEvent,
    ) -> Result<Self> {
        let version = event.version()?;

        Ok(Self {
            git,
            forge,
            env,
            event,
            version,
        })
    }

    /// Changelog location inside the checkout.
    pub fn changelog_path(&self) -> PathBuf {
        self.git.workdir().join(&self.env.changelog_file)
    }

    /// Fetch the remote and classify its branches.
    pub fn candidate_branches(&self) -> Result<MergeTargetCandidateBranches> {
        self.git.fetch()?;
        let branches = self.git.remote_branches()?;
        let candidates =
            MergeTargetCandidateBranches::from_all_branches(branches);

        debug!(
            "release branches: {:?}",
            candidates
                .branches()
                .map(|b| b.name())
                .collect::<Vec<&str>>()
        );

        Ok(candidates)
    }

    /// Add an unreleased entry for `version` to the changelog of the
    /// current checkout and commit it. Returns false when there is no
    /// changelog or it already has the entry.
    pub fn add_changelog_entry(
        &self,
        version: &SemVerVersion,
    ) -> Result<bool> {
        let Some(mut changelog) = KeepAChangelog::open(&self.changelog_path())?
        else {
            info!("no changelog found: skipping entry for {version}");
            return Ok(false);
        };

        if !changelog.add_release(version) {
            return Ok(false);
        }

        changelog.write()?;
        self.git
            .commit_all(&format!("Bumps changelog version to {version}"))?;

        Ok(true)
    }

    pub fn push_branch(&self, branch: &BranchName) -> Result<()> {
        let reference = branch_ref(branch);
        self.git.push(&reference, &reference)
    }
}

/// Whether the run should go ahead for `event`.
pub fn is_actionable(event: &MilestoneClosedEvent) -> bool {
    if !event.is_closed() {
        info!(
            "milestone event action is '{}', not '{}': nothing to do",
            event.action,
            crate::event::CLOSED_ACTION
        );
        return false;
    }

    true
}
