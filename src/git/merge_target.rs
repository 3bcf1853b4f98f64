//! Resolution of the release branch that receives a version, and of the
//! branch that release is merged up into.
//!
//! The candidate set is built once per run from every branch the remote
//! reports. Non-release branches (`master`, `develop`, topic branches) are
//! dropped and the remaining release branches are kept in ascending
//! `(major, minor)` order. All queries are pure scans over that sequence.
//!
//! The ascending scan in [`MergeTargetCandidateBranches::target_branch_for`]
//! stops at the first branch newer than the requested version. A version
//! whose release line has no branch therefore never falls back to an older
//! line: `1.1.5` with only `1.0.x` and `1.2.x` present has no target.
use log::*;

use crate::git::{
    branch_name::{BranchName, ReleaseLine},
    version::SemVerVersion,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    line: ReleaseLine,
    branch: BranchName,
}

/// Ordered release branches of a repository at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeTargetCandidateBranches {
    sorted: Vec<Candidate>,
}

impl MergeTargetCandidateBranches {
    /// Build the candidate set from every branch known to the remote.
    ///
    /// When two branches name the same release line (`1.2` and `1.2.x`) the
    /// one listed first is kept and the other is ignored.
    pub fn from_all_branches(
        branches: impl IntoIterator<Item = BranchName>,
    ) -> Self {
        let mut release_branches = branches
            .into_iter()
            .filter_map(|branch| {
                branch
                    .release_line()
                    .map(|line| Candidate { line, branch })
            })
            .collect::<Vec<Candidate>>();

        // stable: ties keep their input order
        release_branches.sort_by_key(|c| c.line);

        let mut sorted: Vec<Candidate> = Vec::with_capacity(release_branches.len());

        for candidate in release_branches {
            if let Some(kept) = sorted.last()
                && kept.line == candidate.line
            {
                warn!(
                    "ignoring branch {}: release line {}.{} is already covered by branch {}",
                    candidate.branch,
                    candidate.line.major,
                    candidate.line.minor,
                    kept.branch
                );
                continue;
            }

            sorted.push(candidate);
        }

        debug!(
            "merge target candidates: {:?}",
            sorted.iter().map(|c| c.branch.name()).collect::<Vec<&str>>()
        );

        Self { sorted }
    }

    /// Release branches in ascending order.
    pub fn branches(&self) -> impl Iterator<Item = &BranchName> {
        self.sorted.iter().map(|c| &c.branch)
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The branch a release of `version` must be made from, if it exists.
    pub fn target_branch_for(
        &self,
        version: &SemVerVersion,
    ) -> Option<&BranchName> {
        self.target_index_for(version).map(|idx| &self.sorted[idx].branch)
    }

    /// The next newer release branch that should receive a merge of the
    /// branch `version` was released from. `None` when there is no target
    /// or the target is already the newest release branch.
    pub fn branch_to_merge_up(
        &self,
        version: &SemVerVersion,
    ) -> Option<&BranchName> {
        let target_idx = self.target_index_for(version)?;
        let target = &self.sorted[target_idx];
        let last = self.sorted.last()?;

        let candidate = self.sorted.get(target_idx + 1).unwrap_or(last);

        if candidate.branch == target.branch {
            return None;
        }

        Some(&candidate.branch)
    }

    pub fn newest_release_branch(&self) -> Option<&BranchName> {
        self.sorted.last().map(|c| &c.branch)
    }

    /// The branch that should become the default branch once the minor
    /// release following `version` is under development. Falls back to a
    /// `{major}.{minor}.x` name for that next minor when no existing branch
    /// qualifies; that branch may still have to be created.
    pub fn newest_future_release_branch_after(
        &self,
        version: &SemVerVersion,
    ) -> BranchName {
        let next_minor = version.next_minor();

        self.sorted
            .iter()
            .rev()
            .find(|c| {
                next_minor.less_than_equal(&c.line.target_minor_release_version())
            })
            .map(|c| c.branch.clone())
            .unwrap_or_else(|| next_minor.target_release_branch_name())
    }

    pub fn contains(&self, needle: &BranchName) -> bool {
        self.sorted.iter().any(|c| &c.branch == needle)
    }

    fn target_index_for(&self, version: &SemVerVersion) -> Option<usize> {
        for (idx, candidate) in self.sorted.iter().enumerate() {
            if candidate.line.is_newer_than(version) {
                return None;
            }

            if candidate.line.is_for_version(version) {
                return Some(idx);
            }
        }

        None
    }
}
