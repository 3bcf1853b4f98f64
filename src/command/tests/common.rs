//! Common test utilities for command tests.
use std::{fs, path::Path};
use tempfile::TempDir;

use crate::{
    command::common::{ReleaseContext, is_actionable},
    config::Environment,
    event::MilestoneClosedEvent,
    forge::traits::MockForge,
    git::traits::MockGit,
    test_helpers::{branches, create_test_environment, create_test_event},
};

/// A checkout directory, optionally holding a changelog.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn with_changelog(content: &str) -> Self {
        let workspace = Self::new();
        fs::write(workspace.changelog_path(), content).unwrap();
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn changelog_path(&self) -> std::path::PathBuf {
        self.dir.path().join("CHANGELOG.md")
    }

    pub fn changelog(&self) -> String {
        fs::read_to_string(self.changelog_path()).unwrap()
    }
}

/// Creates a MockGit whose remote has `names` as branches and whose
/// checkout lives in `workdir`. The remote is expected to be fetched once.
///
/// # Example
/// ```ignore
/// let mut git = mock_git(&["1.2.x", "master"], workspace.path());
/// git.expect_checkout().returning(|_| Ok(()));
/// ```
pub fn mock_git(names: &[&str], workdir: &Path) -> MockGit {
    let mut git = MockGit::new();

    git.expect_fetch().times(1).returning(|| Ok(()));

    let remote = branches(names);
    git.expect_remote_branches()
        .returning(move || Ok(remote.clone()));

    let workdir = workdir.to_path_buf();
    git.expect_workdir().returning(move || workdir.clone());

    git
}

/// Expect exactly one checkout, of `name`.
pub fn expect_checkout(git: &mut MockGit, name: &'static str) {
    git.expect_checkout()
        .withf(move |branch| branch.name() == name)
        .times(1)
        .returning(|_| Ok(()));
}

/// Expect exactly one tag checkout, of `tag`.
pub fn expect_tag_checkout(git: &mut MockGit, tag: &'static str) {
    git.expect_checkout_tag()
        .withf(move |t| t == tag)
        .times(1)
        .returning(|_| Ok(()));
}

/// Expect exactly one push of `local` to `remote`.
pub fn expect_push(
    git: &mut MockGit,
    local: &'static str,
    remote: &'static str,
) {
    git.expect_push()
        .withf(move |l, r| l == local && r == remote)
        .times(1)
        .returning(|_, _| Ok(()));
}

pub struct Fixture {
    pub env: Environment,
    pub event: MilestoneClosedEvent,
}

impl Fixture {
    pub fn new(title: &str) -> Self {
        Self {
            env: create_test_environment(),
            event: create_test_event(title),
        }
    }

    pub fn context<'a>(
        &'a self,
        git: &'a MockGit,
        forge: &'a MockForge,
    ) -> ReleaseContext<'a> {
        ReleaseContext::new(git, forge, &self.env, &self.event).unwrap()
    }
}

#[test]
fn only_closed_milestones_are_actionable() {
    let mut event = create_test_event("1.2.3");
    assert!(is_actionable(&event));

    event.action = "created".into();
    assert!(!is_actionable(&event));
}

#[test]
fn context_rejects_non_version_titles() {
    let fixture = Fixture::new("Someday");
    let git = MockGit::new();
    let forge = MockForge::new();

    assert!(
        ReleaseContext::new(&git, &forge, &fixture.env, &fixture.event)
            .is_err()
    );
}

#[test]
fn context_resolves_changelog_in_checkout() {
    let workspace = Workspace::new();
    let fixture = Fixture::new("v1.2.3");

    let mut git = MockGit::new();
    let workdir = workspace.path().to_path_buf();
    git.expect_workdir().returning(move || workdir.clone());
    let forge = MockForge::new();

    let ctx = fixture.context(&git, &forge);

    assert_eq!(ctx.version.full_release_name(), "1.2.3");
    assert_eq!(ctx.changelog_path(), workspace.changelog_path());
}

#[test]
fn adding_changelog_entry_commits_only_when_changed() {
    let workspace = Workspace::with_changelog("# Changelog\n\n## 1.2.3 - TBD\n");
    let fixture = Fixture::new("1.2.3");

    let mut git = MockGit::new();
    let workdir = workspace.path().to_path_buf();
    git.expect_workdir().returning(move || workdir.clone());
    git.expect_commit_all()
        .withf(|msg| msg == "Bumps changelog version to 1.2.4")
        .times(1)
        .returning(|_| Ok(()));
    let forge = MockForge::new();

    let ctx = fixture.context(&git, &forge);
    let next = ctx.version.next_patch();

    assert!(ctx.add_changelog_entry(&next).unwrap());
    // second time the entry already exists
    assert!(!ctx.add_changelog_entry(&next).unwrap());

    assert!(workspace.changelog().contains("## 1.2.4 - TBD"));
}

#[test]
fn candidate_branches_ignore_non_release_branches() {
    let workspace = Workspace::new();
    let fixture = Fixture::new("1.2.3");
    let git =
        mock_git(&["master", "1.2.x", "feature/login", "1.1"], workspace.path());
    let forge = MockForge::new();

    let ctx = fixture.context(&git, &forge);
    let candidates = ctx.candidate_branches().unwrap();

    assert_eq!(
        candidates.branches().map(|b| b.name()).collect::<Vec<&str>>(),
        vec!["1.1", "1.2.x"]
    );
}
