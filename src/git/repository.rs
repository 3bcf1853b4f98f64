//! Git repository operations on the workspace checkout.
//!
//! The workflow runner has already checked the repository out into the
//! workspace. This module re-points `origin` at an authenticated URL,
//! fetches every branch and tag, and provides the branch, commit, tag and
//! push operations a release needs.
//!
//! # Authentication
//!
//! Network operations authenticate with the forge token as a plaintext
//! username/password pair over HTTPS. Signed tags are created by the `git`
//! binary because libgit2 cannot sign.
use color_eyre::eyre::eyre;
use git2::{BranchType, RemoteCallbacks, build::CheckoutBuilder};
use log::*;
use secrecy::ExposeSecret;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::GitAuthor,
    forge::config::RemoteConfig,
    git::{
        branch_name::BranchName,
        signing::SigningKey,
        traits::{Git, tag_ref},
    },
    result::Result,
    shell,
};

/// Remote every fetch and push goes through.
pub const DEFAULT_REMOTE: &str = "origin";

/// Username GitHub expects alongside a token for HTTPS git transport.
const TOKEN_USERNAME: &str = "x-access-token";

/// Create Git authentication callbacks for username/token authentication.
///
/// The token is passed as plaintext, which is appropriate for HTTPS
/// connections where the transport layer provides encryption.
fn get_auth_callbacks<'r>(user: String, token: String) -> RemoteCallbacks<'r> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username, _allowed| {
        git2::Cred::userpass_plaintext(&user, &token)
    });
    callbacks
}

/// Turn a ref update the server refused into an error. libgit2 reports
/// these only through the callback while the push itself succeeds.
fn check_ref_update(
    refname: &str,
    status: Option<&str>,
) -> std::result::Result<(), git2::Error> {
    match status {
        Some(reason) => Err(git2::Error::from_str(&format!(
            "remote rejected {refname}: {reason}"
        ))),
        None => Ok(()),
    }
}

/// Strip the remote prefix from a remote-tracking branch name, skipping the
/// symbolic `HEAD` entry.
fn remote_branch_name(tracking_name: &str) -> Option<&str> {
    let name = tracking_name
        .trim()
        .strip_prefix(&format!("{DEFAULT_REMOTE}/"))?
        .trim();

    if name.is_empty() || name == "HEAD" {
        return None;
    }

    Some(name)
}

/// Workspace checkout used by the release commands.
pub struct Repository {
    config: RemoteConfig,
    author: GitAuthor,
    repo: git2::Repository,
}

impl Repository {
    /// Open the checkout at `local_path`.
    pub fn open(
        local_path: &Path,
        config: RemoteConfig,
        author: GitAuthor,
    ) -> Result<Self> {
        let repo = git2::Repository::open(local_path)?;

        Ok(Self {
            config,
            author,
            repo,
        })
    }

    fn callbacks(&self) -> RemoteCallbacks<'static> {
        get_auth_callbacks(
            TOKEN_USERNAME.into(),
            self.config.token.expose_secret().to_string(),
        )
    }

    fn signature(&self) -> Result<git2::Signature<'static>> {
        Ok(git2::Signature::now(&self.author.name, &self.author.email)?)
    }

    fn workdir_path(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| eyre!("Repository has no working directory"))
    }

    /// Point HEAD at `branch`, updating the working tree.
    fn switch_branch(&self, branch: &BranchName) -> Result<()> {
        info!("switching to branch: {branch}");
        let ref_name = format!("refs/heads/{branch}");
        let target_obj = self.repo.revparse_single(&ref_name)?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo.checkout_tree(&target_obj, Some(&mut checkout))?;
        self.repo.set_head(&ref_name)?;
        Ok(())
    }
}

impl Git for Repository {
    fn fetch(&self) -> Result<()> {
        let url = self.config.clone_url()?;

        info!("fetching {url}");

        self.repo.remote_set_url(DEFAULT_REMOTE, url.as_str())?;

        let mut git_config = self.repo.config()?;
        git_config.set_str("user.name", &self.author.name)?;
        git_config.set_str("user.email", &self.author.email)?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(self.callbacks());

        let mut remote = self.repo.find_remote(DEFAULT_REMOTE)?;
        remote.fetch(
            &[
                "+refs/heads/*:refs/remotes/origin/*",
                "+refs/tags/*:refs/tags/*",
            ],
            Some(&mut fetch_options),
            None,
        )?;

        Ok(())
    }

    fn remote_branches(&self) -> Result<Vec<BranchName>> {
        let mut branches = vec![];

        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;

            if let Some(tracking_name) = branch.name()?
                && let Some(name) = remote_branch_name(tracking_name)
            {
                branches.push(BranchName::from_name(name)?);
            }
        }

        debug!("remote branches: {:?}", branches);

        Ok(branches)
    }

    fn checkout(&self, branch: &BranchName) -> Result<()> {
        let tracking = format!("refs/remotes/{DEFAULT_REMOTE}/{branch}");
        let commit = self.repo.find_reference(&tracking)?.peel_to_commit()?;

        // detach first: a checked out branch cannot be force-updated
        self.repo.set_head_detached(commit.id())?;
        self.repo.branch(branch.name(), &commit, true)?;
        self.switch_branch(branch)
    }

    fn checkout_tag(&self, tag: &str) -> Result<()> {
        info!("checking out tag: {tag}");
        let commit = self.repo.find_reference(&tag_ref(tag))?.peel_to_commit()?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
        self.repo.set_head_detached(commit.id())?;
        Ok(())
    }

    fn create_branch(&self, branch: &BranchName) -> Result<()> {
        info!("creating branch: {branch}");
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;
        self.repo.branch(branch.name(), &commit, false)?;
        self.switch_branch(branch)
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        debug!("committing changes with msg: {message}");
        let mut index = self.repo.index()?;
        index.add_all(["."], git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let oid = index.write_tree()?;
        let tree = self.repo.find_tree(oid)?;
        let parent_commit = self.repo.head()?.peel_to_commit()?;
        let committer = self.signature()?;
        self.repo.commit(
            Some("HEAD"),
            &committer,
            &committer,
            message,
            &tree,
            &[&parent_commit],
        )?;
        Ok(())
    }

    fn create_signed_tag(
        &self,
        tag: &str,
        message: &str,
        key: &SigningKey,
    ) -> Result<()> {
        info!("creating signed tag {tag} with key {}", key.key_id);

        let mut message_file = tempfile::NamedTempFile::new()?;
        message_file.write_all(message.as_bytes())?;
        message_file.flush()?;

        let message_path = message_file
            .path()
            .to_str()
            .ok_or(eyre!("temporary tag message path is not valid utf-8"))?
            .to_string();

        shell::run(
            "git",
            &[
                "tag",
                "--sign",
                "--local-user",
                &key.key_id,
                "--file",
                &message_path,
                "--cleanup=verbatim",
                tag,
            ],
            Some(self.workdir_path()?),
        )?;

        Ok(())
    }

    fn push(&self, local_ref: &str, remote_ref: &str) -> Result<()> {
        info!("pushing {local_ref} to {remote_ref}");
        let mut callbacks = self.callbacks();
        callbacks.push_update_reference(check_ref_update);

        let mut push_opts = git2::PushOptions::default();
        push_opts.remote_callbacks(callbacks);

        let mut remote = self.repo.find_remote(DEFAULT_REMOTE)?;

        let ref_spec = format!("{local_ref}:{remote_ref}");
        remote.push(&[ref_spec], Some(&mut push_opts))?;

        Ok(())
    }

    fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
