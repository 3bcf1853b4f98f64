//! Changelog bump command implementation.
use log::*;

use crate::{command::common::ReleaseContext, result::Result};

/// Prepare the release branch's changelog for the next patch release.
pub async fn execute(ctx: &ReleaseContext<'_>) -> Result<()> {
    let version = ctx.version;
    let candidates = ctx.candidate_branches()?;

    let Some(target) = candidates.target_branch_for(&version) else {
        info!("no release branch found for {version}: nothing to do");
        return Ok(());
    };

    ctx.git.checkout(target)?;

    let next = version.next_patch();

    if ctx.add_changelog_entry(&next)? {
        ctx.push_branch(target)?;
    }

    Ok(())
}
