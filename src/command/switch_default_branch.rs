//! Default branch rotation command implementation.
use log::*;

use crate::{command::common::ReleaseContext, result::Result};

/// Make the branch of the minor release after the released version the
/// repository's default branch, creating it from the newest release branch
/// when it does not exist yet.
pub async fn execute(ctx: &ReleaseContext<'_>) -> Result<()> {
    let version = ctx.version;
    let candidates = ctx.candidate_branches()?;

    let Some(newest) = candidates.newest_release_branch() else {
        info!("repository has no release branches: nothing to do");
        return Ok(());
    };

    let next = candidates.newest_future_release_branch_after(&version);

    if !candidates.contains(&next) {
        info!("creating release branch {next} from {newest}");
        ctx.git.checkout(newest)?;
        ctx.git.create_branch(&next)?;

        let next_version = next.target_minor_release_version()?;
        ctx.add_changelog_entry(&next_version)?;

        ctx.push_branch(&next)?;
    }

    info!("switching default branch to {next}");
    ctx.forge.set_default_branch(&next).await?;

    Ok(())
}
