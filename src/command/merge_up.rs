//! Merge-up pull request command implementation.
use log::*;
use nanoid::nanoid;

use crate::{
    changelog::release_text::ReleaseTextChain,
    command::common::ReleaseContext,
    forge::{
        config::{MERGE_UP_BRANCH_INFIX, MERGE_UP_SUFFIX_LENGTH},
        request::CreatePrRequest,
    },
    git::branch_name::BranchName,
    result::Result,
};

/// Name of the temporary branch carrying `target` into `merge_up`.
pub fn merge_up_branch_name(
    target: &BranchName,
    merge_up: &BranchName,
) -> String {
    format!(
        "{target}-{MERGE_UP_BRANCH_INFIX}-{merge_up}_{}",
        nanoid!(MERGE_UP_SUFFIX_LENGTH)
    )
}

/// Open a pull request merging the released branch into the next newer
/// release branch.
pub async fn execute(ctx: &ReleaseContext<'_>) -> Result<()> {
    let version = ctx.version;
    let candidates = ctx.candidate_branches()?;

    let Some(merge_up) = candidates.branch_to_merge_up(&version) else {
        info!("no newer release branch to merge {version} into");
        return Ok(());
    };

    let Some(target) = candidates.target_branch_for(&version) else {
        info!("no release branch found for {version}: nothing to do");
        return Ok(());
    };

    info!("merging {version} from {target} up into {merge_up}");
    // the release branch may have moved on since tagging
    ctx.git.checkout_tag(&version.full_release_name())?;

    let milestone =
        ctx.forge.get_milestone(ctx.event.milestone_number).await?;
    let release_text = ReleaseTextChain::standard(ctx.changelog_path())
        .create(&milestone, &version)?;

    let head_branch =
        BranchName::from_name(&merge_up_branch_name(target, merge_up))?;
    ctx.git.create_branch(&head_branch)?;
    ctx.push_branch(&head_branch)?;

    let pr = ctx
        .forge
        .create_pr(CreatePrRequest {
            head_branch: head_branch.name().to_string(),
            base_branch: merge_up.name().to_string(),
            title: format!("Merge release {version} into {merge_up}"),
            body: release_text,
        })
        .await?;

    info!("opened merge-up pull request #{}: {}", pr.number, pr.url);

    Ok(())
}
