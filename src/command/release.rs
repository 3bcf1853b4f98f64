//! Final release publication and tagging command implementation.
use chrono::NaiveDate;
use log::*;

use crate::{
    announcement::{Announcement, Announcer},
    changelog::{
        keep_a_changelog::KeepAChangelog, release_text::ReleaseTextChain,
    },
    command::common::ReleaseContext,
    forge::request::CreateReleaseRequest,
    git::{signing::SigningKey, traits::tag_ref},
    result::Result,
};

/// Tag, sign and publish the release of the closed milestone.
///
/// The release is made from the branch the engine resolves for the
/// version. When there is none, the milestone does not belong to a release
/// line of this repository and nothing is done.
pub async fn execute<F>(
    ctx: &ReleaseContext<'_>,
    announcer: Option<&dyn Announcer>,
    today: NaiveDate,
    import_key: F,
) -> Result<()>
where
    F: FnOnce() -> Result<SigningKey>,
{
    let version = ctx.version;
    let candidates = ctx.candidate_branches()?;

    let Some(target) = candidates.target_branch_for(&version) else {
        info!("no release branch found for {version}: nothing to release");
        return Ok(());
    };

    info!("releasing {version} from {target}");
    ctx.git.checkout(target)?;

    let milestone =
        ctx.forge.get_milestone(ctx.event.milestone_number).await?;

    if date_changelog_entry(ctx, today)? {
        ctx.push_branch(target)?;
    }

    let release_text = ReleaseTextChain::standard(ctx.changelog_path())
        .create(&milestone, &version)?;

    let key = import_key()?;
    let tag = version.full_release_name();

    ctx.git.create_signed_tag(&tag, &release_text, &key)?;
    ctx.git.push(&tag_ref(&tag), &tag_ref(&tag))?;

    let release = ctx
        .forge
        .create_release(CreateReleaseRequest {
            tag: tag.clone(),
            name: tag,
            body: release_text,
        })
        .await?;

    info!("published release: {}", release.url);

    if let Some(announcer) = announcer {
        let announcement = Announcement::for_release(
            &ctx.event.repository_full_name,
            &version,
            &release.url,
        );
        announcer.announce(&announcement).await?;
    }

    Ok(())
}

/// Replace the `TBD` date of the release entry and commit the change.
fn date_changelog_entry(
    ctx: &ReleaseContext<'_>,
    today: NaiveDate,
) -> Result<bool> {
    let Some(mut changelog) = KeepAChangelog::open(&ctx.changelog_path())?
    else {
        return Ok(false);
    };

    if !changelog.set_release_date(&ctx.version, today) {
        debug!("changelog entry of {} is already dated", ctx.version);
        return Ok(false);
    }

    changelog.write()?;
    ctx.git
        .commit_all(&format!("Sets release date of {}", ctx.version))?;

    Ok(true)
}
