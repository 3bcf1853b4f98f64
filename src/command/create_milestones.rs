//! Milestone creation command implementation.
use log::*;

use crate::{
    forge::traits::Forge, git::version::SemVerVersion, result::Result,
};

/// Create the milestones of the patch, minor and major releases that may
/// follow `version`.
pub async fn execute(
    forge: &dyn Forge,
    version: &SemVerVersion,
) -> Result<()> {
    let next_versions =
        [version.next_patch(), version.next_minor(), version.next_major()];

    for next in next_versions {
        let title = next.full_release_name();

        if forge.create_milestone(&title).await? {
            info!("created milestone {title}");
        } else {
            info!("milestone {title} already exists: skipping");
        }
    }

    Ok(())
}
