//! Release workflow commands.
//!
//! Every command reacts to a closed milestone: it loads the environment
//! and the event, wires up the real git checkout and GitHub client, and
//! hands them to the command's `execute` function as trait objects.
use log::*;

use crate::{
    announcement::{Announcer, Twitter},
    cli::Command,
    config::Environment,
    event::MilestoneClosedEvent,
    forge::{config::RemoteConfig, github::Github},
    git::{repository::Repository, signing::SigningKey},
    result::Result,
};

pub mod bump_changelog;
pub mod common;
pub mod create_milestones;
pub mod merge_up;
pub mod release;
pub mod switch_default_branch;

use common::ReleaseContext;

/// Run `command` against the repository and milestone described by the
/// process environment.
pub async fn run(command: Command) -> Result<()> {
    let env = Environment::from_env()?;
    let event = MilestoneClosedEvent::load(&env.event_path)?;

    if !common::is_actionable(&event) {
        return Ok(());
    }

    info!(
        "running {:?} for milestone {} ({}) of {}",
        command,
        event.milestone_title,
        event.milestone_number,
        event.repository_full_name
    );

    let remote_config = RemoteConfig::new(&event.repository_full_name, &env)?;
    let forge = Github::new(remote_config.clone())?;

    let open_checkout = || {
        Repository::open(
            &env.workspace,
            remote_config.clone(),
            env.git_author.clone(),
        )
    };

    match command {
        // forge only, no checkout needed
        Command::CreateMilestones => {
            create_milestones::execute(&forge, &event.version()?).await
        }
        Command::Release => {
            let git = open_checkout()?;
            run_release(&ReleaseContext::new(&git, &forge, &env, &event)?)
                .await
        }
        Command::CreateMergeUpPullRequest => {
            let git = open_checkout()?;
            merge_up::execute(&ReleaseContext::new(
                &git, &forge, &env, &event,
            )?)
            .await
        }
        Command::SwitchDefaultBranchToNextMinor => {
            let git = open_checkout()?;
            switch_default_branch::execute(&ReleaseContext::new(
                &git, &forge, &env, &event,
            )?)
            .await
        }
        Command::BumpChangelog => {
            let git = open_checkout()?;
            bump_changelog::execute(&ReleaseContext::new(
                &git, &forge, &env, &event,
            )?)
            .await
        }
    }
}

/// Release with the announcer, date and signing key of this run.
async fn run_release(ctx: &ReleaseContext<'_>) -> Result<()> {
    let announcer: Option<Box<dyn Announcer>> =
        match ctx.env.twitter_access_token.as_ref() {
            Some(token) => Some(Box::new(Twitter::new(token)?)),
            None => None,
        };

    release::execute(
        ctx,
        announcer.as_deref(),
        chrono::Local::now().date_naive(),
        || SigningKey::import(ctx.env.require_signing_secret_key()?),
    )
    .await
}
