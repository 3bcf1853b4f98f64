//! CLI argument parsing.
//!
//! Connection details, secrets and the triggering event are read from the
//! environment (see [`crate::config`]); the command line only picks the
//! step to run.
use clap::{Parser, Subcommand};

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release workflow steps, each run in response to a closed milestone.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Tag, sign and publish the release named by the milestone.
    Release,

    /// Open a pull request merging the released branch into the next
    /// newer release branch.
    CreateMergeUpPullRequest,

    /// Make the branch of the next minor release the default branch,
    /// creating it when needed.
    SwitchDefaultBranchToNextMinor,

    /// Add an entry for the next patch release to the changelog.
    BumpChangelog,

    /// Create milestones for the next patch, minor and major releases.
    CreateMilestones,
}
