//! Interface to the forge hosting the repository (GitHub).
//!
//! Only the handful of calls a release needs are modelled: reading a
//! milestone, publishing a release, opening a pull request, switching the
//! default branch and creating milestones.

/// Connection configuration for a single repository.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Request and response types exchanged with the forge.
pub mod request;

/// Forge trait used by the release commands.
pub mod traits;
