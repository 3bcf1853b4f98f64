//! Milestone driven release automation.
//!
//! Closing a milestone titled with a version (`1.4.2`) triggers the
//! commands in [`command`]: the release is tagged, signed and published
//! from its `major.minor.x` release branch, merged up into newer release
//! lines, and the repository prepared for the next release.
pub mod announcement;
pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod forge;
pub mod git;
pub mod result;
pub mod shell;

#[cfg(test)]
pub mod test_helpers;
