//! Changelog related traits
#[cfg(test)]
use mockall::automock;

use crate::{
    forge::request::Milestone, git::version::SemVerVersion, result::Result,
};

/// Produces the text used for release notes, signed tag messages and
/// merge-up pull request bodies.
#[cfg_attr(test, automock)]
pub trait ReleaseTextGenerator {
    /// Short name used in log output.
    fn name(&self) -> &'static str;
    fn can_create(&self, milestone: &Milestone, version: &SemVerVersion) -> bool;
    fn create(
        &self,
        milestone: &Milestone,
        version: &SemVerVersion,
    ) -> Result<String>;
}
