//! Release versions as encoded in milestone titles.
use regex::Regex;
use std::{fmt, str::FromStr, sync::LazyLock};

use crate::{
    error::{AutoreleaseError, Result},
    git::branch_name::BranchName,
};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?<major>\d+)\.(?<minor>\d+)\.(?<patch>\d+)$").unwrap()
});

/// An immutable `major.minor.patch` version.
///
/// Field order matters: the derived ordering compares major, then minor,
/// then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVerVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVerVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version such as `1.2.3` or `v1.2.3`. The leading `v` is
    /// accepted but not retained.
    ///
    /// Components must stay below `u64::MAX` so every parsed version has a
    /// next patch, minor and major release.
    pub fn parse(version: &str) -> Result<Self> {
        let invalid = || AutoreleaseError::InvalidVersion(version.to_string());

        let caps = VERSION_REGEX.captures(version).ok_or_else(invalid)?;

        let component = |name: &str| -> Result<u64> {
            caps[name]
                .parse::<u64>()
                .ok()
                .filter(|n| *n < u64::MAX)
                .ok_or_else(invalid)
        };

        Ok(Self {
            major: component("major")?,
            minor: component("minor")?,
            patch: component("patch")?,
        })
    }

    /// `{major}.{minor}.{patch}`, never prefixed with `v`.
    pub fn full_release_name(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The release branch this version is expected to be released from.
    pub fn target_release_branch_name(&self) -> BranchName {
        BranchName::for_release_line(self.major, self.minor)
    }

    pub fn next_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }

    pub fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    pub fn next_major(&self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }

    pub fn is_new_minor_release(&self) -> bool {
        self.patch == 0
    }

    pub fn is_new_major_release(&self) -> bool {
        self.minor == 0 && self.patch == 0
    }

    pub fn less_than_equal(&self, other: &SemVerVersion) -> bool {
        self <= other
    }
}

impl fmt::Display for SemVerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_release_name())
    }
}

impl FromStr for SemVerVersion {
    type Err = AutoreleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
