//! Repository branch names and release line classification.
use regex::Regex;
use std::{cmp::Ordering, fmt, sync::LazyLock};

use crate::{
    error::{AutoreleaseError, Result},
    git::version::SemVerVersion,
};

static RELEASE_BRANCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?<major>\d+)\.(?<minor>\d+)(\.x)?$").unwrap()
});

/// The `major.minor` pair encoded in a release branch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseLine {
    pub major: u64,
    pub minor: u64,
}

impl ReleaseLine {
    pub fn is_for_version(&self, version: &SemVerVersion) -> bool {
        self.major == version.major && self.minor == version.minor
    }

    pub fn is_newer_than(&self, version: &SemVerVersion) -> bool {
        let other = ReleaseLine {
            major: version.major,
            minor: version.minor,
        };

        self.cmp(&other) == Ordering::Greater
    }

    pub fn target_minor_release_version(&self) -> SemVerVersion {
        SemVerVersion::new(self.major, self.minor, 0)
    }
}

/// A branch name as reported by the remote. Any non-empty string is
/// accepted; only names shaped like `1.2`, `v1.2`, `1.2.x` or `v1.2.x` are
/// release branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName {
    name: String,
    // derived from `name`, so equality stays structural on the name
    line: Option<ReleaseLine>,
}

impl BranchName {
    pub fn from_name(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(AutoreleaseError::EmptyBranchName);
        }

        Ok(Self {
            name: name.to_string(),
            line: parse_release_line(name),
        })
    }

    /// Branch name for a release line, e.g. `1.2.x`.
    pub(crate) fn for_release_line(major: u64, minor: u64) -> Self {
        Self {
            name: format!("{major}.{minor}.x"),
            line: Some(ReleaseLine { major, minor }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_release_branch(&self) -> bool {
        self.line.is_some()
    }

    /// The release line of this branch, `None` for non-release branches.
    pub fn release_line(&self) -> Option<ReleaseLine> {
        self.line
    }

    pub fn major_and_minor(&self) -> Result<(u64, u64)> {
        let line = self.require_release_line()?;
        Ok((line.major, line.minor))
    }

    pub fn target_minor_release_version(&self) -> Result<SemVerVersion> {
        Ok(self.require_release_line()?.target_minor_release_version())
    }

    pub fn is_for_version(&self, version: &SemVerVersion) -> Result<bool> {
        Ok(self.require_release_line()?.is_for_version(version))
    }

    pub fn is_for_newer_version_than(
        &self,
        version: &SemVerVersion,
    ) -> Result<bool> {
        Ok(self.require_release_line()?.is_newer_than(version))
    }

    fn require_release_line(&self) -> Result<ReleaseLine> {
        self.line
            .ok_or_else(|| AutoreleaseError::NotAReleaseBranch(self.name.clone()))
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn parse_release_line(name: &str) -> Option<ReleaseLine> {
    let caps = RELEASE_BRANCH_REGEX.captures(name)?;

    // components too large for u64 are not treated as release lines
    let major = caps["major"].parse::<u64>().ok()?;
    let minor = caps["minor"].parse::<u64>().ok()?;

    Some(ReleaseLine { major, minor })
}
