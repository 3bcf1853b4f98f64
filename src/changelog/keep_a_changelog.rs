//! Reading and updating a changelog in the keep-a-changelog format.
//!
//! Release headings look like `## 1.2.3 - 2024-05-01` (the version may also
//! be written `v1.2.3` or `[1.2.3]`). A release that is prepared but not yet
//! published carries the date `TBD`, which the release command replaces with
//! the actual release date.
use chrono::NaiveDate;
use color_eyre::eyre::Context;
use log::*;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::{git::version::SemVerVersion, result::Result};

/// Date placeholder of releases that have not been published yet.
pub const UNRELEASED_DATE: &str = "TBD";

/// Sections every new release entry starts out with.
pub const SECTIONS: [&str; 5] =
    ["Added", "Changed", "Deprecated", "Removed", "Fixed"];

/// Placeholder line of a section without changes.
pub const NOTHING: &str = "- Nothing.";

static RELEASE_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^##\s+\[?v?(?<version>\d+\.\d+\.\d+)\]?(?:\s+-\s+(?<date>\S.*?))?\s*$",
    )
    .unwrap()
});

/// One release section of the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub version: SemVerVersion,
    /// Date as written after the version, `TBD` for unreleased entries.
    pub date: Option<String>,
    /// Everything between this heading and the next release heading,
    /// trimmed.
    pub body: String,
}

impl ReleaseEntry {
    pub fn is_unreleased(&self) -> bool {
        self.date.as_deref() == Some(UNRELEASED_DATE)
    }
}

/// Release heading found on a line of the changelog.
struct Heading {
    line: usize,
    version: SemVerVersion,
    date: Option<String>,
}

fn parse_heading(line: usize, text: &str) -> Option<Heading> {
    let caps = RELEASE_HEADING_REGEX.captures(text)?;
    let version = SemVerVersion::parse(&caps["version"]).ok()?;

    Some(Heading {
        line,
        version,
        date: caps.name("date").map(|m| m.as_str().to_string()),
    })
}

/// A changelog loaded into memory. Changes are only persisted by
/// [`KeepAChangelog::write`].
#[derive(Debug, Clone)]
pub struct KeepAChangelog {
    path: PathBuf,
    lines: Vec<String>,
}

impl KeepAChangelog {
    /// Load the changelog at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read changelog {}", path.display())
        })?;

        Ok(Self::from_content(path, &content))
    }

    /// Load the changelog at `path` if the file exists.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!("no changelog at {}", path.display());
            return Ok(None);
        }

        Self::load(path).map(Some)
    }

    pub fn from_content(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: content.lines().map(String::from).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn headings(&self) -> Vec<Heading> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, text)| parse_heading(i, text))
            .collect()
    }

    /// Index of the heading of `version` and the line the entry ends at.
    fn entry_bounds(&self, version: &SemVerVersion) -> Option<(Heading, usize)> {
        let headings = self.headings();
        let index = headings.iter().position(|h| h.version == *version)?;
        let end = headings
            .get(index + 1)
            .map(|next| next.line)
            .unwrap_or(self.lines.len());

        let heading = headings.into_iter().nth(index)?;

        Some((heading, end))
    }

    /// The entry of `version`, if the changelog has one.
    pub fn release_entry(&self, version: &SemVerVersion) -> Option<ReleaseEntry> {
        let (heading, end) = self.entry_bounds(version)?;
        let body = self.lines[heading.line + 1..end].join("\n");

        Some(ReleaseEntry {
            version: heading.version,
            date: heading.date,
            body: body.trim().to_string(),
        })
    }

    /// Replace the `TBD` date of `version` with `date`. Returns whether the
    /// changelog changed.
    pub fn set_release_date(
        &mut self,
        version: &SemVerVersion,
        date: NaiveDate,
    ) -> bool {
        let Some((heading, _)) = self.entry_bounds(version) else {
            return false;
        };

        if heading.date.as_deref() != Some(UNRELEASED_DATE) {
            return false;
        }

        let text = &self.lines[heading.line];
        let Some(pos) = text.rfind(UNRELEASED_DATE) else {
            return false;
        };

        let dated = format!(
            "{}{}{}",
            &text[..pos],
            date.format("%Y-%m-%d"),
            &text[pos + UNRELEASED_DATE.len()..]
        );

        info!("setting release date of {version}: {dated}");
        self.lines[heading.line] = dated;

        true
    }

    /// Insert an unreleased skeleton entry for `version` above the newest
    /// release. Returns false when the changelog already has the entry.
    pub fn add_release(&mut self, version: &SemVerVersion) -> bool {
        if self.entry_bounds(version).is_some() {
            warn!("changelog already has an entry for {version}");
            return false;
        }

        let mut entry = vec![
            format!("## {} - {UNRELEASED_DATE}", version.full_release_name()),
            String::new(),
        ];

        for section in SECTIONS {
            entry.push(format!("### {section}"));
            entry.push(String::new());
            entry.push(NOTHING.to_string());
            entry.push(String::new());
        }

        let insert_at = match self.headings().first() {
            Some(heading) => heading.line,
            None => {
                // no release yet: append after the preamble
                if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    self.lines.push(String::new());
                }
                entry.pop();
                self.lines.len()
            }
        };

        info!("adding changelog entry for {version}");
        self.lines.splice(insert_at..insert_at, entry);

        true
    }

    pub fn content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }

    /// Persist the changelog to the file it was loaded from.
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.content()).wrap_err_with(|| {
            format!("failed to write changelog {}", self.path.display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CHANGELOG: &str = "# Changelog

All notable changes to this project will be documented in this file.

## 1.2.0 - TBD

### Added

- Milestone based release notes.

### Fixed

- Nothing.

## [v1.1.0] - 2024-03-02

### Changed

- Faster branch lookup.
";

    fn changelog() -> KeepAChangelog {
        KeepAChangelog::from_content(Path::new("CHANGELOG.md"), CHANGELOG)
    }

    #[test]
    fn finds_release_entries_in_any_heading_style() {
        let changelog = changelog();

        let unreleased = changelog
            .release_entry(&SemVerVersion::new(1, 2, 0))
            .unwrap();
        assert!(unreleased.is_unreleased());
        assert!(unreleased.body.starts_with("### Added"));
        assert!(unreleased.body.ends_with("- Nothing."));

        let released = changelog
            .release_entry(&SemVerVersion::new(1, 1, 0))
            .unwrap();
        assert_eq!(released.date.as_deref(), Some("2024-03-02"));
        assert!(!released.is_unreleased());
        assert_eq!(released.body, "### Changed\n\n- Faster branch lookup.");

        assert!(
            changelog
                .release_entry(&SemVerVersion::new(1, 0, 0))
                .is_none()
        );
    }

    #[test]
    fn sets_date_only_on_unreleased_entries() {
        let mut changelog = changelog();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(changelog.set_release_date(&SemVerVersion::new(1, 2, 0), date));
        assert!(changelog.content().contains("## 1.2.0 - 2024-05-01\n"));

        // already dated
        assert!(!changelog.set_release_date(&SemVerVersion::new(1, 2, 0), date));
        assert!(!changelog.set_release_date(&SemVerVersion::new(1, 1, 0), date));
        assert!(!changelog.set_release_date(&SemVerVersion::new(9, 9, 9), date));
    }

    #[test]
    fn adds_skeleton_above_newest_release() {
        let mut changelog = changelog();

        assert!(changelog.add_release(&SemVerVersion::new(1, 2, 1)));

        let content = changelog.content();
        let new_heading = content.find("## 1.2.1 - TBD").unwrap();
        let old_heading = content.find("## 1.2.0 - TBD").unwrap();
        assert!(new_heading < old_heading);

        let entry = changelog
            .release_entry(&SemVerVersion::new(1, 2, 1))
            .unwrap();
        assert!(entry.is_unreleased());
        for section in SECTIONS {
            assert!(entry.body.contains(&format!("### {section}\n\n- Nothing.")));
        }

        assert!(!changelog.add_release(&SemVerVersion::new(1, 2, 1)));
    }

    #[test]
    fn appends_first_release_after_preamble() {
        let mut changelog = KeepAChangelog::from_content(
            Path::new("CHANGELOG.md"),
            "# Changelog\n",
        );

        assert!(changelog.add_release(&SemVerVersion::new(0, 1, 0)));
        assert!(
            changelog
                .content()
                .starts_with("# Changelog\n\n## 0.1.0 - TBD\n\n### Added\n")
        );
        assert!(changelog.content().ends_with("### Fixed\n\n- Nothing.\n"));
    }

    #[test]
    fn writes_back_to_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");
        fs::write(&path, CHANGELOG).unwrap();

        let mut changelog = KeepAChangelog::open(&path).unwrap().unwrap();
        changelog.add_release(&SemVerVersion::new(1, 3, 0));
        changelog.write().unwrap();

        let reloaded = KeepAChangelog::load(&path).unwrap();
        assert!(
            reloaded
                .release_entry(&SemVerVersion::new(1, 3, 0))
                .is_some()
        );
        assert!(
            KeepAChangelog::open(&tmp.path().join("MISSING.md"))
                .unwrap()
                .is_none()
        );
    }
}
