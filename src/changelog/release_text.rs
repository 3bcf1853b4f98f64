//! Release text selection.
//!
//! Generators are tried in order and the first one able to describe the
//! release wins. The standard chain prefers the hand written changelog
//! entry and falls back to a summary of the milestone.
use color_eyre::eyre::eyre;
use log::*;
use std::path::PathBuf;

use crate::{
    changelog::{
        keep_a_changelog::{KeepAChangelog, NOTHING},
        milestone::FromMilestone,
        traits::ReleaseTextGenerator,
    },
    forge::request::Milestone,
    git::version::SemVerVersion,
    result::Result,
};

/// Drop `###` sections whose only content is the `- Nothing.` placeholder.
pub fn strip_empty_sections(body: &str) -> String {
    let mut kept: Vec<Vec<&str>> = vec![];
    let mut current: Vec<&str> = vec![];

    for line in body.lines() {
        if line.starts_with("### ") && !current.is_empty() {
            kept.push(std::mem::take(&mut current));
        }
        current.push(line);
    }

    if !current.is_empty() {
        kept.push(current);
    }

    kept.into_iter()
        .filter(|section| {
            let is_section = section
                .first()
                .is_some_and(|first| first.starts_with("### "));

            let has_content = section
                .iter()
                .skip(usize::from(is_section))
                .map(|l| l.trim())
                .any(|l| !l.is_empty() && l != NOTHING);

            has_content
        })
        .map(|section| section.join("\n").trim().to_string())
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Release text taken from the keep-a-changelog entry of the version.
#[derive(Debug, Clone)]
pub struct ViaKeepAChangelog {
    path: PathBuf,
}

impl ViaKeepAChangelog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn entry_text(&self, version: &SemVerVersion) -> Result<Option<String>> {
        let Some(changelog) = KeepAChangelog::open(&self.path)? else {
            return Ok(None);
        };

        let text = changelog
            .release_entry(version)
            .map(|entry| strip_empty_sections(&entry.body))
            .filter(|text| !text.is_empty());

        Ok(text)
    }
}

impl ReleaseTextGenerator for ViaKeepAChangelog {
    fn name(&self) -> &'static str {
        "keep-a-changelog"
    }

    fn can_create(&self, _: &Milestone, version: &SemVerVersion) -> bool {
        match self.entry_text(version) {
            Ok(text) => text.is_some(),
            Err(err) => {
                warn!("unable to read changelog: {err}");
                false
            }
        }
    }

    fn create(&self, _: &Milestone, version: &SemVerVersion) -> Result<String> {
        self.entry_text(version)?.ok_or(eyre!(
            "{} has no entry for {version}",
            self.path.display()
        ))
    }
}

/// Ordered generators, first match wins.
pub struct ReleaseTextChain {
    generators: Vec<Box<dyn ReleaseTextGenerator>>,
}

impl ReleaseTextChain {
    pub fn new(generators: Vec<Box<dyn ReleaseTextGenerator>>) -> Self {
        Self { generators }
    }

    /// Changelog entry first, milestone summary otherwise.
    pub fn standard(changelog_path: PathBuf) -> Self {
        Self::new(vec![
            Box::new(ViaKeepAChangelog::new(changelog_path)),
            Box::new(FromMilestone::default()),
        ])
    }

    pub fn create(
        &self,
        milestone: &Milestone,
        version: &SemVerVersion,
    ) -> Result<String> {
        if self.generators.is_empty() {
            return Err(eyre!("no release text generators configured"));
        }

        let generator = self
            .generators
            .iter()
            .find(|g| g.can_create(milestone, version))
            .ok_or(eyre!("unable to create release text for {version}"))?;

        info!("using {} release text for {version}", generator.name());

        generator.create(milestone, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        changelog::traits::MockReleaseTextGenerator,
        test_helpers::create_test_milestone,
    };
    use std::fs;
    use tempfile::TempDir;

    fn mock_generator(
        can_create: bool,
        text: &'static str,
    ) -> Box<dyn ReleaseTextGenerator> {
        let mut mock = MockReleaseTextGenerator::new();
        mock.expect_name().returning(|| "mock");
        mock.expect_can_create().returning(move |_, _| can_create);
        mock.expect_create()
            .returning(move |_, _| Ok(text.to_string()));
        Box::new(mock)
    }

    #[test]
    fn strips_placeholder_sections() {
        let body = "### Added\n\n- Nothing.\n\n### Changed\n\n- Faster.\n\n### Fixed\n\n- Nothing.";
        assert_eq!(strip_empty_sections(body), "### Changed\n\n- Faster.");

        let body = "Highlights first.\n\n### Removed\n\n- Nothing.";
        assert_eq!(strip_empty_sections(body), "Highlights first.");

        assert_eq!(strip_empty_sections("### Added\n\n- Nothing."), "");
    }

    #[test]
    fn changelog_generator_requires_non_empty_entry() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");
        fs::write(
            &path,
            "# Changelog\n\n## 1.1.0 - TBD\n\n### Added\n\n- Nothing.\n\n\
             ## 1.0.0 - 2024-01-01\n\n### Fixed\n\n- A bug.\n\n### Added\n\n- Nothing.\n",
        )
        .unwrap();

        let milestone = create_test_milestone("1.0.0");
        let generator = ViaKeepAChangelog::new(path);

        let released = SemVerVersion::new(1, 0, 0);
        assert!(generator.can_create(&milestone, &released));
        assert_eq!(
            generator.create(&milestone, &released).unwrap(),
            "### Fixed\n\n- A bug."
        );

        let empty = SemVerVersion::new(1, 1, 0);
        assert!(!generator.can_create(&milestone, &empty));
        assert!(generator.create(&milestone, &empty).is_err());

        assert!(!generator.can_create(&milestone, &SemVerVersion::new(3, 0, 0)));
    }

    #[test]
    fn changelog_generator_without_file() {
        let tmp = TempDir::new().unwrap();
        let generator = ViaKeepAChangelog::new(tmp.path().join("CHANGELOG.md"));

        assert!(!generator.can_create(
            &create_test_milestone("1.0.0"),
            &SemVerVersion::new(1, 0, 0)
        ));
    }

    #[test]
    fn chain_uses_first_capable_generator() {
        let chain = ReleaseTextChain::new(vec![
            mock_generator(false, "first"),
            mock_generator(true, "second"),
            mock_generator(true, "third"),
        ]);

        let text = chain
            .create(&create_test_milestone("1.0.0"), &SemVerVersion::new(1, 0, 0))
            .unwrap();

        assert_eq!(text, "second");
    }

    #[test]
    fn chain_fails_when_empty_or_nothing_matches() {
        let milestone = create_test_milestone("1.0.0");
        let version = SemVerVersion::new(1, 0, 0);

        assert!(ReleaseTextChain::new(vec![]).create(&milestone, &version).is_err());
        assert!(
            ReleaseTextChain::new(vec![mock_generator(false, "never")])
                .create(&milestone, &version)
                .is_err()
        );
    }

    #[test]
    fn standard_chain_falls_back_to_milestone() {
        let tmp = TempDir::new().unwrap();
        let chain = ReleaseTextChain::standard(tmp.path().join("CHANGELOG.md"));

        let text = chain
            .create(&create_test_milestone("1.0.0"), &SemVerVersion::new(1, 0, 0))
            .unwrap();

        assert!(text.starts_with("This release closes 0 issues"));
    }
}
