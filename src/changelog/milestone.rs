//! Release text rendered from the milestone itself, used when the
//! changelog has nothing to say about a release.
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    changelog::traits::ReleaseTextGenerator,
    forge::request::{Milestone, MilestoneEntry},
    git::version::SemVerVersion,
    result::Result,
};

/// Group heading for entries without labels.
pub const UNLABELED_GROUP: &str = "Other";

pub const DEFAULT_TEMPLATE: &str = r#"{% if description %}{{ description }}

{% endif -%}
This release closes {{ issue_count }} issue{{ issue_count | pluralize }} and merges {{ pull_request_count }} pull request{{ pull_request_count | pluralize }} from {{ contributor_count }} contributor{{ contributor_count | pluralize }}.
{% for group in groups %}
### {{ group.label }}
{% for entry in group.entries %}
- {{ entry.title }} ([#{{ entry.number }}]({{ entry.url }})){% if entry.author %} by @{{ entry.author }}{% endif %}
{%- endfor %}
{% endfor %}
See {{ milestone_url }} for details."#;

#[derive(Debug, Serialize)]
struct EntryGroup<'a> {
    label: String,
    entries: Vec<&'a MilestoneEntry>,
}

#[derive(Debug, Serialize)]
struct MilestoneContext<'a> {
    version: String,
    description: &'a str,
    milestone_url: &'a str,
    issue_count: usize,
    pull_request_count: usize,
    contributor_count: usize,
    groups: Vec<EntryGroup<'a>>,
}

impl<'a> MilestoneContext<'a> {
    fn new(milestone: &'a Milestone, version: &SemVerVersion) -> Self {
        let pull_request_count = milestone
            .entries
            .iter()
            .filter(|e| e.is_pull_request)
            .count();

        let contributors = milestone
            .entries
            .iter()
            .map(|e| e.author.as_str())
            .filter(|a| !a.is_empty())
            .collect::<BTreeSet<&str>>();

        // grouped by first label, unlabeled entries last
        let mut labeled: BTreeMap<&str, Vec<&MilestoneEntry>> =
            BTreeMap::new();
        let mut unlabeled = vec![];

        for entry in milestone.entries.iter() {
            match entry.labels.first() {
                Some(label) => {
                    labeled.entry(label.as_str()).or_default().push(entry)
                }
                None => unlabeled.push(entry),
            }
        }

        let mut groups = labeled
            .into_iter()
            .map(|(label, entries)| EntryGroup {
                label: label.to_string(),
                entries,
            })
            .collect::<Vec<EntryGroup>>();

        if !unlabeled.is_empty() {
            groups.push(EntryGroup {
                label: UNLABELED_GROUP.to_string(),
                entries: unlabeled,
            });
        }

        Self {
            version: version.full_release_name(),
            description: milestone.description.trim(),
            milestone_url: &milestone.url,
            issue_count: milestone.entries.len() - pull_request_count,
            pull_request_count,
            contributor_count: contributors.len(),
            groups,
        }
    }
}

/// Renders a summary of the milestone's closed issues and merged pull
/// requests through a `tera` template.
#[derive(Debug, Clone)]
pub struct FromMilestone {
    template: String,
}

impl Default for FromMilestone {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl FromMilestone {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl ReleaseTextGenerator for FromMilestone {
    fn name(&self) -> &'static str {
        "milestone"
    }

    fn can_create(&self, _: &Milestone, _: &SemVerVersion) -> bool {
        true
    }

    fn create(
        &self,
        milestone: &Milestone,
        version: &SemVerVersion,
    ) -> Result<String> {
        let context = tera::Context::from_serialize(MilestoneContext::new(
            milestone, version,
        ))?;
        let text = tera::Tera::one_off(&self.template, &context, false)?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_entry, create_test_milestone};

    #[test]
    fn renders_counts_and_label_groups() {
        let mut milestone = create_test_milestone("1.2.0");
        milestone.description = "Branch handling overhaul.".into();
        milestone.entries = vec![
            create_test_entry(1, "Crash on empty branch", "alice", &["bug"], false),
            create_test_entry(2, "Fix crash", "bob", &["bug"], true),
            create_test_entry(3, "Merge-up PRs", "alice", &["enhancement", "bug"], true),
            create_test_entry(4, "Typo", "", &[], true),
        ];

        let text = FromMilestone::default()
            .create(&milestone, &SemVerVersion::new(1, 2, 0))
            .unwrap();

        assert!(text.starts_with("Branch handling overhaul.\n\n"));
        assert!(text.contains(
            "closes 1 issue and merges 3 pull requests from 2 contributors."
        ));

        let bug = text.find("### bug").unwrap();
        let enhancement = text.find("### enhancement").unwrap();
        let other = text.find("### Other").unwrap();
        assert!(bug < enhancement && enhancement < other);

        assert!(text.contains(
            "- Fix crash ([#2](https://github.com/acme/widgets/pull/2)) by @bob"
        ));
        assert!(text.contains("- Typo ([#4](https://github.com/acme/widgets/pull/4))\n"));
        assert!(text.ends_with("See https://github.com/acme/widgets/milestone/1 for details."));
    }

    #[test]
    fn renders_empty_milestone() {
        let milestone = create_test_milestone("2.0.0");

        let generator = FromMilestone::default();
        let version = SemVerVersion::new(2, 0, 0);
        assert!(generator.can_create(&milestone, &version));

        let text = generator.create(&milestone, &version).unwrap();
        assert!(text.starts_with(
            "This release closes 0 issues and merges 0 pull requests from 0 contributors."
        ));
        assert!(!text.contains("###"));
    }

    #[test]
    fn uses_custom_template() {
        let milestone = create_test_milestone("1.0.0");
        let generator = FromMilestone::new("Release {{ version }}");

        let text = generator
            .create(&milestone, &SemVerVersion::new(1, 0, 0))
            .unwrap();

        assert_eq!(text, "Release 1.0.0");
    }

    #[test]
    fn invalid_template_is_an_error() {
        let milestone = create_test_milestone("1.0.0");
        let generator = FromMilestone::new("{% for %}");

        assert!(
            generator
                .create(&milestone, &SemVerVersion::new(1, 0, 0))
                .is_err()
        );
    }
}
