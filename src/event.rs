//! The milestone event that triggers a run.
use serde::Deserialize;
use std::{fs, path::Path};

use crate::{
    error::{AutoreleaseError, Result},
    git::version::SemVerVersion,
};

pub const CLOSED_ACTION: &str = "closed";

#[derive(Debug, Clone, Deserialize)]
struct EventMilestone {
    number: u64,
    title: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EventRepository {
    full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EventPayload {
    action: String,
    milestone: Option<EventMilestone>,
    repository: Option<EventRepository>,
}

/// A `milestone` webhook event as delivered to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneClosedEvent {
    pub action: String,
    pub repository_full_name: String,
    pub milestone_title: String,
    pub milestone_number: u64,
}

impl MilestoneClosedEvent {
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: EventPayload = serde_json::from_str(json)?;

        let milestone = payload.milestone.ok_or_else(|| {
            AutoreleaseError::invalid_event("payload has no milestone")
        })?;

        let repository = payload.repository.ok_or_else(|| {
            AutoreleaseError::invalid_event("payload has no repository")
        })?;

        Ok(Self {
            action: payload.action,
            repository_full_name: repository.full_name,
            milestone_title: milestone.title.trim().to_string(),
            milestone_number: milestone.number,
        })
    }

    /// Read the event payload written by the workflow runner.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn is_closed(&self) -> bool {
        self.action == CLOSED_ACTION
    }

    /// The release version named by the milestone title.
    pub fn version(&self) -> Result<SemVerVersion> {
        SemVerVersion::parse(&self.milestone_title)
    }
}
