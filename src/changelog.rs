//! Changelog maintenance and release text generation.

/// Keep-a-changelog file parsing and editing.
pub mod keep_a_changelog;

/// Release text summarising a milestone.
pub mod milestone;

/// Ordered release text generators.
pub mod release_text;

pub mod traits;
