//! Git side of a release: versions, branch names, the release branch
//! resolution engine and the local checkout.

/// Branch names and release line classification.
pub mod branch_name;

/// Release branch resolution for targets, merge-ups and default branches.
pub mod merge_target;

/// Local checkout backed by libgit2.
pub mod repository;

/// GPG key import for signed tags.
pub mod signing;

/// Trait abstracting the local checkout.
pub mod traits;

/// `major.minor.patch` release versions.
pub mod version;
