//! Result type of the orchestration layer.
//!
//! Domain types return [`crate::error::Result`] with a typed
//! [`crate::error::AutoreleaseError`]. Everything that talks to git, the
//! forge or the file system returns this `color-eyre` backed result instead,
//! so errors can pick up context while they propagate to `main`.
//!
//! ```rust,ignore
//! use color_eyre::eyre::Context;
//! use crate::result::Result;
//!
//! fn read_changelog(path: &Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err("failed to read changelog")?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used by commands and collaborators.
pub type Result<T> = EyreResult<T>;
