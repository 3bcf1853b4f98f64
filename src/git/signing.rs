//! GPG key import for signed release tags.
use color_eyre::eyre::eyre;
use log::*;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{io::Write, sync::LazyLock};

use crate::{result::Result, shell};

static IMPORTED_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)key\s+(?<id>[0-9A-F]+):\s+").unwrap()
});

/// Identifier of a secret key available to the local gpg agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub key_id: String,
}

impl SigningKey {
    /// Import an ASCII armored secret key into the local keyring.
    pub fn import(secret: &SecretString) -> Result<Self> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(secret.expose_secret().as_bytes())?;
        file.flush()?;

        let path = file
            .path()
            .to_str()
            .ok_or(eyre!("temporary key file path is not valid utf-8"))?
            .to_string();

        let output = shell::run("gpg", &["--batch", "--import", &path], None)?;

        // gpg reports imports on stderr
        let key = Self::from_import_output(&output.stderr)
            .or_else(|| Self::from_import_output(&output.stdout))
            .ok_or(eyre!("unable to find imported key id in gpg output"))?;

        info!("imported signing key: {}", key.key_id);

        Ok(key)
    }

    fn from_import_output(output: &str) -> Option<Self> {
        IMPORTED_KEY_REGEX.captures(output).map(|caps| Self {
            key_id: caps["id"].to_string(),
        })
    }
}
