//! Release announcements.
use async_trait::async_trait;
use log::*;
#[cfg(test)]
use mockall::automock;
use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;

use crate::{
    error::AutoreleaseError, git::version::SemVerVersion, result::Result,
};

pub const TWITTER_API_URL: &str = "https://api.twitter.com/2/tweets";

/// Text announcing a published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    text: String,
}

impl Announcement {
    pub fn for_release(
        repository: &str,
        version: &SemVerVersion,
        release_url: &str,
    ) -> Self {
        Self {
            text: format!(
                "Released: {repository} {} {release_url}",
                version.full_release_name()
            ),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, announcement: &Announcement) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
}

/// Posts announcements as tweets through the v2 API.
pub struct Twitter {
    url: Url,
    client: Client,
}

impl Twitter {
    pub fn new(token: &SecretString) -> Result<Self> {
        Self::with_url(token, TWITTER_API_URL)
    }

    pub fn with_url(token: &SecretString, url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let bearer = format!("Bearer {}", token.expose_secret());
        let mut token_value = HeaderValue::from_str(&bearer)?;
        token_value.set_sensitive(true);

        headers.append("Authorization", token_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AutoreleaseError::from)?;

        Ok(Self {
            url: Url::parse(url)?,
            client,
        })
    }
}

#[async_trait]
impl Announcer for Twitter {
    async fn announce(&self, announcement: &Announcement) -> Result<()> {
        info!("announcing: {announcement}");

        let body = CreateTweet {
            text: announcement.text(),
        };

        let request = self.client.post(self.url.clone()).json(&body).build()?;
        let response = self.client.execute(request).await?;
        response.error_for_status().map_err(AutoreleaseError::from)?;

        Ok(())
    }
}
