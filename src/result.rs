//! Result types for summarize output.
//!
//! The serialized shape is the one link-preview consumers already depend on:
//! empty string fields are omitted, except `title`, `icon` and `sitename`,
//! which are always present.

use serde::{Deserialize, Serialize};

/// Embeddable player resolved for a page.
///
/// Zero-valued (`Player::default()`) when the page offers no player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Iframe source URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Width in pixels, `0` when unknown.
    #[serde(default)]
    pub width: u32,

    /// Height in pixels, `0` when unknown.
    #[serde(default)]
    pub height: u32,

    /// Iframe `allow` permissions that survived the allow-list.
    #[serde(default, rename = "allow")]
    pub allow: Vec<String>,
}

impl Player {
    /// True when no player URL was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Display-ready metadata for a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// The site URL the summary was resolved for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Page title, UTF-8 normalized.
    #[serde(default)]
    pub title: String,

    /// Favicon URL, always absolute `https`.
    #[serde(default)]
    pub icon: String,

    /// Page description, UTF-8 normalized.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Preview image URL, absolute when present.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,

    /// Site name, falling back to the URL host.
    #[serde(default, rename = "sitename")]
    pub site_name: String,

    /// Embeddable player.
    #[serde(default)]
    pub player: Player,

    /// Whether the site flags the page as adult content.
    #[serde(default)]
    pub sensitive: bool,

    /// ActivityPub representation of the page, if it links one.
    #[serde(default, rename = "activitypub", skip_serializing_if = "String::is_empty")]
    pub activity_pub: String,
}
