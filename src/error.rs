//! Error types for rs-summer.
//!
//! Only a handful of conditions abort a summary. Everything that can go wrong
//! while resolving an individual field (a missing tag, a bad integer, a broken
//! oEmbed endpoint, an undecodable title) degrades to an empty value instead.

use crate::fetch::FetchError;

/// Error type for summarize operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed; the whole summary is abandoned.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// The site URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Fetching the page itself failed.
    ///
    /// Check [`FetchError::is_unsafe_url`] to tell a rejected target apart
    /// from an ordinary transport failure.
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    /// The page answered with something other than `200 OK`.
    #[error("Non-200 status code: {0}")]
    Status(u16),
}

impl Error {
    /// True when the page URL was refused by the fetcher's target guard.
    #[must_use]
    pub fn is_unsafe_url(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_unsafe_url())
    }
}

/// Result type alias for summarize operations.
pub type Result<T> = std::result::Result<T, Error>;
