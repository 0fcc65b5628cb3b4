//! # rs-summer
//!
//! Link-preview metadata for any web page: title, description, thumbnail,
//! site name, favicon, an embeddable player, a sensitivity flag and the
//! page's ActivityPub link.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_summer::{fetch::{Fetch, FetchError, Response}, Options, Summarizer};
//! use url::Url;
//!
//! // A fetcher that never reaches the network.
//! struct Offline;
//! impl Fetch for Offline {
//!     fn get(&self, _: &Url, _: &str) -> Result<Response, FetchError> {
//!         Err(FetchError::Transport("offline".into()))
//!     }
//! }
//!
//! let html = br#"<html><head>
//!     <meta property="og:title" content="My Article">
//!     <meta property="og:image" content="/cover.png">
//! </head></html>"#;
//!
//! let summarizer = Summarizer::with_fetcher(Options::default(), Offline);
//! let site = Url::parse("https://ex.com/post/1")?;
//! let summary = summarizer.summarize_html(&site, html, None)?;
//!
//! assert_eq!(summary.title, "My Article");
//! assert_eq!(summary.thumbnail, "https://ex.com/cover.png");
//! assert_eq!(summary.icon, "https://ex.com/favicon.ico");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## How fields are found
//!
//! Each field has an ordered list of rules (OpenGraph, then Twitter cards,
//! then plain HTML). The document is walked in order and the first node that
//! satisfies any rule wins. See [`selector`].
//!
//! ## Japanese charsets
//!
//! Shift-JIS and EUC-JP pages are detected from the `Content-Type` header,
//! the page's `<meta>` declarations or the title bytes, and their text fields
//! are converted to UTF-8. See [`encoding`].

mod error;
mod options;
mod patterns;
mod result;
mod summarize;

/// Parsed page wrapper and node helpers.
pub mod dom;

/// Rule-list search over the document tree.
pub mod selector;

/// Charset resolution and transcoding.
pub mod encoding;

/// HTTP fetching and the unsafe-target guard.
pub mod fetch;

/// Iframe permission allow-listing.
pub mod permissions;

/// oEmbed discovery and player resolution.
pub mod oembed;

/// Field-by-field summary assembly.
pub mod metadata;

/// URL absolutization helpers.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::{Player, Summary};
pub use summarize::Summarizer;

/// Fetches `url` and summarizes it using default options.
///
/// # Example
///
/// ```no_run
/// let summary = rs_summer::summarize("https://www.rust-lang.org/")?;
/// println!("{}", summary.title);
/// # Ok::<(), rs_summer::Error>(())
/// ```
#[cfg(feature = "http")]
pub fn summarize(url: &str) -> Result<Summary> {
    Summarizer::new(Options::default())?.summarize(url)
}

/// Summarizes an HTML document using default options.
///
/// oEmbed endpoints the page advertises are still fetched.
///
/// # Arguments
///
/// * `site_url` - The URL the document was served from
/// * `html` - The raw document bytes, in any charset
/// * `charset` - The charset, when already known from the response headers
#[cfg(feature = "http")]
pub fn summarize_html(site_url: &url::Url, html: &[u8], charset: Option<&str>) -> Result<Summary> {
    Summarizer::new(Options::default())?.summarize_html(site_url, html, charset)
}
