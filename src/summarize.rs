//! The summarizer: options plus the fetch and charset-detection collaborators.

use tracing::debug;
use url::Url;

use crate::dom::Page;
use crate::encoding::{self, Charset, ChardetngDetector, CharsetDetector};
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::metadata::{self, Context};
use crate::result::Summary;
use crate::Options;

/// Resolves link-preview summaries.
///
/// Holds no per-page state, so one instance can serve any number of pages,
/// including from several threads at once.
pub struct Summarizer {
    options: Options,
    fetcher: Box<dyn Fetch>,
    detector: Box<dyn CharsetDetector>,
}

impl Summarizer {
    /// Summarizer using the `reqwest` fetcher configured from `options`.
    #[cfg(feature = "http")]
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = crate::fetch::HttpFetcher::new(&options)?;
        Ok(Self::with_fetcher(options, fetcher))
    }

    /// Summarizer using a custom fetcher.
    pub fn with_fetcher(options: Options, fetcher: impl Fetch + 'static) -> Self {
        Self {
            options,
            fetcher: Box::new(fetcher),
            detector: Box::new(ChardetngDetector),
        }
    }

    /// Replace the charset detector.
    #[must_use]
    pub fn with_detector(mut self, detector: impl CharsetDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Summarize an HTML document already in hand.
    ///
    /// `charset` is a charset the caller already knows (typically from the
    /// response headers); pass `None` to have it inferred.
    ///
    /// Only an unparseable document is an error. Missing fields are empty,
    /// and a failing oEmbed endpoint just means the player comes from meta
    /// tags.
    pub fn summarize_html(&self, site_url: &Url, html: &[u8], charset: Option<&str>) -> Result<Summary> {
        let page = Page::parse(html)?;

        let ctx = Context {
            site_url,
            declared_charset: charset,
            fetcher: self.fetcher.as_ref(),
            detector: self.detector.as_ref(),
            options: &self.options,
        };

        Ok(metadata::summarize_page(&page, &ctx))
    }

    /// Fetch a page and summarize it.
    ///
    /// The charset is taken from the `Content-Type` header when it names
    /// UTF-8, Shift-JIS or EUC-JP.
    pub fn summarize(&self, url: &str) -> Result<Summary> {
        let site_url = Url::parse(url)?;
        let user_agent = self.options.user_agent_for(site_url.host_str().unwrap_or_default());

        let response = self.fetcher.get(&site_url, user_agent)?;
        if response.status != 200 {
            return Err(Error::Status(response.status));
        }

        let charset = response
            .content_type
            .as_deref()
            .and_then(encoding::charset_from_content_type)
            .filter(|c| matches!(c, Charset::Utf8 | Charset::ShiftJis | Charset::EucJp));
        debug!("Fetched {} bytes from {site_url}, declared charset {charset:?}", response.body.len());

        self.summarize_html(&site_url, &response.body, charset.as_ref().map(Charset::name))
    }
}
