//! Configuration options for summarizing pages.
//!
//! Every fixed value the engine depends on (user agents, the iframe permission
//! allow-list, network ceilings) lives here, so tests and embedders can swap
//! them without touching resolution logic.

use std::time::Duration;

/// Configuration options for summarizing.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_summer::Options;
/// use std::time::Duration;
///
/// let options = Options {
///     timeout: Duration::from_secs(5),
///     ..Options::default()
/// };
/// assert_eq!(options.max_response_size, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// User agent for the page request.
    ///
    /// Default: a desktop Firefox string suffixed with `RsSummer/0.1`
    pub user_agent: String,

    /// User agent used instead of `user_agent` for hosts in
    /// `bot_user_agent_hosts`. Some sites only serve card metadata to
    /// known preview bots.
    ///
    /// Default: the Discord bot user agent
    pub bot_user_agent: String,

    /// Hosts (exact match) that receive `bot_user_agent`.
    ///
    /// Default: `twitter.com`, `x.com`
    pub bot_user_agent_hosts: Vec<String>,

    /// User agent for oEmbed discovery requests.
    ///
    /// Default: `RsSummer/0.1`
    pub oembed_user_agent: String,

    /// Total time allowed for a single request, redirects included.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Largest response body accepted, in bytes.
    ///
    /// Default: 10 MiB
    pub max_response_size: usize,

    /// Redirect hops followed before a request fails.
    ///
    /// Default: `10`
    pub max_redirects: usize,

    /// Iframe permissions an oEmbed snippet may be granted.
    ///
    /// Anything an embed asks for outside this list is dropped.
    ///
    /// Default: `autoplay`, `clipboard-write`, `picture-in-picture`,
    /// `web-share`, `fullscreen`
    pub safe_permissions: Vec<String>,

    /// Host pattern for the content-rating check. A page is sensitive when
    /// this string contains the page host and the rating meta tag is `"1"`.
    ///
    /// Default: `mixi.co.jp`
    pub sensitive_host: String,

    /// `property` of the rating meta tag consulted for `sensitive_host`.
    ///
    /// Default: `mixi:content-rating`
    pub sensitive_rating_property: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0 RsSummer/0.1"
                .to_string(),
            bot_user_agent: "Mozilla/5.0 (compatible; Discordbot/2.0; +https://discordapp.com)".to_string(),
            bot_user_agent_hosts: vec!["twitter.com".to_string(), "x.com".to_string()],
            oembed_user_agent: "RsSummer/0.1".to_string(),
            timeout: Duration::from_secs(10),
            max_response_size: 10 * 1024 * 1024,
            max_redirects: 10,
            safe_permissions: [
                "autoplay",
                "clipboard-write",
                "picture-in-picture",
                "web-share",
                "fullscreen",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            sensitive_host: "mixi.co.jp".to_string(),
            sensitive_rating_property: "mixi:content-rating".to_string(),
        }
    }
}

impl Options {
    /// Pick the user agent for a page request to `host`.
    #[must_use]
    pub fn user_agent_for(&self, host: &str) -> &str {
        if self.bot_user_agent_hosts.iter().any(|h| h == host) {
            &self.bot_user_agent
        } else {
            &self.user_agent
        }
    }
}
