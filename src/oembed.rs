//! oEmbed player resolution.
//!
//! Pages that advertise an oEmbed endpoint
//! (`<link type="application/json+oembed" href="…">`) get their player size
//! and iframe permissions from that document. The player URL itself still
//! comes from the page's meta tags.
//!
//! Nothing in here fails loudly: a missing link, an unreachable endpoint, a
//! non-200 answer or malformed JSON all mean "no oEmbed player", and the
//! caller falls back to meta tags.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::dom::Page;
use crate::fetch::Fetch;
use crate::metadata::player;
use crate::permissions::filter_permissions;
use crate::result::Player;
use crate::selector::{self, meta};
use crate::Options;

/// The subset of an oEmbed response the summary uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OEmbed {
    /// `video`, `rich`, `photo` or `link`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    /// Embed markup, usually a single `<iframe>`.
    #[serde(default)]
    pub html: Option<String>,
}

/// The page's oEmbed endpoint, resolved against `site_url`.
#[must_use]
pub fn discover(page: &Page, site_url: &Url) -> Option<Url> {
    let href = selector::lookup(&page.root(), meta::OEMBED).into_option()?;
    let href = page.text_lossy(&href);

    match site_url.join(href.trim()) {
        Ok(endpoint) => Some(endpoint),
        Err(e) => {
            debug!("Ignoring oEmbed link {href:?}: {e}");
            None
        }
    }
}

/// GET and parse an oEmbed document.
pub fn fetch(endpoint: &Url, fetcher: &dyn Fetch, options: &Options) -> Option<OEmbed> {
    let response = match fetcher.get(endpoint, &options.oembed_user_agent) {
        Ok(response) => response,
        Err(e) => {
            debug!("oEmbed request to {endpoint} failed: {e}");
            return None;
        }
    };

    if response.status != 200 {
        debug!("oEmbed endpoint {endpoint} answered {}", response.status);
        return None;
    }

    match serde_json::from_slice(&response.body) {
        Ok(embed) => Some(embed),
        Err(e) => {
            debug!("Malformed oEmbed document from {endpoint}: {e}");
            None
        }
    }
}

/// Player described by the page's oEmbed document, if it has a usable one.
pub fn resolve_player(page: &Page, site_url: &Url, fetcher: &dyn Fetch, options: &Options) -> Option<Player> {
    let endpoint = discover(page, site_url)?;
    let embed = fetch(&endpoint, fetcher, options)?;

    let allow = filter_permissions(embed.html.as_deref().unwrap_or_default(), &options.safe_permissions);

    Some(Player {
        url: player::player_url(page),
        width: embed.width.unwrap_or(0),
        height: embed.height.unwrap_or(0),
        allow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, Response};
    use std::sync::Mutex;

    struct Canned {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self { status, body, seen: Mutex::new(Vec::new()) }
        }
    }

    impl Fetch for Canned {
        fn get(&self, url: &Url, user_agent: &str) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push((url.to_string(), user_agent.to_string()));
            Ok(Response { status: self.status, content_type: None, body: self.body.as_bytes().to_vec() })
        }
    }

    struct Offline;

    impl Fetch for Offline {
        fn get(&self, _url: &Url, _user_agent: &str) -> Result<Response, FetchError> {
            Err(FetchError::Transport("offline".to_string()))
        }
    }

    const PAGE: &str = r#"<html><head>
        <link rel="alternate" type="application/json+oembed" href="/oembed?url=watch">
        <meta name="twitter:card" content="player">
        <meta name="twitter:player" content="https://www.youtube.com/embed/abc">
    </head></html>"#;

    const DOC: &str = r#"{"type":"video","width":200,"height":113,
        "html":"<iframe allow=\"accelerometer; autoplay; gyroscope; web-share\"></iframe>"}"#;

    fn site() -> Url {
        Url::parse("https://www.youtube.com/watch?v=abc").unwrap()
    }

    #[test]
    fn relative_link_resolved_against_site() {
        let page = Page::from_html(PAGE);
        assert_eq!(
            discover(&page, &site()).map(|u| u.to_string()),
            Some("https://www.youtube.com/oembed?url=watch".to_string())
        );
    }

    #[test]
    fn player_from_oembed() {
        let page = Page::from_html(PAGE);
        let fetcher = Canned::new(200, DOC);
        let player = resolve_player(&page, &site(), &fetcher, &Options::default()).unwrap();

        assert_eq!(player.url, "https://www.youtube.com/embed/abc");
        assert_eq!((player.width, player.height), (200, 113));
        assert_eq!(player.allow, vec!["autoplay", "web-share"]);

        let seen = fetcher.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, Options::default().oembed_user_agent);
    }

    #[test]
    fn no_link_means_no_request() {
        let page = Page::from_html("<html><head><title>x</title></head></html>");
        let fetcher = Canned::new(200, DOC);
        assert!(resolve_player(&page, &site(), &fetcher, &Options::default()).is_none());
        assert!(fetcher.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn server_error_is_absent() {
        let page = Page::from_html(PAGE);
        assert!(resolve_player(&page, &site(), &Canned::new(500, DOC), &Options::default()).is_none());
    }

    #[test]
    fn transport_error_is_absent() {
        let page = Page::from_html(PAGE);
        assert!(resolve_player(&page, &site(), &Offline, &Options::default()).is_none());
    }

    #[test]
    fn malformed_json_is_absent() {
        let page = Page::from_html(PAGE);
        let fetcher = Canned::new(200, "{not json");
        assert!(resolve_player(&page, &site(), &fetcher, &Options::default()).is_none());

        let fetcher = Canned::new(200, r#"{"width":"wide"}"#);
        assert!(resolve_player(&page, &site(), &fetcher, &Options::default()).is_none());
    }

    #[test]
    fn sparse_document_is_zero_valued() {
        let page = Page::from_html(PAGE);
        let fetcher = Canned::new(200, r#"{"type":"rich","width":null}"#);
        let player = resolve_player(&page, &site(), &fetcher, &Options::default()).unwrap();
        assert_eq!((player.width, player.height), (0, 0));
        assert!(player.allow.is_empty());
    }
}
