//! End-to-end summaries through `Summarizer`, with an in-memory fetcher.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use rs_summer::fetch::{Fetch, FetchError, Response};
use rs_summer::{Error, Options, Player, Summarizer, Summary};
use url::Url;

/// Serves canned responses by exact URL and records every request.
#[derive(Default)]
struct Routes {
    pages: HashMap<String, Response>,
    requests: Mutex<Vec<(String, String)>>,
}

impl Routes {
    fn page(mut self, url: &str, status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
        self.pages.insert(
            url.to_string(),
            Response { status, content_type: content_type.map(ToString::to_string), body: body.to_vec() },
        );
        self
    }
}

impl Fetch for Routes {
    fn get(&self, url: &Url, user_agent: &str) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push((url.to_string(), user_agent.to_string()));
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no route for {url}")))
    }
}

impl Fetch for &'static Routes {
    fn get(&self, url: &Url, user_agent: &str) -> Result<Response, FetchError> {
        (*self).get(url, user_agent)
    }
}

fn summarize_html(site: &str, html: &str) -> Summary {
    let summarizer = Summarizer::with_fetcher(Options::default(), Routes::default());
    summarizer
        .summarize_html(&Url::parse(site).unwrap(), html.as_bytes(), None)
        .expect("summary")
}

#[test]
fn full_open_graph_page() {
    let summary = summarize_html(
        "https://news.example.com/articles/42",
        r#"<html><head>
            <meta property="og:title" content="Rust 2024 released">
            <meta property="og:description" content="The new edition is out.">
            <meta property="og:site_name" content="Example News">
            <meta property="og:image" content="/img/cover.png">
            <link rel="icon" href="/static/icon.png">
            <link rel="alternate" type="application/activity+json" href="https://social.example.com/notes/1">
        </head><body><p>Body text</p></body></html>"#,
    );

    assert_eq!(summary.url, "https://news.example.com/articles/42");
    assert_eq!(summary.title, "Rust 2024 released");
    assert_eq!(summary.description, "The new edition is out.");
    assert_eq!(summary.site_name, "Example News");
    assert_eq!(summary.thumbnail, "https://news.example.com/img/cover.png");
    assert_eq!(summary.icon, "https://news.example.com/static/icon.png");
    assert_eq!(summary.activity_pub, "https://social.example.com/notes/1");
    assert_eq!(summary.player, Player::default());
    assert!(!summary.sensitive);
}

#[test]
fn missing_title_is_empty_not_error() {
    let summary = summarize_html("https://ex.com/", "<html><body><p>No head at all</p></body></html>");
    assert_eq!(summary.title, "");
    assert_eq!(summary.description, "");
    assert_eq!(summary.thumbnail, "");
}

#[test]
fn plain_html_fallbacks() {
    let summary = summarize_html(
        "https://ex.com/post",
        r#"<html><head><title>Plain title</title>
           <meta name="description" content="Plain description"></head></html>"#,
    );
    assert_eq!(summary.title, "Plain title");
    assert_eq!(summary.description, "Plain description");
}

#[test]
fn site_name_falls_back_to_host_with_port() {
    let summary = summarize_html("http://ex.com:8080/page", "<html><head><title>t</title></head></html>");
    assert_eq!(summary.site_name, "ex.com:8080");
}

#[test]
fn twitter_site_handle_as_site_name() {
    let summary = summarize_html("https://ex.com/", r#"<meta name="twitter:site" content="@example">"#);
    assert_eq!(summary.site_name, "@example");
}

#[test]
fn icon_synthesized_when_not_declared() {
    let summary = summarize_html("https://ex.com/", "<html><head><title>t</title></head></html>");
    assert_eq!(summary.icon, "https://ex.com/favicon.ico");
}

#[test]
fn icon_forced_to_https() {
    let summary = summarize_html("http://ex.com/a/b", r#"<link rel="shortcut icon" href="/favicon.png">"#);
    assert_eq!(summary.icon, "https://ex.com/favicon.png");
}

#[test]
fn absolute_http_icon_upgraded_to_https() {
    let summary = summarize_html("https://ex.com/", r#"<link rel="icon" href="http://cdn.ex.com/x.ico">"#);
    assert_eq!(summary.icon, "https://cdn.ex.com/x.ico");
}

#[test]
fn thumbnail_relative_without_slash_resolved() {
    let summary = summarize_html("https://ex.com/blog/post", r#"<meta property="og:image" content="cover.jpg">"#);
    assert_eq!(summary.thumbnail, "https://ex.com/blog/cover.jpg");
}

#[test]
fn youtube_player_uses_nocookie_domain() {
    let summary = summarize_html(
        "https://www.youtube.com/watch?v=abc",
        r#"<meta name="twitter:card" content="player">
           <meta name="twitter:player" content="https://www.youtube.com/embed/abc">
           <meta name="twitter:player:width" content="1280">
           <meta name="twitter:player:height" content="720">"#,
    );
    assert_eq!(summary.player.url, "https://www.youtube-nocookie.com/embed/abc");
    assert_eq!((summary.player.width, summary.player.height), (1280, 720));
    assert!(summary.player.allow.is_empty());
}

#[test]
fn sensitive_only_on_rating_host() {
    let html = r#"<meta property="mixi:content-rating" content="1"><title>t</title>"#;
    assert!(summarize_html("https://mixi.co.jp/view/1", html).sensitive);
    assert!(!summarize_html("https://ex.com/view/1", html).sensitive);
}

#[test]
fn empty_document_is_parse_error() {
    let summarizer = Summarizer::with_fetcher(Options::default(), Routes::default());
    let site = Url::parse("https://ex.com/").unwrap();

    for html in [&b""[..], b"   \n\t "] {
        match summarizer.summarize_html(&site, html, None) {
            Err(Error::ParseError(_)) => {}
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}

#[test]
fn json_shape() {
    let summary = summarize_html("https://ex.com/", "<title>Hello</title>");
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["url"], "https://ex.com/");
    assert_eq!(json["title"], "Hello");
    assert_eq!(json["icon"], "https://ex.com/favicon.ico");
    assert_eq!(json["sitename"], "ex.com");
    assert_eq!(json["sensitive"], false);
    assert_eq!(json["player"]["width"], 0);
    assert_eq!(json["player"]["allow"], serde_json::json!([]));
    assert!(json["player"].get("url").is_none());
    assert!(json.get("description").is_none());
    assert!(json.get("thumbnail").is_none());
    assert!(json.get("activitypub").is_none());
}

// === summarize(url) ===

#[test]
fn summarize_fetches_with_browser_user_agent() {
    let routes: &'static Routes = Box::leak(Box::new(Routes::default().page(
        "https://ex.com/post",
        200,
        Some("text/html; charset=utf-8"),
        b"<title>Fetched</title>",
    )));
    let summarizer = Summarizer::with_fetcher(Options::default(), routes);

    let summary = summarizer.summarize("https://ex.com/post").expect("summary");
    assert_eq!(summary.title, "Fetched");

    let requests = routes.requests.lock().unwrap();
    assert_eq!(requests[0], ("https://ex.com/post".to_string(), Options::default().user_agent));
}

#[test]
fn summarize_uses_bot_user_agent_for_x() {
    let routes: &'static Routes = Box::leak(Box::new(Routes::default().page(
        "https://x.com/someone/status/1",
        200,
        None,
        br#"<meta property="og:title" content="A post">"#,
    )));
    let summarizer = Summarizer::with_fetcher(Options::default(), routes);

    summarizer.summarize("https://x.com/someone/status/1").expect("summary");

    let requests = routes.requests.lock().unwrap();
    assert_eq!(requests[0].1, Options::default().bot_user_agent);
}

#[test]
fn summarize_non_200_is_status_error() {
    let routes = Routes::default().page("https://ex.com/gone", 404, None, b"<title>Not found</title>");
    let summarizer = Summarizer::with_fetcher(Options::default(), routes);

    match summarizer.summarize("https://ex.com/gone") {
        Err(Error::Status(404)) => {}
        other => panic!("expected Status(404), got {other:?}"),
    }
}

#[test]
fn summarize_propagates_fetch_failure() {
    let summarizer = Summarizer::with_fetcher(Options::default(), Routes::default());
    match summarizer.summarize("https://ex.com/unrouted") {
        Err(Error::Fetch(FetchError::Transport(_))) => {}
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[test]
fn summarize_rejects_invalid_url() {
    let summarizer = Summarizer::with_fetcher(Options::default(), Routes::default());
    assert!(matches!(summarizer.summarize("not a url"), Err(Error::InvalidUrl(_))));
}

#[test]
fn summarizer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Summarizer>();
}
