//! HTML Meta Tag Extraction
//!
//! One lookup per summary field. Text fields come back exactly as they appear
//! in the document (charset handling happens later, in the assembler); URL
//! fields come back as UTF-8.

use url::Url;

use crate::dom::Page;
use crate::selector::{self, meta, Rule};
use crate::url_utils;
use crate::Options;

fn find(page: &Page, rules: &[Rule]) -> Option<String> {
    selector::lookup(&page.root(), rules).into_option()
}

fn find_url(page: &Page, rules: &[Rule]) -> Option<String> {
    find(page, rules).map(|raw| page.text_lossy(&raw))
}

/// Page title: `og:title`, `twitter:title`, then `<title>`.
#[must_use]
pub fn title(page: &Page) -> Option<String> {
    find(page, meta::TITLE)
}

#[must_use]
pub fn description(page: &Page) -> Option<String> {
    find(page, meta::DESCRIPTION)
}

/// Declared site name. The assembler falls back to the host.
#[must_use]
pub fn site_name(page: &Page) -> Option<String> {
    find(page, meta::SITE_NAME)
}

/// Preview image, made absolute against `site`.
#[must_use]
pub fn thumbnail(page: &Page, site: &Url) -> Option<String> {
    find_url(page, meta::IMAGE)
        .map(|image| url_utils::create_absolute_url(&image, site))
        .filter(|image| !image.is_empty())
}

/// Favicon, declared or synthesized.
#[must_use]
pub fn icon(page: &Page, site: &Url) -> String {
    url_utils::favicon_url(find_url(page, meta::FAVICON).as_deref(), site)
}

/// ActivityPub object the page links to (Misskey, Mastodon and friends).
#[must_use]
pub fn activity_pub(page: &Page) -> Option<String> {
    find_url(page, meta::ACTIVITY_PUB)
}

/// Whether the page is flagged as adult content.
///
/// A narrow, site-specific rule: the configured rating tag must read `"1"`
/// on a host contained in `options.sensitive_host`.
#[must_use]
pub fn is_sensitive(page: &Page, site: &Url, options: &Options) -> bool {
    let host = url_utils::host_with_port(site);
    if !options.sensitive_host.contains(host.as_str()) {
        return false;
    }

    let rating = [Rule::meta_property(&options.sensitive_rating_property)];
    find(page, &rating).as_deref() == Some("1")
}
