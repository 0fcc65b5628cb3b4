//! Metadata assembly.
//!
//! Resolves every field of a [`Summary`] from a parsed page:
//! 1. Player (oEmbed first, meta tags as fallback), with the YouTube
//!    privacy substitution
//! 2. Title, description and site name, as raw page bytes
//! 3. Thumbnail, made absolute
//! 4. Charset resolution over the raw title, then UTF-8 normalization of
//!    the text fields
//! 5. Icon, ActivityPub link and sensitivity flag
//!
//! No step can fail; a field that cannot be resolved is left empty.

pub mod meta_tags;
pub mod player;

use tracing::debug;
use url::Url;

use crate::dom::Page;
use crate::encoding::{self, Charset, CharsetDetector};
use crate::fetch::Fetch;
use crate::oembed;
use crate::result::Summary;
use crate::url_utils;
use crate::Options;

/// Everything the assembler needs besides the page itself.
pub struct Context<'a> {
    pub site_url: &'a Url,
    /// Charset the caller already knows, e.g. from the `Content-Type` header.
    pub declared_charset: Option<&'a str>,
    pub fetcher: &'a dyn Fetch,
    pub detector: &'a dyn CharsetDetector,
    pub options: &'a Options,
}

/// Build the summary for a parsed page.
#[must_use]
pub fn summarize_page(page: &Page, ctx: &Context<'_>) -> Summary {
    let site_url = ctx.site_url;

    let mut player = oembed::resolve_player(page, site_url, ctx.fetcher, ctx.options)
        .unwrap_or_else(|| player::meta_player(page));
    player.url = player::privacy_substitute(&player.url);

    let title = meta_tags::title(page).unwrap_or_default();
    let description = meta_tags::description(page).unwrap_or_default();
    let site_name = meta_tags::site_name(page);

    let title_raw = page.raw_bytes(&title);
    let description_raw = page.raw_bytes(&description);
    let site_name_raw = match &site_name {
        Some(name) => page.raw_bytes(name).into_owned(),
        None => url_utils::host_with_port(site_url).into_bytes(),
    };

    let charset = page_charset(page, &title_raw, ctx);
    debug!("Using charset {charset} for {site_url}");

    Summary {
        url: site_url.to_string(),
        title: encoding::normalize(&title_raw, &charset),
        icon: meta_tags::icon(page, site_url),
        description: encoding::normalize(&description_raw, &charset),
        thumbnail: meta_tags::thumbnail(page, site_url).unwrap_or_default(),
        site_name: encoding::normalize(&site_name_raw, &charset),
        player,
        sensitive: meta_tags::is_sensitive(page, site_url, ctx.options),
        activity_pub: meta_tags::activity_pub(page).unwrap_or_default(),
    }
}

/// Charset of the page text.
///
/// The page's own Shift-JIS/EUC-JP `<meta>` declaration is only consulted
/// when the detector has no answer for an undeclared, non-UTF-8 title.
fn page_charset(page: &Page, title: &[u8], ctx: &Context<'_>) -> Charset {
    encoding::resolve_charset_with(title, ctx.declared_charset, ctx.detector, || encoding::declared_charset(page))
}
