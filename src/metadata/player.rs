//! Embeddable player from Twitter player cards and OpenGraph video tags.

use crate::dom::Page;
use crate::result::Player;
use crate::selector::{self, meta, Rule};

const TRACKING_EMBED: &str = "youtube.com/embed/";
const PRIVATE_EMBED: &str = "youtube-nocookie.com/embed/";

fn find(page: &Page, rules: &[Rule]) -> Option<String> {
    selector::lookup(&page.root(), rules).into_option()
}

/// Player iframe URL.
///
/// The Twitter player is used unless the card is a `summary_large_image`
/// (those pages carry a stale or unrelated `twitter:player`). OpenGraph
/// video tags are the fallback either way.
#[must_use]
pub fn player_url(page: &Page) -> String {
    let card = find(page, meta::TWITTER_CARD);

    let twitter = if card.as_deref() == Some("summary_large_image") {
        None
    } else {
        find(page, meta::TWITTER_PLAYER)
    };

    twitter
        .or_else(|| find(page, meta::OG_VIDEO))
        .map(|url| page.text_lossy(&url))
        .unwrap_or_default()
}

fn dimension(page: &Page, rules: &[Rule]) -> u32 {
    find(page, rules)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Player width from meta tags, `0` when absent or not a number.
#[must_use]
pub fn player_width(page: &Page) -> u32 {
    dimension(page, meta::PLAYER_WIDTH)
}

/// Player height from meta tags, `0` when absent or not a number.
#[must_use]
pub fn player_height(page: &Page) -> u32 {
    dimension(page, meta::PLAYER_HEIGHT)
}

/// Player built from meta tags alone. Meta tags carry no permissions.
#[must_use]
pub fn meta_player(page: &Page) -> Player {
    Player {
        url: player_url(page),
        width: player_width(page),
        height: player_height(page),
        allow: Vec::new(),
    }
}

/// Swap a YouTube embed for its no-cookie variant.
///
/// # Examples
///
/// ```
/// use rs_summer::metadata::player::privacy_substitute;
///
/// assert_eq!(
///     privacy_substitute("https://www.youtube.com/embed/abc"),
///     "https://www.youtube-nocookie.com/embed/abc"
/// );
/// assert_eq!(privacy_substitute("https://vimeo.com/1"), "https://vimeo.com/1");
/// ```
#[must_use]
pub fn privacy_substitute(url: &str) -> String {
    url.replacen(TRACKING_EMBED, PRIVATE_EMBED, 1)
}
