//! Metadata Selectors
//!
//! Rule lists for every summary field, highest priority first. OpenGraph
//! comes before Twitter cards, which come before legacy HTML tags.

use crate::selector::Rule;

// ============================================================
// TEXT FIELDS
// ============================================================

pub static TITLE: &[Rule] = &[
    Rule::meta_property("og:title"),
    Rule::meta_name("twitter:title"),
    Rule::meta_property("twitter:title"),
    Rule::TitleText,
];

pub static DESCRIPTION: &[Rule] = &[
    Rule::meta_property("og:description"),
    Rule::meta_name("twitter:description"),
    Rule::meta_property("twitter:description"),
    Rule::meta_name("description"),
];

/// `twitter:site` is a handle (`@example`), only used when there is no
/// `og:site_name`.
pub static SITE_NAME: &[Rule] = &[
    Rule::meta_property("og:site_name"),
    Rule::meta_name("twitter:site"),
];

// ============================================================
// URL FIELDS
// ============================================================

pub static IMAGE: &[Rule] = &[
    Rule::meta_property("og:image"),
    Rule::meta_name("twitter:image"),
    Rule::meta_property("twitter:image"),
    Rule::link_rel("image_src"),
    Rule::link_rel("apple-touch-icon"),
    Rule::link_rel("apple-touch-icon image_src"),
];

pub static FAVICON: &[Rule] = &[Rule::link_rel("shortcut icon"), Rule::link_rel("icon")];

pub static ACTIVITY_PUB: &[Rule] = &[Rule::link_type("application/activity+json")];

pub static OEMBED: &[Rule] = &[Rule::link_type("application/json+oembed")];

// ============================================================
// PLAYER
// ============================================================

pub static TWITTER_CARD: &[Rule] = &[
    Rule::meta_name("twitter:card"),
    Rule::meta_property("twitter:card"),
];

pub static TWITTER_PLAYER: &[Rule] = &[
    Rule::meta_name("twitter:player"),
    Rule::meta_property("twitter:player"),
];

pub static OG_VIDEO: &[Rule] = &[
    Rule::meta_property("og:video"),
    Rule::meta_property("og:video:secure_url"),
    Rule::meta_property("og:video:url"),
];

pub static PLAYER_WIDTH: &[Rule] = &[
    Rule::meta_name("twitter:player:width"),
    Rule::meta_property("twitter:player:width"),
    Rule::meta_property("og:video:width"),
];

pub static PLAYER_HEIGHT: &[Rule] = &[
    Rule::meta_name("twitter:player:height"),
    Rule::meta_property("twitter:player:height"),
    Rule::meta_property("og:video:height"),
];

// ============================================================
// CHARSET DECLARATIONS
// ============================================================

/// `<meta http-equiv="Content-Type" content="text/html; charset=…">`
pub static CONTENT_TYPE: &[Rule] = &[
    Rule::Attr { tag: "meta", key: "http-equiv", value: "Content-Type", target: "content" },
    Rule::Attr { tag: "meta", key: "http-equiv", value: "content-type", target: "content" },
];

/// `<meta charset="…">`, yielding the label itself.
///
/// The search engine only matches on a known attribute value, so the labels
/// this crate can act on are listed with their common spellings.
pub static META_CHARSET: &[Rule] = &[
    Rule::Attr { tag: "meta", key: "charset", value: "Shift_JIS", target: "charset" },
    Rule::Attr { tag: "meta", key: "charset", value: "shift_jis", target: "charset" },
    Rule::Attr { tag: "meta", key: "charset", value: "EUC-JP", target: "charset" },
    Rule::Attr { tag: "meta", key: "charset", value: "euc-jp", target: "charset" },
];
