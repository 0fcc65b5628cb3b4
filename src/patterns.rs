//! Compiled regex patterns.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// `allow="…"` / `allow='…'` attribute values inside an embed snippet.
///
/// The snippet is opaque markup from a third party, so it is scanned as text
/// rather than parsed.
pub static IFRAME_ALLOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"allow\s*=\s*["']([^"']+?)["']"#).expect("IFRAME_ALLOW regex")
});

/// `charset=…` parameter of a `Content-Type` value.
pub static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("CHARSET_PARAM regex")
});
