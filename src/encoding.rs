//! Character encoding detection and transcoding.
//!
//! Summaries are always UTF-8, but plenty of Japanese sites still serve
//! Shift-JIS or EUC-JP. The charset is taken from the caller (usually the HTTP
//! `Content-Type` header) when known; otherwise it is inferred from the raw
//! bytes of the page title. Only Shift-JIS and EUC-JP are transcoded, every
//! other charset passes through as UTF-8.

use std::fmt;

use encoding_rs::{Encoding, EUC_JP, SHIFT_JIS, UTF_8};
use tracing::debug;

use crate::dom::Page;
use crate::patterns::CHARSET_PARAM;
use crate::selector::{self, meta};

/// A resolved document charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    ShiftJis,
    EucJp,
    /// Any other label; text is passed through untouched.
    Other(String),
}

impl Charset {
    /// Interpret a charset label.
    ///
    /// Labels are matched the way browsers match them, so `sjis`, `x-sjis`
    /// and `Shift_JIS` all resolve to [`Charset::ShiftJis`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match Encoding::for_label(label.as_bytes()) {
            Some(enc) if enc == SHIFT_JIS => Self::ShiftJis,
            Some(enc) if enc == EUC_JP => Self::EucJp,
            Some(enc) if enc == UTF_8 => Self::Utf8,
            Some(enc) => Self::Other(enc.name().to_string()),
            None => Self::Other(label.to_ascii_lowercase()),
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Utf8 => "utf-8",
            Self::ShiftJis => "shift_jis",
            Self::EucJp => "euc-jp",
            Self::Other(label) => label,
        }
    }

    fn is_japanese(&self) -> bool {
        matches!(self, Self::ShiftJis | Self::EucJp)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// === Detection ===

/// One guess from a charset detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Charset label as reported by the detector.
    pub charset: String,
    /// Confidence, 0 to 100.
    pub confidence: u8,
    /// Language the guess is based on, when the detector reports one.
    pub language: Option<String>,
}

/// Detector failure. Resolution falls back to UTF-8.
#[derive(Debug, thiserror::Error)]
#[error("Charset detection failed: {0}")]
pub struct DetectError(pub String);

/// Statistical charset detection over raw bytes.
pub trait CharsetDetector: Send + Sync {
    /// Candidates for `bytes`, best first.
    fn detect(&self, bytes: &[u8]) -> Result<Vec<Candidate>, DetectError>;
}

/// [`CharsetDetector`] backed by `chardetng`.
///
/// `chardetng` settles on a single encoding, which is reported as the only
/// candidate with full confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetngDetector;

impl CharsetDetector for ChardetngDetector {
    fn detect(&self, bytes: &[u8]) -> Result<Vec<Candidate>, DetectError> {
        if bytes.is_empty() {
            return Err(DetectError("no input".to_string()));
        }

        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        let encoding = detector.guess(None, true);

        Ok(vec![Candidate {
            charset: encoding.name().to_string(),
            confidence: 100,
            language: None,
        }])
    }
}

/// Decide which charset the page text is in.
///
/// 1. A declared charset is trusted as is.
/// 2. A title that is valid UTF-8 means UTF-8.
/// 3. Otherwise the detector decides: a Shift-JIS or EUC-JP candidate wins
///    wherever it ranks, else the top candidate. No candidates, or a
///    detector error, means UTF-8.
pub fn resolve_charset(title: &[u8], declared: Option<&str>, detector: &dyn CharsetDetector) -> Charset {
    resolve_charset_with(title, declared, detector, || None)
}

/// [`resolve_charset`] with a last resort for when the detector has no
/// answer, such as the page's own `<meta>` declaration.
pub fn resolve_charset_with(
    title: &[u8],
    declared: Option<&str>,
    detector: &dyn CharsetDetector,
    fallback: impl FnOnce() -> Option<Charset>,
) -> Charset {
    if let Some(label) = declared.filter(|l| !l.trim().is_empty()) {
        return Charset::from_label(label);
    }

    if std::str::from_utf8(title).is_ok() {
        return Charset::Utf8;
    }

    detect(title, detector)
        .or_else(fallback)
        .unwrap_or(Charset::Utf8)
}

fn detect(title: &[u8], detector: &dyn CharsetDetector) -> Option<Charset> {
    let candidates = match detector.detect(title) {
        Ok(candidates) => candidates,
        Err(e) => {
            debug!("{e}");
            return None;
        }
    };

    let charsets: Vec<Charset> = candidates.iter().map(|c| Charset::from_label(&c.charset)).collect();
    if let Some(japanese) = charsets.iter().find(|c| c.is_japanese()) {
        return Some(japanese.clone());
    }

    charsets.into_iter().next()
}

/// Convert text in `charset` to UTF-8.
///
/// Malformed Shift-JIS or EUC-JP yields an empty string. Any other charset is
/// read as UTF-8, with invalid sequences replaced.
#[must_use]
pub fn normalize(bytes: &[u8], charset: &Charset) -> String {
    let encoding = match charset {
        Charset::ShiftJis => SHIFT_JIS,
        Charset::EucJp => EUC_JP,
        Charset::Utf8 | Charset::Other(_) => return String::from_utf8_lossy(bytes).into_owned(),
    };

    match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text.into_owned(),
        None => {
            debug!("Text is not valid {}, dropping it", encoding.name());
            String::new()
        }
    }
}

// === Declarations ===

/// Charset named by a `Content-Type` header value, if any.
///
/// # Examples
///
/// ```
/// use rs_summer::encoding::{charset_from_content_type, Charset};
///
/// assert_eq!(
///     charset_from_content_type("text/html; charset=Shift_JIS"),
///     Some(Charset::ShiftJis)
/// );
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<Charset> {
    CHARSET_PARAM
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| Charset::from_label(m.as_str()))
}

/// Japanese charset declared in the page's own `<meta>` tags.
///
/// Only Shift-JIS and EUC-JP declarations are reported; they are the ones
/// that change how text is decoded.
#[must_use]
pub fn declared_charset(page: &Page) -> Option<Charset> {
    let root = page.root();

    let from_content_type = selector::lookup(&root, meta::CONTENT_TYPE)
        .into_option()
        .and_then(|ct| charset_from_content_type(&page.text_lossy(&ct)));

    from_content_type
        .or_else(|| {
            selector::lookup(&root, meta::META_CHARSET)
                .into_option()
                .map(|label| Charset::from_label(&label))
        })
        .filter(Charset::is_japanese)
}
