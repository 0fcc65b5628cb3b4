//! Document adapter.
//!
//! Wraps a `dom_query` document together with the knowledge needed to turn
//! extracted text back into the page's original bytes.
//!
//! Pages that are not valid UTF-8 (Shift-JIS and EUC-JP sites are the usual
//! suspects) cannot be handed to the parser as `&str` directly. Instead every
//! byte is mapped onto a char first: ASCII stays as is and each byte `>= 0x80`
//! becomes a code point in `U+F780..=U+F7FF` (the `x-user-defined` mapping).
//! Markup is pure ASCII so the tree comes out the same, and any attribute or
//! text fragment can be mapped back to its exact bytes for charset handling.

use std::borrow::Cow;

pub use dom_query::{Document, NodeRef};
use encoding_rs::X_USER_DEFINED;

use crate::error::{Error, Result};

/// First code point of the byte-preserving range used for `0x80..=0xFF`.
const BYTE_PLANE: u32 = 0xF700;

/// How the page text maps back onto source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMapping {
    /// Source was valid UTF-8; text is the source.
    Utf8,
    /// Source bytes were carried through `x-user-defined`.
    Bytes,
}

/// A parsed page.
pub struct Page {
    document: Document,
    mapping: TextMapping,
}

impl Page {
    /// Parse raw page bytes.
    ///
    /// Fails only when there is no document to speak of (empty or
    /// whitespace-only input); the parser itself recovers from any markup.
    pub fn parse(html: &[u8]) -> Result<Self> {
        if html.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::ParseError("empty document".to_string()));
        }

        if let Ok(text) = std::str::from_utf8(html) {
            return Ok(Self {
                document: Document::from(text),
                mapping: TextMapping::Utf8,
            });
        }

        let (text, _) = X_USER_DEFINED.decode_without_bom_handling(html);
        Ok(Self {
            document: Document::from(text.as_ref()),
            mapping: TextMapping::Bytes,
        })
    }

    /// Parse an already-decoded HTML string.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Document::from(html),
            mapping: TextMapping::Utf8,
        }
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Root node of the tree (the document node).
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.document.root()
    }

    /// True when the source bytes were not valid UTF-8.
    #[must_use]
    pub fn is_byte_mapped(&self) -> bool {
        self.mapping == TextMapping::Bytes
    }

    /// The original source bytes of a fragment extracted from this page.
    #[must_use]
    pub fn raw_bytes<'a>(&self, fragment: &'a str) -> Cow<'a, [u8]> {
        match self.mapping {
            TextMapping::Utf8 => Cow::Borrowed(fragment.as_bytes()),
            TextMapping::Bytes => Cow::Owned(unmap_bytes(fragment)),
        }
    }

    /// A fragment as UTF-8 text, replacing bytes that are not valid UTF-8.
    ///
    /// Used for URL-valued fields, which never go through charset handling.
    #[must_use]
    pub fn text_lossy(&self, fragment: &str) -> String {
        match self.mapping {
            TextMapping::Utf8 => fragment.to_string(),
            TextMapping::Bytes => String::from_utf8_lossy(&unmap_bytes(fragment)).into_owned(),
        }
    }
}

/// Reverse the byte mapping.
///
/// Characters outside the byte plane (entity references decode to real
/// Unicode, for instance) are written out as UTF-8.
#[allow(clippy::cast_possible_truncation)]
fn unmap_bytes(fragment: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(fragment.len());
    for c in fragment.chars() {
        let cp = u32::from(c);
        if cp < 0x80 {
            out.push(cp as u8);
        } else if (BYTE_PLANE + 0x80..=BYTE_PLANE + 0xFF).contains(&cp) {
            out.push((cp - BYTE_PLANE) as u8);
        } else {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    out
}

// === Node helpers ===

/// True when `node` is an element with tag `tag`.
#[inline]
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|name| &*name == tag)
}

/// Value of attribute `key` on `node`.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, key: &str) -> Option<String> {
    node.attr(key).map(|v| v.to_string())
}

/// Content of the node's first child, when that child is a text node.
#[must_use]
pub fn first_text_child(node: &NodeRef) -> Option<String> {
    node.first_child()
        .filter(NodeRef::is_text)
        .map(|child| child.text().to_string())
}
