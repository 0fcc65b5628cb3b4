//! Selector Infrastructure
//!
//! A rule-list search over the document tree. Each metadata field is described
//! by an ordered list of [`Rule`]s (highest priority first) and resolved with
//! [`search`]; the rule lists themselves live in [`meta`].
//!
//! The walk is depth-first pre-order. At each node the rules are tried in
//! order before descending, so the *position* of a match in the document
//! matters more than the rule's priority: a low-priority rule matching in
//! `<head>` beats a high-priority rule matching later in `<body>`.

use dom_query::NodeRef;

use crate::dom;

pub mod meta;

/// A single match rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule<'a> {
    /// First text child of a `<title>` element.
    TitleText,

    /// `<tag key="value" target="…">` yields the value of `target`.
    Attr {
        tag: &'a str,
        key: &'a str,
        value: &'a str,
        target: &'a str,
    },
}

impl<'a> Rule<'a> {
    /// `<meta property="…" content="…">`
    #[must_use]
    pub const fn meta_property(value: &'a str) -> Self {
        Self::Attr { tag: "meta", key: "property", value, target: "content" }
    }

    /// `<meta name="…" content="…">`
    #[must_use]
    pub const fn meta_name(value: &'a str) -> Self {
        Self::Attr { tag: "meta", key: "name", value, target: "content" }
    }

    /// `<link rel="…" href="…">`
    #[must_use]
    pub const fn link_rel(value: &'a str) -> Self {
        Self::Attr { tag: "link", key: "rel", value, target: "href" }
    }

    /// `<link type="…" href="…">`
    #[must_use]
    pub const fn link_type(value: &'a str) -> Self {
        Self::Attr { tag: "link", key: "type", value, target: "href" }
    }

    /// Apply the rule to one node.
    ///
    /// `None` when the rule does not match; `Some` with the (possibly empty)
    /// yielded value when it does.
    fn apply(&self, node: &NodeRef) -> Option<String> {
        match *self {
            Rule::TitleText => {
                dom::is_tag(node, "title").then(|| dom::first_text_child(node).unwrap_or_default())
            }
            Rule::Attr { tag, key, value, target } => {
                if dom::is_tag(node, tag) && node.attr(key).is_some_and(|v| &*v == value) {
                    Some(dom::attr(node, target).unwrap_or_default())
                } else {
                    None
                }
            }
        }
    }
}

/// Outcome of a rule-list search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A rule matched with a non-empty value.
    Found(String),
    /// Rules matched, but every matched value was empty.
    Blank,
    /// No rule matched anywhere.
    Missing,
}

impl Lookup {
    /// The found value, if any.
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Blank | Lookup::Missing => None,
        }
    }

    /// The found value, or an empty string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.into_option().unwrap_or_default()
    }
}

/// Search the tree under `root` with a rule list.
///
/// The first rule that matches a node settles that node: a non-empty value
/// ends the search, an empty one skips the node and its whole subtree. Nodes
/// no rule matches are descended into.
#[must_use]
pub fn lookup(root: &NodeRef, rules: &[Rule]) -> Lookup {
    let mut outcome = Lookup::Missing;
    let mut stack = vec![*root];

    while let Some(node) = stack.pop() {
        match rules.iter().find_map(|rule| rule.apply(&node)) {
            Some(value) if !value.is_empty() => return Lookup::Found(value),
            Some(_) => outcome = Lookup::Blank,
            None => {
                let first = stack.len();
                let mut child = node.first_child();
                while let Some(c) = child {
                    stack.push(c);
                    child = c.next_sibling();
                }
                stack[first..].reverse();
            }
        }
    }

    outcome
}

/// Search the tree under `root`, returning an empty string when nothing is found.
///
/// # Example
///
/// ```rust
/// use rs_summer::dom::Page;
/// use rs_summer::selector::{self, Rule};
///
/// let page = Page::from_html(r#"<html><head><title>Plain</title>
///     <meta property="og:title" content="Open Graph"></head></html>"#);
///
/// // The <title> comes first in the document, so it wins over og:title.
/// let rules = [Rule::meta_property("og:title"), Rule::TitleText];
/// assert_eq!(selector::search(&page.root(), &rules), "Plain");
/// ```
#[must_use]
pub fn search(root: &NodeRef, rules: &[Rule]) -> String {
    lookup(root, rules).into_string()
}
