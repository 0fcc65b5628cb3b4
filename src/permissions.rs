//! Iframe permission filtering for oEmbed snippets.
//!
//! The `html` of an oEmbed response is untrusted markup. Whatever its
//! `allow` attributes ask for is cut down to the configured allow-list, so an
//! embed can never obtain motion or sensor access through a preview.

use crate::patterns::IFRAME_ALLOW;

/// Every permission requested by `allow` attributes in `snippet`, in order of
/// appearance. Duplicates are kept.
#[must_use]
pub fn requested_permissions(snippet: &str) -> Vec<String> {
    IFRAME_ALLOW
        .captures_iter(snippet)
        .filter_map(|c| c.get(1))
        .flat_map(|m| m.as_str().split(';'))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Permissions requested by `snippet` that are also in `allow_list`.
///
/// Order follows the snippet; each permission appears once.
///
/// # Examples
///
/// ```
/// use rs_summer::permissions::filter_permissions;
///
/// let allow_list = ["autoplay".to_string(), "web-share".to_string()];
/// let granted = filter_permissions(
///     r#"<iframe allow="accelerometer; autoplay; gyroscope; web-share"></iframe>"#,
///     &allow_list,
/// );
/// assert_eq!(granted, vec!["autoplay", "web-share"]);
/// ```
#[must_use]
pub fn filter_permissions(snippet: &str, allow_list: &[String]) -> Vec<String> {
    let mut granted: Vec<String> = Vec::new();
    for permission in requested_permissions(snippet) {
        if allow_list.contains(&permission) && !granted.contains(&permission) {
            granted.push(permission);
        }
    }
    granted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    const YOUTUBE_IFRAME: &str = "<iframe width=\"200\" height=\"113\" src=\"https://www.youtube.com/embed/zK-RUYiYLok?feature=oembed\" frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share\" allowfullscreen title=\"EP\"></iframe>";

    fn safe() -> Vec<String> {
        Options::default().safe_permissions
    }

    #[test]
    fn requested_includes_everything() {
        let requested = requested_permissions(YOUTUBE_IFRAME);
        assert_eq!(
            requested,
            vec![
                "accelerometer",
                "autoplay",
                "clipboard-write",
                "encrypted-media",
                "gyroscope",
                "picture-in-picture",
                "web-share",
            ]
        );
    }

    #[test]
    fn youtube_iframe_filtered() {
        assert_eq!(
            filter_permissions(YOUTUBE_IFRAME, &safe()),
            vec!["autoplay", "clipboard-write", "picture-in-picture", "web-share"]
        );
    }

    #[test]
    fn sensors_are_never_granted() {
        let granted = filter_permissions(r#"<iframe allow="accelerometer; autoplay; gyroscope; web-share">"#, &safe());
        assert_eq!(granted, vec!["autoplay", "web-share"]);
        assert!(!granted.iter().any(|p| p == "accelerometer" || p == "gyroscope"));
    }

    #[test]
    fn multiple_attributes_and_duplicates() {
        let snippet = r#"<iframe allow='fullscreen;;  autoplay '></iframe><iframe allow="autoplay; fullscreen">"#;
        assert_eq!(filter_permissions(snippet, &safe()), vec!["fullscreen", "autoplay"]);
    }

    #[test]
    fn no_allow_attribute() {
        assert!(filter_permissions("<iframe allowfullscreen></iframe>", &safe()).is_empty());
        assert!(filter_permissions("", &safe()).is_empty());
    }

    #[test]
    fn empty_allow_list_grants_nothing() {
        assert!(filter_permissions(YOUTUBE_IFRAME, &[]).is_empty());
    }
}
