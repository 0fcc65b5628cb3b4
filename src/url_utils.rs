//! URL Utility Functions
//!
//! Turning the relative paths pages put in their meta tags into URLs a
//! preview can load.

use url::Url;

/// Host of `url`, with the port when it is not the scheme default.
///
/// # Examples
///
/// ```
/// use rs_summer::url_utils::host_with_port;
/// use url::Url;
///
/// assert_eq!(host_with_port(&Url::parse("https://ex.com/a").unwrap()), "ex.com");
/// assert_eq!(host_with_port(&Url::parse("https://ex.com:8443/").unwrap()), "ex.com:8443");
/// ```
#[must_use]
pub fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Convert a relative or absolute URL to absolute form.
///
/// Root-relative paths (`/img/x.png`) are glued onto the base's scheme and
/// host as they are. Other relative forms are resolved against `base`, and
/// anything that already parses as a URL is returned untouched.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if url_str.starts_with('/') && !url_str.starts_with("//") {
        return format!("{}://{}{}", base.scheme(), host_with_port(base), url_str);
    }

    if Url::parse(url_str).is_ok() {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Favicon URL for a page, always served over `https`.
///
/// Without a declared icon the conventional `/favicon.ico` on the page's host
/// is assumed. A declared `http://` icon is upgraded to `https://`; other
/// schemes (`data:` icons) are left alone.
#[must_use]
pub fn favicon_url(declared: Option<&str>, site: &Url) -> String {
    let declared = declared.map(str::trim).unwrap_or_default();

    if declared.is_empty() {
        return format!("https://{}/favicon.ico", host_with_port(site));
    }

    if declared.starts_with("https://") {
        return declared.to_string();
    }

    let mut base = site.clone();
    // Only fails for non-special schemes, where the original base is kept.
    let _ = base.set_scheme("https");
    let resolved = create_absolute_url(declared, &base);

    match Url::parse(&resolved) {
        Ok(mut icon) if icon.scheme() == "http" => {
            // http -> https is always a permitted scheme change.
            let _ = icon.set_scheme("https");
            icon.to_string()
        }
        _ => resolved,
    }
}
