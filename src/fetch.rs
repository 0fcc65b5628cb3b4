//! HTTP fetching.
//!
//! The engine only ever issues plain GET requests, through the [`Fetch`]
//! trait. [`HttpFetcher`] is the production implementation: it refuses
//! targets on loopback or private networks and on non-standard ports, and it
//! bounds both the time a request may take and the size of the body it reads.

use std::io::Read;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use url::{Host, Url};

/// Error returned by a [`Fetch`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The target is not allowed: private or loopback address, non-standard
    /// port, or non-HTTP scheme.
    #[error("Unsafe URL detected: {0}")]
    UnsafeUrl(String),

    /// The response body exceeded the size limit.
    #[error("Response exceeds {0} bytes")]
    TooLarge(usize),

    /// Connection, TLS, timeout or protocol failure.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// True when the request was refused before being sent.
    #[must_use]
    pub fn is_unsafe_url(&self) -> bool {
        matches!(self, Self::UnsafeUrl(_))
    }
}

/// A fetched response.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Response body, at most the fetcher's size limit.
    pub body: Vec<u8>,
}

/// Something that can GET a URL.
pub trait Fetch: Send + Sync {
    /// GET `url` with the given `User-Agent`.
    fn get(&self, url: &Url, user_agent: &str) -> Result<Response, FetchError>;
}

// === Target guard ===

/// Reject URLs the fetcher must not contact.
///
/// Only `http`/`https` on ports 80 and 443 are allowed, and an IP-literal host
/// has to be publicly routable. Domain names are not resolved here; the
/// [`HttpFetcher`] checks every address a name resolves to at connect time.
pub fn check_target(url: &Url) -> Result<(), FetchError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::UnsafeUrl(format!("scheme {} not allowed", url.scheme())));
    }

    match url.port_or_known_default() {
        Some(80 | 443) => {}
        Some(port) => return Err(FetchError::UnsafeUrl(format!("port {port} not allowed"))),
        None => return Err(FetchError::UnsafeUrl("missing port".to_string())),
    }

    let ip = match url.host() {
        Some(Host::Ipv4(v4)) => IpAddr::V4(v4),
        Some(Host::Ipv6(v6)) => IpAddr::V6(v6),
        Some(Host::Domain(_)) => return Ok(()),
        None => return Err(FetchError::UnsafeUrl(format!("{url} has no host"))),
    };

    if is_public(ip) {
        Ok(())
    } else {
        Err(FetchError::UnsafeUrl(format!("{ip} is not a public address")))
    }
}

/// Addresses a host resolved to, if every one of them is publicly routable.
///
/// A single private address rejects the whole host, so a name cannot mix a
/// public and an internal record to slip past the check.
pub fn public_addrs(host: &str, addrs: impl IntoIterator<Item = SocketAddr>) -> Result<Vec<SocketAddr>, FetchError> {
    let addrs: Vec<SocketAddr> = addrs.into_iter().collect();

    if addrs.is_empty() {
        return Err(FetchError::Transport(format!("no address for {host}")));
    }

    if let Some(addr) = addrs.iter().find(|a| !is_public(a.ip())) {
        return Err(FetchError::UnsafeUrl(format!("{host} resolves to {}", addr.ip())));
    }

    Ok(addrs)
}

/// True when `ip` is globally routable.
#[must_use]
pub fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(v4),
            None => is_public_v6(v6),
        },
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    let shared = a == 100 && (64..128).contains(&b);
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || shared
        || a == 0
        || a >= 240)
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    let documentation = first == 0x2001 && ip.segments()[1] == 0x0db8;
    !(ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() || unique_local || link_local || documentation)
}

/// Whether a redirect to `next` may be followed after `hops` earlier hops.
pub fn check_redirect(hops: usize, next: &Url, max_redirects: usize) -> Result<(), FetchError> {
    if hops >= max_redirects {
        return Err(FetchError::Transport("too many redirects".to_string()));
    }
    check_target(next)
}

/// Read a body of at most `max_size` bytes.
pub fn read_capped(reader: impl Read, max_size: usize) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    reader
        .take(max_size as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if body.len() > max_size {
        return Err(FetchError::TooLarge(max_size));
    }
    Ok(body)
}

// === reqwest implementation ===

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use std::error::Error as StdError;
    use std::sync::Arc;
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::dns::{Addrs, Name, Resolve, Resolving};
    use reqwest::header::{CONTENT_TYPE, USER_AGENT};
    use reqwest::redirect;
    use tracing::warn;
    use url::Url;

    use super::{check_redirect, check_target, public_addrs, read_capped, Fetch, FetchError, Response};
    use crate::Options;

    /// Resolver that only hands public addresses to the connector.
    ///
    /// The addresses checked are the addresses connected to, so a name that
    /// changes its answer between lookups cannot reach an internal host.
    #[derive(Debug, Clone, Copy, Default)]
    struct PublicOnlyResolver;

    impl Resolve for PublicOnlyResolver {
        fn resolve(&self, name: Name) -> Resolving {
            let host = name.as_str().to_string();
            Box::pin(async move {
                lookup_public(host)
                    .await
                    .map(|addrs| Box::new(addrs.into_iter()) as Addrs)
                    .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)
            })
        }
    }

    async fn lookup_public(host: String) -> Result<Vec<std::net::SocketAddr>, FetchError> {
        let addrs = tokio::net::lookup_host((host.as_str(), 0))
            .await
            .map_err(|e| FetchError::Transport(format!("cannot resolve {host}: {e}")))?;
        public_addrs(&host, addrs)
    }

    /// Recover a [`FetchError`] raised by the resolver or the redirect policy.
    fn classify(e: &reqwest::Error) -> FetchError {
        let mut source = StdError::source(e);
        while let Some(err) = source {
            if let Some(fetch) = err.downcast_ref::<FetchError>() {
                return fetch.clone();
            }
            source = err.source();
        }
        FetchError::Transport(e.to_string())
    }

    /// Blocking [`Fetch`] implementation on `reqwest`.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        max_size: usize,
    }

    impl HttpFetcher {
        /// Build a fetcher with the timeout, size and redirect limits from `options`.
        pub fn new(options: &Options) -> Result<Self, FetchError> {
            Self::with_limits(options.timeout, options.max_response_size, options.max_redirects)
        }

        /// Build a fetcher with explicit limits.
        pub fn with_limits(timeout: Duration, max_size: usize, max_redirects: usize) -> Result<Self, FetchError> {
            let policy = redirect::Policy::custom(move |attempt| {
                match check_redirect(attempt.previous().len(), attempt.url(), max_redirects) {
                    Ok(()) => attempt.follow(),
                    Err(e) => {
                        warn!("Refusing redirect to {}: {e}", attempt.url());
                        attempt.error(e)
                    }
                }
            });

            let client = Client::builder()
                .timeout(timeout)
                .redirect(policy)
                .dns_resolver(Arc::new(PublicOnlyResolver))
                .build()
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            Ok(Self { client, max_size })
        }
    }

    impl Fetch for HttpFetcher {
        fn get(&self, url: &Url, user_agent: &str) -> Result<Response, FetchError> {
            check_target(url)?;

            let response = self
                .client
                .get(url.as_str())
                .header(USER_AGENT, user_agent)
                .send()
                .map_err(|e| classify(&e))?;

            if response.content_length().is_some_and(|len| len > self.max_size as u64) {
                return Err(FetchError::TooLarge(self.max_size));
            }

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);

            let body = read_capped(response, self.max_size)?;

            Ok(Response { status, content_type, body })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn localhost_never_resolves_to_a_usable_address() {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let err = runtime.block_on(lookup_public("localhost".to_string())).unwrap_err();
            assert!(err.is_unsafe_url(), "{err}");
        }
    }
}
