//! Reads HTML from stdin and prints its summary as JSON.
//!
//! The page URL is the first argument; an optional second argument names the
//! charset (`utf-8`, `shift_jis`, `euc-jp`).

use rs_summer::{Options, Summarizer};
use std::env;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(site_url) = args.next().and_then(|s| Url::parse(&s).ok()) else {
        eprintln!("usage: summarize_stdin <page-url> [charset] < page.html");
        std::process::exit(2);
    };
    let charset = args.next();

    // Read HTML from stdin
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let result = Summarizer::new(Options::default())
        .and_then(|s| s.summarize_html(&site_url, &html, charset.as_deref()));

    match result {
        Ok(summary) => println!("{}", serde_json::to_string(&summary).unwrap_or_default()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
