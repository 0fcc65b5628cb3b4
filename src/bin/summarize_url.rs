//! Fetches one or more URLs and prints each summary as a JSON line.
//!
//! Set `RUST_LOG=rs_summer=debug` to see charset and oEmbed decisions.

use rs_summer::{Options, Summarizer};
use std::env;
use std::error::Error;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let urls: Vec<String> = env::args().skip(1).collect();
    if urls.is_empty() {
        return Err("usage: summarize_url <url>...".into());
    }

    let summarizer = Summarizer::new(Options::default())?;
    let mut out = BufWriter::new(io::stdout().lock());
    let mut failed = 0usize;

    for url in &urls {
        match summarizer.summarize(url) {
            Ok(summary) => writeln!(out, "{}", serde_json::to_string(&summary)?)?,
            Err(e) => {
                tracing::warn!("{url}: {e}");
                failed = failed.saturating_add(1);
            }
        }
    }
    out.flush()?;

    if failed == urls.len() {
        return Err(format!("no URL could be summarized ({failed} failed)").into());
    }
    Ok(())
}
