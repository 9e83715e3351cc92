use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use url::Url;

/// Resolve a build input argument to its JSON payload.
///
/// Accepts a local file path or an http(s) URL returning JSON. Credentialed
/// transports (e.g. an authenticated spreadsheet API) are external: export
/// the rows first and point this at the result.
pub async fn resolve_to_json(input: &str) -> Result<serde_json::Value> {
    if let Some(url) = parse_http_url(input) {
        return fetch_url_json(url.as_str()).await;
    }
    read_json_file(input)
}

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let raw = fs::read_to_string(path.as_ref())
        .with_context(|| format!("failed to read {}", path.as_ref().display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("invalid json: {e}"))
}

async fn fetch_url_json(url: &str) -> Result<serde_json::Value> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http error: {status}"));
    }
    let v = resp.json::<serde_json::Value>().await?;
    Ok(v)
}

fn parse_http_url(s: &str) -> Option<Url> {
    let url = Url::parse(s).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
