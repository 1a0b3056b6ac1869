use crate::prelude::*;
use apidocs_core::openapi::{self, ApiDescription};
use reqwest::header::COOKIE;
use std::time::Duration;

pub mod analyze;
pub mod endpoints;
pub mod examples;
pub mod export;
pub mod health;
pub mod info;
pub mod search;

// Re-export public data functions for external use (e.g., MCP)
pub use analyze::analyze_data;
pub use endpoints::endpoints_data;
pub use examples::examples_data;
pub use export::export_data;
pub use health::health_check_data;
pub use info::info_data;
pub use search::search_data;

/// Well-known document locations, tried in order against the base URL.
pub const DOC_CANDIDATE_PATHS: [&str; 5] = [
    "/swagger.json",
    "/api-docs",
    "/openapi.json",
    "/v2/api-docs",
    "/v3/api-docs",
];

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Internal documentation portals frequently sit behind browser-gated
/// proxies, so requests go out with a browser User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Message returned by every operation when no document could be located.
pub const DOC_NOT_FOUND: &str =
    "Could not find or analyze the API documentation. Check the URL and cookies.";

#[derive(Debug, clap::Parser)]
#[command(name = "api")]
#[command(about = "API documentation operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Analyze documentation and recommend frontend page groups
    #[clap(name = "analyze")]
    Analyze(analyze::AnalyzeOptions),

    /// List endpoints grouped by tag
    #[clap(name = "endpoints")]
    Endpoints(endpoints::EndpointsOptions),

    /// Probe GET endpoints and report reachability
    #[clap(name = "health")]
    Health(health::HealthOptions),

    /// Generate code examples for one endpoint
    #[clap(name = "examples")]
    Examples(examples::ExamplesOptions),

    /// Search endpoints by path, summary, description, or tag
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Show document info and endpoint statistics
    #[clap(name = "info")]
    Info(info::InfoOptions),

    /// Export the documentation as JSON or Markdown
    #[clap(name = "export")]
    Export(export::ExportOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Analyze(options) => analyze::run(options, global).await,
        Commands::Endpoints(options) => endpoints::run(options, global).await,
        Commands::Health(options) => health::run(options, global).await,
        Commands::Examples(options) => examples::run(options, global).await,
        Commands::Search(options) => search::run(options, global).await,
        Commands::Info(options) => info::run(options, global).await,
        Commands::Export(options) => export::run(options, global).await,
    }
}

/// Parse a `--cookie name=value` argument.
pub fn parse_cookie(raw: &str) -> Result<(String, String), Error> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| Error::InvalidCookie(raw.to_string()))
}

/// Serialize cookie pairs into a single `Cookie` header value.
pub fn cookie_header(cookies: &[(String, String)]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Build the shared HTTP client.
///
/// TLS certificate verification is DISABLED on purpose: the analyzer is
/// routinely pointed at internal documentation portals served with
/// self-signed certificates. Do not reuse this client for anything that
/// needs transport authenticity.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Fetch one URL and parse it as a JSON document.
///
/// Only a status of exactly 200 counts as found. Malformed JSON on a 200
/// response is an error, not a miss. Transport failures are logged and
/// reported as a miss so the caller can try the next candidate.
async fn fetch_json(
    client: &reqwest::Client,
    url: reqwest::Url,
    cookies: &[(String, String)],
) -> Result<Option<serde_json::Value>> {
    let mut request = client.get(url.clone()).timeout(FETCH_TIMEOUT);
    if let Some(header) = cookie_header(cookies) {
        request = request.header(COOKIE, header);
    }

    match request.send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            log::info!("Found API document at {url}");
            let document = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse API document at {}: {}", url, e))?;
            Ok(Some(document))
        }
        Ok(response) => {
            log::debug!("No API document at {url}: HTTP {}", response.status());
            Ok(None)
        }
        Err(e) => {
            log::debug!("Failed to fetch {url}: {e}");
            Ok(None)
        }
    }
}

/// Try the well-known document paths against a base URL, in order.
pub async fn fetch_document(
    client: &reqwest::Client,
    base_url: &str,
    cookies: &[(String, String)],
) -> Result<Option<serde_json::Value>> {
    let base = reqwest::Url::parse(base_url)
        .map_err(|e| eyre!("Invalid documentation URL '{}': {}", base_url, e))?;

    for path in DOC_CANDIDATE_PATHS {
        let url = match base.join(path) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Cannot join {path} onto {base}: {e}");
                continue;
            }
        };
        if let Some(document) = fetch_json(client, url, cookies).await? {
            return Ok(Some(document));
        }
    }

    Ok(None)
}

/// Fetch the base URL as HTML. Any non-200 response or transport failure is
/// treated as "no page".
async fn fetch_html(
    client: &reqwest::Client,
    url: &reqwest::Url,
    cookies: &[(String, String)],
) -> Result<Option<String>> {
    let mut request = client.get(url.clone()).timeout(FETCH_TIMEOUT);
    if let Some(header) = cookie_header(cookies) {
        request = request.header(COOKIE, header);
    }

    match request.send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            let text = response
                .text()
                .await
                .map_err(|e| eyre!("Failed to read HTML from {}: {}", url, e))?;
            Ok(Some(text))
        }
        Ok(response) => {
            log::debug!("No HTML page at {url}: HTTP {}", response.status());
            Ok(None)
        }
        Err(e) => {
            log::debug!("Failed to fetch HTML from {url}: {e}");
            Ok(None)
        }
    }
}

/// Full document discovery: well-known paths first, then the Swagger UI
/// fallback.
///
/// When no candidate path answers, the base URL itself is fetched as HTML
/// and scanned for an embedded `url: "<...>.json"` reference; the resolved
/// reference is fetched exactly once, with no further recursion.
pub async fn fetch_document_with_discovery(
    client: &reqwest::Client,
    base_url: &str,
    cookies: &[(String, String)],
) -> Result<Option<serde_json::Value>> {
    if let Some(document) = fetch_document(client, base_url, cookies).await? {
        return Ok(Some(document));
    }

    let base = reqwest::Url::parse(base_url)
        .map_err(|e| eyre!("Invalid documentation URL '{}': {}", base_url, e))?;
    let Some(html) = fetch_html(client, &base, cookies).await? else {
        return Ok(None);
    };
    let Some(reference) = openapi::discover_document_url(&html) else {
        return Ok(None);
    };
    let resolved = match base.join(&reference) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("Cannot resolve discovered reference '{reference}': {e}");
            return Ok(None);
        }
    };

    log::info!("Discovered document reference in HTML: {resolved}");
    fetch_json(client, resolved, cookies).await
}

/// Fetch, discover, and flatten a document into an [`ApiDescription`].
pub async fn load_description(
    client: &reqwest::Client,
    url: &str,
    cookies: &[(String, String)],
) -> Result<Option<ApiDescription>> {
    let document = fetch_document_with_discovery(client, url, cookies).await?;
    Ok(document.map(|doc| openapi::analyze_document(&doc, url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_splits_on_first_equals() {
        assert_eq!(
            parse_cookie("_oauth2_proxy=abc=def").unwrap(),
            ("_oauth2_proxy".to_string(), "abc=def".to_string())
        );
    }

    #[test]
    fn test_parse_cookie_rejects_missing_separator() {
        assert!(parse_cookie("no-separator").is_err());
        assert!(parse_cookie("=value-only").is_err());
    }

    #[test]
    fn test_cookie_header_joins_pairs() {
        let cookies = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ];

        assert_eq!(cookie_header(&cookies), Some("a=1; b=2".to_string()));
    }

    #[test]
    fn test_cookie_header_empty_is_none() {
        assert_eq!(cookie_header(&[]), None);
    }

    #[test]
    fn test_candidate_paths_resolve_against_base() {
        let base = reqwest::Url::parse("https://api.example.com/docs/index.html").unwrap();

        // Absolute candidate paths replace the base path entirely.
        assert_eq!(
            base.join(DOC_CANDIDATE_PATHS[0]).unwrap().as_str(),
            "https://api.example.com/swagger.json"
        );
        assert_eq!(
            base.join("/v3/api-docs").unwrap().as_str(),
            "https://api.example.com/v3/api-docs"
        );
        // Relative references resolve against the base directory.
        assert_eq!(
            base.join("v2/swagger.json").unwrap().as_str(),
            "https://api.example.com/docs/v2/swagger.json"
        );
    }
}
