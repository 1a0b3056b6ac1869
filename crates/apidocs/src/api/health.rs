use crate::prelude::{println, *};
use apidocs_core::openapi::{EndpointRecord, Method};
use apidocs_core::probe::{format_health_report, ProbeOutcome, ProbeResult};
use futures::future::join_all;
use reqwest::header::COOKIE;
use std::time::{Duration, Instant};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct HealthOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Maximum number of endpoints to probe
    #[arg(short, long, default_value = "10")]
    pub max_endpoints: usize,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: HealthOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Health-checking up to {} endpoints of {}...",
            options.max_endpoints, options.url
        );
    }

    let report = health_check_data(&options.url, &options.cookies, options.max_endpoints).await?;
    println!("{}", report);

    Ok(())
}

/// Probes a bounded prefix of the documented GET endpoints and returns the
/// rendered health report.
///
/// Probes run concurrently but `join_all` keeps result order equal to
/// extraction order, so the report lists endpoints as the document does.
pub async fn health_check_data(
    url: &str,
    cookies: &[(String, String)],
    max_endpoints: usize,
) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    let targets: Vec<&EndpointRecord> = description
        .endpoints
        .iter()
        .filter(|endpoint| endpoint.method == Method::Get)
        .take(max_endpoints)
        .collect();

    let probes = targets.iter().map(|endpoint| {
        probe_endpoint(
            &client,
            &description.base_url,
            endpoint,
            cookies,
            super::PROBE_TIMEOUT,
        )
    });
    let results: Vec<ProbeResult> = join_all(probes).await;

    Ok(format_health_report(&description.title, &results))
}

/// Issue one live request against an endpoint and classify the outcome.
///
/// Write-style methods are sent with an empty JSON body. Transport-level
/// failures never propagate; they come back as a network-error outcome with
/// zero latency.
pub async fn probe_endpoint(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &EndpointRecord,
    cookies: &[(String, String)],
    timeout: Duration,
) -> ProbeResult {
    let network_error = |error: String| ProbeResult {
        path: endpoint.path.clone(),
        method: endpoint.method,
        outcome: ProbeOutcome::NetworkError { error },
        latency_ms: 0,
    };

    let url = match reqwest::Url::parse(base_url).and_then(|base| base.join(&endpoint.path)) {
        Ok(url) => url,
        Err(e) => return network_error(e.to_string()),
    };

    let mut request = match endpoint.method {
        Method::Get => client.get(url),
        Method::Delete => client.delete(url),
        Method::Post => client.post(url).json(&serde_json::json!({})),
        Method::Put => client.put(url).json(&serde_json::json!({})),
        Method::Patch => client.patch(url).json(&serde_json::json!({})),
    }
    .timeout(timeout);
    if let Some(header) = super::cookie_header(cookies) {
        request = request.header(COOKIE, header);
    }

    let started = Instant::now();
    match request.send().await {
        Ok(response) => ProbeResult {
            path: endpoint.path.clone(),
            method: endpoint.method,
            outcome: ProbeOutcome::from_status(response.status().as_u16()),
            latency_ms: started.elapsed().as_millis() as u64,
        },
        Err(e) => network_error(e.to_string()),
    }
}
