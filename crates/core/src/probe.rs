use serde::Serialize;

use crate::openapi::Method;

/// Outcome of one live probe, classified from the response status or the
/// transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ProbeOutcome {
    Ok,
    AuthRequired,
    Forbidden,
    NotFound,
    HttpError { status: u16 },
    NetworkError { error: String },
}

impl ProbeOutcome {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> ProbeOutcome {
        match status {
            401 => ProbeOutcome::AuthRequired,
            403 => ProbeOutcome::Forbidden,
            404 => ProbeOutcome::NotFound,
            status if status < 400 => ProbeOutcome::Ok,
            status => ProbeOutcome::HttpError { status },
        }
    }

    pub fn label(&self) -> String {
        match self {
            ProbeOutcome::Ok => "ok".to_string(),
            ProbeOutcome::AuthRequired => "auth required".to_string(),
            ProbeOutcome::Forbidden => "forbidden".to_string(),
            ProbeOutcome::NotFound => "not found".to_string(),
            ProbeOutcome::HttpError { status } => format!("http {status}"),
            ProbeOutcome::NetworkError { .. } => "network error".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok)
    }
}

/// Result of probing a single endpoint. Latency is zero when the request
/// never produced a response.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub path: String,
    pub method: Method,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    pub latency_ms: u64,
}

/// Render the per-endpoint probe report. Result order is the order the
/// probes were issued in, which callers keep equal to extraction order.
pub fn format_health_report(title: &str, results: &[ProbeResult]) -> String {
    let mut out = format!(
        "# Health check: {} ({} endpoints probed)\n\n",
        title,
        results.len()
    );

    if results.is_empty() {
        out.push_str("No GET endpoints available to probe.\n");
        return out;
    }

    for result in results {
        match &result.outcome {
            ProbeOutcome::NetworkError { error } => {
                out.push_str(&format!(
                    "[{}] `{}` {} - {}\n",
                    result.outcome.label(),
                    result.method,
                    result.path,
                    error
                ));
            }
            outcome => {
                out.push_str(&format!(
                    "[{}] `{}` {} ({} ms)\n",
                    outcome.label(),
                    result.method,
                    result.path,
                    result.latency_ms
                ));
            }
        }
    }

    let healthy = results.iter().filter(|r| r.outcome.is_ok()).count();
    out.push_str(&format!(
        "\n{healthy} of {} endpoints responded without errors.\n",
        results.len()
    ));

    out
}
