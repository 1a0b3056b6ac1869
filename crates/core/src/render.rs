use chrono::{DateTime, Utc};

use crate::classify::FunctionalGroup;
use crate::openapi::{ApiDescription, EndpointRecord, Method};

/// Endpoints shown inline per group in the summary report; the rest collapse
/// into a `+N more` suffix.
pub const GROUP_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}. Supported formats: json, markdown")]
    UnsupportedFormat(String),

    #[error("Failed to serialize export document: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn endpoint_line(endpoint: &EndpointRecord) -> String {
    if endpoint.summary.is_empty() {
        format!("- `{}` {}", endpoint.method, endpoint.path)
    } else {
        format!("- `{}` {} ({})", endpoint.method, endpoint.path, endpoint.summary)
    }
}

/// Render the analysis summary: title, version, endpoint count, and the
/// recommended page groups with a truncated endpoint preview.
pub fn format_summary(description: &ApiDescription, groups: &[FunctionalGroup]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "API documentation analysis complete: {} ({})\n\n",
        description.title, description.version
    ));
    out.push_str(&format!(
        "Found {} API endpoints in total.\n\n",
        description.endpoints.len()
    ));
    out.push_str("--- Recommended frontend pages ---\n\n");

    if groups.is_empty() {
        out.push_str("No page groups could be recommended.\n");
        return out;
    }

    for group in groups {
        out.push_str(&format!("### {} page\n", group.page));
        out.push_str(&format!("_{}_\n", group.description));
        for endpoint in group.endpoints.iter().take(GROUP_PREVIEW_LIMIT) {
            out.push_str(&endpoint_line(endpoint));
            out.push('\n');
        }
        if group.endpoints.len() > GROUP_PREVIEW_LIMIT {
            out.push_str(&format!(
                "- ... +{} more\n",
                group.endpoints.len() - GROUP_PREVIEW_LIMIT
            ));
        }
        out.push('\n');
    }

    out
}

/// Render the endpoint listing grouped by tag.
///
/// An endpoint appears once under every tag it carries; untagged endpoints do
/// not appear at all. Tags are ordered by first appearance.
pub fn format_endpoints_by_tag(description: &ApiDescription) -> String {
    let mut sections: Vec<(String, Vec<&EndpointRecord>)> = Vec::new();

    for endpoint in &description.endpoints {
        for tag in &endpoint.tags {
            match sections.iter_mut().find(|(name, _)| name == tag) {
                Some((_, endpoints)) => endpoints.push(endpoint),
                None => sections.push((tag.clone(), vec![endpoint])),
            }
        }
    }

    let mut out = format!("# API endpoints by tag: {}\n\n", description.title);

    if sections.is_empty() {
        out.push_str("No tagged endpoints found.\n");
        return out;
    }

    for (tag, endpoints) in sections {
        out.push_str(&format!("## {} ({} endpoints)\n", tag, endpoints.len()));
        for endpoint in endpoints {
            out.push_str(&endpoint_line(endpoint));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Render search results with a match count, or an explicit empty-result
/// message.
pub fn format_search_results(term: &str, matches: &[&EndpointRecord]) -> String {
    if matches.is_empty() {
        return format!("No endpoints matched \"{term}\".\n");
    }

    let mut out = format!("Found {} endpoints matching \"{}\":\n\n", matches.len(), term);
    for endpoint in matches {
        out.push_str(&endpoint_line(endpoint));
        if !endpoint.tags.is_empty() {
            out.push_str(&format!(" [{}]", endpoint.tags.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Endpoint count per method, in fixed verb order, zero counts skipped.
pub fn method_counts(endpoints: &[EndpointRecord]) -> Vec<(Method, usize)> {
    Method::ALL
        .iter()
        .map(|method| {
            (
                *method,
                endpoints.iter().filter(|e| e.method == *method).count(),
            )
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Endpoint count per tag, sorted descending by count. Ties keep
/// first-appearance order.
pub fn tag_counts(endpoints: &[EndpointRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for endpoint in endpoints {
        for tag in &endpoint.tags {
            match counts.iter_mut().find(|(name, _)| name == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
}

/// Render title, version, base URL, description, and method/tag statistics.
pub fn format_api_info(description: &ApiDescription) -> String {
    let mut out = format!("# {}\n\n", description.title);
    out.push_str(&format!("Version: {}\n", description.version));
    out.push_str(&format!("Base URL: {}\n", description.base_url));
    if !description.description.is_empty() {
        out.push_str(&format!("\n{}\n", description.description));
    }
    out.push_str(&format!("\nEndpoints: {}\n", description.endpoints.len()));

    let methods = method_counts(&description.endpoints);
    if !methods.is_empty() {
        out.push_str("\nMethods:\n");
        for (method, count) in methods {
            out.push_str(&format!("  {method}: {count}\n"));
        }
    }

    let tags = tag_counts(&description.endpoints);
    if !tags.is_empty() {
        out.push_str("\nTags (by endpoint count):\n");
        for (tag, count) in tags {
            out.push_str(&format!("  {tag}: {count}\n"));
        }
    }

    out
}

/// Serialize the full document in the requested format.
///
/// JSON exports carry the info block, the flattened endpoint list, the page
/// recommendations (endpoints reduced to path/method/summary), and an
/// `exported_at` stamp. Markdown exports emit one heading block per endpoint
/// with no truncation.
pub fn export_docs(
    description: &ApiDescription,
    groups: &[FunctionalGroup],
    format: &str,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    match format {
        "json" => export_json(description, groups, exported_at),
        "markdown" => Ok(export_markdown(description)),
        other => Err(ExportError::UnsupportedFormat(other.to_string())),
    }
}

fn export_json(
    description: &ApiDescription,
    groups: &[FunctionalGroup],
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let recommendations: Vec<serde_json::Value> = groups
        .iter()
        .map(|group| {
            serde_json::json!({
                "page": group.page,
                "description": group.description,
                "endpoints": group
                    .endpoints
                    .iter()
                    .map(|endpoint| {
                        serde_json::json!({
                            "path": endpoint.path,
                            "method": endpoint.method,
                            "summary": endpoint.summary,
                        })
                    })
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let document = serde_json::json!({
        "info": {
            "title": description.title,
            "version": description.version,
            "description": description.description,
            "base_url": description.base_url,
        },
        "endpoints": description.endpoints,
        "recommendations": recommendations,
        "exported_at": exported_at.to_rfc3339(),
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

fn export_markdown(description: &ApiDescription) -> String {
    let mut out = format!("# {}\n\n", description.title);
    out.push_str(&format!("Version: {}\n", description.version));
    if !description.description.is_empty() {
        out.push_str(&format!("\n{}\n", description.description));
    }
    out.push('\n');

    for endpoint in &description.endpoints {
        out.push_str(&format!("### {} {}\n\n", endpoint.method, endpoint.path));
        if !endpoint.summary.is_empty() {
            out.push_str(&format!("{}\n\n", endpoint.summary));
        }
        if !endpoint.tags.is_empty() {
            out.push_str(&format!("Tags: {}\n\n", endpoint.tags.join(", ")));
        }
        out.push_str("---\n\n");
    }

    out
}

/// Render both code samples for a single endpoint.
pub fn format_code_examples(base_url: &str, endpoint: &EndpointRecord) -> String {
    let mut out = format!(
        "# Code examples for `{} {}`\n\n",
        endpoint.method, endpoint.path
    );
    out.push_str("## JavaScript (fetch)\n\n```javascript\n");
    out.push_str(&fetch_example(base_url, endpoint));
    out.push_str("```\n\n## Python (requests)\n\n```python\n");
    out.push_str(&python_example(base_url, endpoint));
    out.push_str("```\n");
    out
}

fn request_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// JavaScript `fetch` snippet. Write-style methods carry a request-body
/// placeholder; GET and DELETE omit it.
pub fn fetch_example(base_url: &str, endpoint: &EndpointRecord) -> String {
    let url = request_url(base_url, &endpoint.path);
    let mut out = format!("const response = await fetch(\"{url}\", {{\n");
    out.push_str(&format!("  method: \"{}\",\n", endpoint.method));
    out.push_str("  headers: { \"Content-Type\": \"application/json\" },\n");
    if endpoint.method.has_body() {
        out.push_str("  body: JSON.stringify({}), // request body\n");
    }
    out.push_str("});\nconst data = await response.json();\n");
    out
}

/// Python `requests` snippet, same body rule as [`fetch_example`].
pub fn python_example(base_url: &str, endpoint: &EndpointRecord) -> String {
    let url = request_url(base_url, &endpoint.path);
    let verb = endpoint.method.as_str().to_lowercase();
    let mut out = String::from("import requests\n\n");
    out.push_str(&format!("response = requests.{verb}(\n"));
    out.push_str(&format!("    \"{url}\",\n"));
    if endpoint.method.has_body() {
        out.push_str("    json={},  # request body\n");
    }
    out.push_str(")\nresponse.raise_for_status()\ndata = response.json()\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use chrono::TimeZone;

    fn endpoint(path: &str, method: Method, summary: &str, tags: &[&str]) -> EndpointRecord {
        EndpointRecord {
            path: path.to_string(),
            method,
            summary: summary.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            parameters: Vec::new(),
            responses: serde_json::Map::new(),
        }
    }

    fn description(endpoints: Vec<EndpointRecord>) -> ApiDescription {
        ApiDescription {
            title: "Petstore".to_string(),
            version: "1.0.7".to_string(),
            description: "A sample pet store server.".to_string(),
            base_url: "https://petstore.swagger.io/v2".to_string(),
            endpoints,
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_summary_header_and_count() {
        let desc = description(vec![endpoint("/users", Method::Get, "List users", &[])]);
        let groups = classify(&desc.endpoints);

        let text = format_summary(&desc, &groups);

        assert!(text.contains("API documentation analysis complete: Petstore (1.0.7)"));
        assert!(text.contains("Found 1 API endpoints in total."));
        assert!(text.contains("### user-management page"));
        assert!(text.contains("- `GET` /users (List users)"));
    }

    #[test]
    fn test_summary_truncates_groups_to_five() {
        let endpoints: Vec<EndpointRecord> = (0..7)
            .map(|i| endpoint(&format!("/users/{i}"), Method::Get, "", &[]))
            .collect();
        let desc = description(endpoints);
        let groups = classify(&desc.endpoints);

        let text = format_summary(&desc, &groups);

        assert_eq!(text.matches("- `GET` /users/").count(), 5);
        assert!(text.contains("+2 more"));
    }

    #[test]
    fn test_summary_without_truncation_has_no_more_suffix() {
        let desc = description(vec![endpoint("/users", Method::Get, "", &[])]);
        let groups = classify(&desc.endpoints);

        let text = format_summary(&desc, &groups);

        assert!(!text.contains("more"));
    }

    #[test]
    fn test_summary_with_no_groups() {
        let desc = description(vec![endpoint("/things/{id}", Method::Delete, "", &[])]);
        let groups = classify(&desc.endpoints);

        let text = format_summary(&desc, &groups);

        assert!(text.contains("No page groups could be recommended."));
        assert!(!text.contains("/things/{id}"));
    }

    #[test]
    fn test_tag_listing_lists_endpoint_once_per_tag() {
        let desc = description(vec![
            endpoint("/pet", Method::Get, "", &["pet", "list", "public"]),
            endpoint("/store", Method::Get, "", &["store"]),
        ]);

        let text = format_endpoints_by_tag(&desc);

        assert!(text.contains("## pet (1 endpoints)"));
        assert!(text.contains("## list (1 endpoints)"));
        assert!(text.contains("## public (1 endpoints)"));
        assert!(text.contains("## store (1 endpoints)"));
        assert_eq!(text.matches("- `GET` /pet").count(), 3);
    }

    #[test]
    fn test_tag_listing_omits_untagged_endpoints() {
        let desc = description(vec![
            endpoint("/pet", Method::Get, "", &["pet"]),
            endpoint("/untagged", Method::Get, "", &[]),
        ]);

        let text = format_endpoints_by_tag(&desc);

        assert!(!text.contains("/untagged"));
    }

    #[test]
    fn test_tag_listing_with_no_tags_at_all() {
        let desc = description(vec![endpoint("/a", Method::Get, "", &[])]);

        let text = format_endpoints_by_tag(&desc);

        assert!(text.contains("No tagged endpoints found."));
    }

    #[test]
    fn test_search_results_with_matches() {
        let ep = endpoint("/pet/{petId}", Method::Get, "Find pet by ID", &["pet"]);
        let matches = vec![&ep];

        let text = format_search_results("pet", &matches);

        assert!(text.contains("Found 1 endpoints matching \"pet\":"));
        assert!(text.contains("- `GET` /pet/{petId} (Find pet by ID) [pet]"));
    }

    #[test]
    fn test_search_results_empty() {
        let text = format_search_results("nothing", &[]);

        assert_eq!(text, "No endpoints matched \"nothing\".\n");
    }

    #[test]
    fn test_method_counts_fixed_order_and_skips_zero() {
        let endpoints = vec![
            endpoint("/a", Method::Post, "", &[]),
            endpoint("/b", Method::Get, "", &[]),
            endpoint("/c", Method::Get, "", &[]),
        ];

        let counts = method_counts(&endpoints);

        assert_eq!(counts, vec![(Method::Get, 2), (Method::Post, 1)]);
    }

    #[test]
    fn test_tag_counts_sorted_descending() {
        let endpoints = vec![
            endpoint("/a", Method::Get, "", &["store"]),
            endpoint("/b", Method::Get, "", &["pet"]),
            endpoint("/c", Method::Get, "", &["pet"]),
        ];

        let counts = tag_counts(&endpoints);

        assert_eq!(
            counts,
            vec![("pet".to_string(), 2), ("store".to_string(), 1)]
        );
    }

    #[test]
    fn test_tag_counts_ties_keep_first_appearance_order() {
        let endpoints = vec![
            endpoint("/a", Method::Get, "", &["zebra"]),
            endpoint("/b", Method::Get, "", &["apple"]),
        ];

        let counts = tag_counts(&endpoints);

        assert_eq!(counts[0].0, "zebra");
        assert_eq!(counts[1].0, "apple");
    }

    #[test]
    fn test_api_info_contains_statistics() {
        let desc = description(vec![
            endpoint("/pet", Method::Get, "", &["pet"]),
            endpoint("/pet", Method::Post, "", &["pet"]),
        ]);

        let text = format_api_info(&desc);

        assert!(text.contains("# Petstore"));
        assert!(text.contains("Version: 1.0.7"));
        assert!(text.contains("Base URL: https://petstore.swagger.io/v2"));
        assert!(text.contains("Endpoints: 2"));
        assert!(text.contains("  GET: 1"));
        assert!(text.contains("  POST: 1"));
        assert!(text.contains("  pet: 2"));
    }

    #[test]
    fn test_export_json_endpoint_array_length() {
        let desc = description(vec![
            endpoint("/users", Method::Get, "List users", &["user"]),
            endpoint("/users", Method::Post, "Create user", &["user"]),
            endpoint("/items", Method::Get, "", &[]),
        ]);
        let groups = classify(&desc.endpoints);

        let text = export_docs(&desc, &groups, "json", stamp()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["endpoints"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["info"]["title"], "Petstore");
        assert_eq!(parsed["exported_at"], "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_export_json_recommendation_endpoints_are_reduced() {
        let desc = description(vec![endpoint("/users", Method::Get, "List users", &["user"])]);
        let groups = classify(&desc.endpoints);

        let text = export_docs(&desc, &groups, "json", stamp()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        let rec = &parsed["recommendations"][0];
        assert_eq!(rec["page"], "user-management");
        let ep = &rec["endpoints"][0];
        assert_eq!(ep["path"], "/users");
        assert_eq!(ep["method"], "GET");
        assert_eq!(ep["summary"], "List users");
        assert!(ep.get("tags").is_none());
        assert!(ep.get("responses").is_none());
    }

    #[test]
    fn test_export_markdown_one_heading_block_per_endpoint() {
        let desc = description(vec![
            endpoint("/a", Method::Get, "First", &["t"]),
            endpoint("/b", Method::Post, "", &[]),
            endpoint("/c", Method::Delete, "Third", &[]),
        ]);

        let text = export_docs(&desc, &[], "markdown", stamp()).unwrap();

        assert_eq!(text.matches("### ").count(), 3);
        assert_eq!(text.matches("---").count(), 3);
        assert!(text.contains("### GET /a"));
        assert!(text.contains("Tags: t"));
    }

    #[test]
    fn test_export_rejects_unsupported_format() {
        let desc = description(vec![]);

        let err = export_docs(&desc, &[], "yaml", stamp()).unwrap_err();

        assert!(matches!(err, ExportError::UnsupportedFormat(_)));
        assert_eq!(
            err.to_string(),
            "Unsupported export format: yaml. Supported formats: json, markdown"
        );
    }

    #[test]
    fn test_fetch_example_with_body() {
        let ep = endpoint("/pet", Method::Post, "", &[]);

        let snippet = fetch_example("https://petstore.swagger.io/v2", &ep);

        assert!(snippet.contains("fetch(\"https://petstore.swagger.io/v2/pet\""));
        assert!(snippet.contains("method: \"POST\""));
        assert!(snippet.contains("body: JSON.stringify({})"));
    }

    #[test]
    fn test_fetch_example_without_body() {
        let ep = endpoint("/pet/{petId}", Method::Get, "", &[]);

        let snippet = fetch_example("https://petstore.swagger.io/v2", &ep);

        assert!(snippet.contains("method: \"GET\""));
        assert!(!snippet.contains("body:"));
    }

    #[test]
    fn test_python_example_uses_lowercase_verb() {
        let ep = endpoint("/pet", Method::Patch, "", &[]);

        let snippet = python_example("https://api.example.com/", &ep);

        assert!(snippet.contains("requests.patch("));
        assert!(snippet.contains("\"https://api.example.com/pet\""));
        assert!(snippet.contains("json={}"));
    }

    #[test]
    fn test_python_example_get_has_no_body() {
        let ep = endpoint("/pet", Method::Get, "", &[]);

        let snippet = python_example("https://api.example.com", &ep);

        assert!(snippet.contains("requests.get("));
        assert!(!snippet.contains("json={}"));
    }

    #[test]
    fn test_code_examples_contain_both_snippets() {
        let ep = endpoint("/pet", Method::Delete, "", &[]);

        let text = format_code_examples("https://api.example.com", &ep);

        assert!(text.contains("# Code examples for `DELETE /pet`"));
        assert!(text.contains("## JavaScript (fetch)"));
        assert!(text.contains("## Python (requests)"));
        assert!(text.contains("```javascript"));
        assert!(text.contains("```python"));
    }
}
