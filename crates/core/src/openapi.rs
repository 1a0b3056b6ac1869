use regex::Regex;
use scraper::{Html, Selector as CssSelector};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// HTTP methods recognized during endpoint extraction.
///
/// Any other verb appearing in a document (OPTIONS, HEAD, TRACE, ...) is
/// silently dropped by [`extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// Parse a method key from a document, case-insensitively.
    pub fn parse(verb: &str) -> Option<Method> {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// Methods that carry a request body in generated code samples and probes.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    /// All recognized methods, in display order.
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
    ];
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (path, method) operation extracted from an OpenAPI/Swagger document.
///
/// Records are immutable once extracted. Uniqueness is not enforced: if the
/// source document repeats a (path, method) pair, so does the extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub path: String,
    pub method: Method,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parameters: Vec<Value>,
    pub responses: Map<String, Value>,
}

/// A fetched and flattened API description.
#[derive(Debug, Clone, Serialize)]
pub struct ApiDescription {
    pub title: String,
    pub version: String,
    pub description: String,
    pub base_url: String,
    pub endpoints: Vec<EndpointRecord>,
}

fn str_field(operation: &Value, key: &str) -> String {
    operation
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Flatten a raw OpenAPI/Swagger document into a uniform endpoint list.
///
/// Walks `paths` in the document's own key order. Operations under
/// unrecognized verbs are dropped; non-object values (for example a
/// path-level `parameters` array) are skipped. Missing operation fields
/// default to empty.
pub fn extract(document: &Value) -> Vec<EndpointRecord> {
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut endpoints = Vec::new();
    for (path, methods) in paths {
        let Some(methods) = methods.as_object() else {
            continue;
        };
        for (verb, operation) in methods {
            let Some(method) = Method::parse(verb) else {
                continue;
            };
            if !operation.is_object() {
                continue;
            }
            let tags = operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let parameters = operation
                .get("parameters")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let responses = operation
                .get("responses")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();

            endpoints.push(EndpointRecord {
                path: path.clone(),
                method,
                summary: str_field(operation, "summary"),
                description: str_field(operation, "description"),
                tags,
                parameters,
                responses,
            });
        }
    }

    endpoints
}

/// Build a complete [`ApiDescription`] from a raw document and the URL it
/// was requested from.
pub fn analyze_document(document: &Value, base_url: &str) -> ApiDescription {
    let info = document.get("info");
    let info_field = |key: &str, default: &str| {
        info.and_then(|i| i.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    ApiDescription {
        title: info_field("title", "Unknown API"),
        version: info_field("version", "Unknown"),
        description: info_field("description", ""),
        base_url: base_url.to_string(),
        endpoints: extract(document),
    }
}

/// Case-insensitive substring search across path, summary, description, and
/// tags.
pub fn search_endpoints<'a>(
    endpoints: &'a [EndpointRecord],
    term: &str,
) -> Vec<&'a EndpointRecord> {
    let needle = term.to_lowercase();
    endpoints
        .iter()
        .filter(|endpoint| {
            endpoint.path.to_lowercase().contains(&needle)
                || endpoint.summary.to_lowercase().contains(&needle)
                || endpoint.description.to_lowercase().contains(&needle)
                || endpoint
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Find a Swagger/OpenAPI document reference embedded in an HTML page.
///
/// Swagger UI pages configure the renderer with `url: "<path>.json"` inside
/// an inline script. Scans `<script>` elements first, then the raw text as a
/// fallback for pages `scraper` cannot make sense of. Returns the first match
/// only; the result still has to be resolved against the page URL by the
/// caller.
pub fn discover_document_url(html: &str) -> Option<String> {
    let pattern = Regex::new(r#"url:\s*"([^"]+\.json)""#).ok()?;

    let document = Html::parse_document(html);
    if let Ok(selector) = CssSelector::parse("script") {
        for script in document.select(&selector) {
            let text: String = script.text().collect();
            if let Some(caps) = pattern.captures(&text) {
                return Some(caps[1].to_string());
            }
        }
    }

    pattern.captures(html).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn petstore_doc() -> Value {
        json!({
            "info": {
                "title": "Petstore",
                "version": "1.0.7",
                "description": "A sample pet store server."
            },
            "paths": {
                "/pet": {
                    "post": {
                        "summary": "Add a new pet",
                        "tags": ["pet"],
                        "responses": {"405": {"description": "Invalid input"}}
                    },
                    "put": {
                        "summary": "Update an existing pet",
                        "tags": ["pet"]
                    }
                },
                "/pet/{petId}": {
                    "get": {
                        "summary": "Find pet by ID",
                        "description": "Returns a single pet",
                        "tags": ["pet"],
                        "parameters": [{"name": "petId", "in": "path"}]
                    }
                },
                "/store/order": {
                    "post": {
                        "summary": "Place an order",
                        "tags": ["store"]
                    }
                }
            }
        })
    }

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("Patch"), Some(Method::Patch));
        assert_eq!(Method::parse("options"), None);
        assert_eq!(Method::parse("head"), None);
    }

    #[test]
    fn test_extract_counts_recognized_operations() {
        let endpoints = extract(&petstore_doc());
        assert_eq!(endpoints.len(), 4);
    }

    #[test]
    fn test_extract_drops_unrecognized_verbs() {
        let doc = json!({
            "paths": {
                "/pet": {
                    "get": {"summary": "List pets"},
                    "options": {"summary": "CORS preflight"}
                }
            }
        });

        let endpoints = extract(&doc);

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method, Method::Get);
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let doc: Value = serde_json::from_str(
            r#"{"paths": {"/zebra": {"get": {}}, "/apple": {"get": {}}, "/mango": {"get": {}}}}"#,
        )
        .unwrap();

        let endpoints = extract(&doc);
        let paths: Vec<&str> = endpoints.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(paths, vec!["/zebra", "/apple", "/mango"]);
    }

    #[test]
    fn test_extract_defaults_missing_fields() {
        let doc = json!({"paths": {"/bare": {"get": {}}}});

        let endpoints = extract(&doc);

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].summary, "");
        assert_eq!(endpoints[0].description, "");
        assert!(endpoints[0].tags.is_empty());
        assert!(endpoints[0].parameters.is_empty());
        assert!(endpoints[0].responses.is_empty());
    }

    #[test]
    fn test_extract_skips_path_level_parameters() {
        let doc = json!({
            "paths": {
                "/pet/{petId}": {
                    "parameters": [{"name": "petId", "in": "path"}],
                    "get": {"summary": "Find pet by ID"}
                }
            }
        });

        let endpoints = extract(&doc);

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method, Method::Get);
    }

    #[test]
    fn test_extract_without_paths() {
        assert!(extract(&json!({})).is_empty());
        assert!(extract(&json!({"paths": 42})).is_empty());
    }

    #[test]
    fn test_analyze_document_info_block() {
        let description = analyze_document(&petstore_doc(), "https://petstore.swagger.io/v2");

        assert_eq!(description.title, "Petstore");
        assert_eq!(description.version, "1.0.7");
        assert_eq!(description.description, "A sample pet store server.");
        assert_eq!(description.base_url, "https://petstore.swagger.io/v2");
        assert_eq!(description.endpoints.len(), 4);
    }

    #[test]
    fn test_analyze_document_defaults() {
        let description = analyze_document(&json!({"paths": {}}), "https://example.com");

        assert_eq!(description.title, "Unknown API");
        assert_eq!(description.version, "Unknown");
        assert_eq!(description.description, "");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let endpoints = extract(&petstore_doc());

        let matches = search_endpoints(&endpoints, "PET");

        assert!(matches.iter().any(|e| e.path == "/pet/{petId}"));
    }

    #[test]
    fn test_search_matches_all_text_fields() {
        let endpoints = extract(&petstore_doc());

        assert_eq!(search_endpoints(&endpoints, "order").len(), 1);
        assert_eq!(search_endpoints(&endpoints, "single pet").len(), 1);
        assert_eq!(search_endpoints(&endpoints, "store").len(), 1);
        assert!(search_endpoints(&endpoints, "nothing-here").is_empty());
    }

    #[test]
    fn test_discover_document_url_in_script() {
        let html = r##"
            <html><body>
            <div id="swagger-ui"></div>
            <script>
              window.ui = SwaggerUIBundle({
                url: "/v2/swagger.json",
                dom_id: "#swagger-ui",
              });
            </script>
            </body></html>
        "##;

        assert_eq!(
            discover_document_url(html),
            Some("/v2/swagger.json".to_string())
        );
    }

    #[test]
    fn test_discover_document_url_first_match_wins() {
        let html = r#"
            <script>url: "/first.json"</script>
            <script>url: "/second.json"</script>
        "#;

        assert_eq!(discover_document_url(html), Some("/first.json".to_string()));
    }

    #[test]
    fn test_discover_document_url_absent() {
        assert_eq!(discover_document_url("<html><body>docs</body></html>"), None);
    }
}
