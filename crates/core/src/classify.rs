use serde::Serialize;

use crate::openapi::{EndpointRecord, Method};

/// Frontend page groups, in rule-evaluation order.
///
/// The order of this enumeration is significant: an endpoint is tested
/// against the keyword rules in this exact sequence and lands in the first
/// group that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageGroup {
    UserManagement,
    Auth,
    Payments,
    FileUpload,
    Search,
    Analytics,
    Notifications,
    AdminSettings,
    DataRead,
    DataWrite,
}

impl PageGroup {
    pub fn name(&self) -> &'static str {
        match self {
            PageGroup::UserManagement => "user-management",
            PageGroup::Auth => "auth",
            PageGroup::Payments => "payments",
            PageGroup::FileUpload => "file-upload",
            PageGroup::Search => "search",
            PageGroup::Analytics => "analytics",
            PageGroup::Notifications => "notifications",
            PageGroup::AdminSettings => "admin-settings",
            PageGroup::DataRead => "data-read",
            PageGroup::DataWrite => "data-write",
        }
    }

    pub fn description(&self) -> String {
        format!("APIs for implementing the {} page", self.name())
    }

    /// Groups in rule order. Rendering order follows this sequence.
    pub const ALL: [PageGroup; 10] = [
        PageGroup::UserManagement,
        PageGroup::Auth,
        PageGroup::Payments,
        PageGroup::FileUpload,
        PageGroup::Search,
        PageGroup::Analytics,
        PageGroup::Notifications,
        PageGroup::AdminSettings,
        PageGroup::DataRead,
        PageGroup::DataWrite,
    ];
}

/// Keyword rules, evaluated in order. First match wins.
const KEYWORD_RULES: [(PageGroup, &[&str]); 8] = [
    (PageGroup::UserManagement, &["user", "member", "customer"]),
    (PageGroup::Auth, &["auth", "login", "token", "oauth"]),
    (PageGroup::Payments, &["payment", "pay", "billing", "charge"]),
    (PageGroup::FileUpload, &["upload", "file", "image", "media"]),
    (PageGroup::Search, &["search", "find", "query"]),
    (PageGroup::Analytics, &["stats", "analytics", "report", "metric"]),
    (
        PageGroup::Notifications,
        &["notification", "message", "alert", "push"],
    ),
    (
        PageGroup::AdminSettings,
        &["config", "setting", "admin", "management"],
    ),
];

/// A named bucket of endpoints recommended for one frontend page.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionalGroup {
    pub page: String,
    pub description: String,
    pub endpoints: Vec<EndpointRecord>,
}

/// Assign a single endpoint to a page group.
///
/// Keywords are matched as lowercase substrings of the path, the summary, or
/// any tag. Endpoints matching no keyword rule fall back to data-read (GET)
/// or data-write (POST/PUT/PATCH); an unmatched DELETE belongs to no group.
pub fn classify_endpoint(endpoint: &EndpointRecord) -> Option<PageGroup> {
    let path = endpoint.path.to_lowercase();
    let summary = endpoint.summary.to_lowercase();
    let tags: Vec<String> = endpoint.tags.iter().map(|t| t.to_lowercase()).collect();

    for (group, keywords) in KEYWORD_RULES {
        let hit = keywords.iter().any(|keyword| {
            path.contains(keyword)
                || summary.contains(keyword)
                || tags.iter().any(|tag| tag.contains(keyword))
        });
        if hit {
            return Some(group);
        }
    }

    match endpoint.method {
        Method::Get => Some(PageGroup::DataRead),
        Method::Post | Method::Put | Method::Patch => Some(PageGroup::DataWrite),
        Method::Delete => None,
    }
}

/// Classify endpoints into functional groups.
///
/// Groups come back in rule order, empty groups omitted. Within a group,
/// endpoints keep the order they were extracted in.
pub fn classify(endpoints: &[EndpointRecord]) -> Vec<FunctionalGroup> {
    let mut buckets: Vec<Vec<EndpointRecord>> = vec![Vec::new(); PageGroup::ALL.len()];

    for endpoint in endpoints {
        if let Some(group) = classify_endpoint(endpoint) {
            let slot = PageGroup::ALL.iter().position(|g| *g == group);
            if let Some(slot) = slot {
                buckets[slot].push(endpoint.clone());
            }
        }
    }

    PageGroup::ALL
        .iter()
        .zip(buckets)
        .filter(|(_, endpoints)| !endpoints.is_empty())
        .map(|(group, endpoints)| FunctionalGroup {
            page: group.name().to_string(),
            description: group.description(),
            endpoints,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_first_matching_rule_wins() {
        // "/users/login" contains both "user" (rule 1) and "login" (rule 2);
        // rule order places it under user-management.
        let ep = endpoint("/users/login", Method::Post, "", &[]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::UserManagement));
    }

    #[test]
    fn test_keyword_matches_in_summary() {
        let ep = endpoint("/session", Method::Post, "Issue an OAuth token", &[]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::Auth));
    }

    #[test]
    fn test_keyword_matches_in_tags() {
        let ep = endpoint("/v1/items", Method::Get, "", &["billing"]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::Payments));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let ep = endpoint("/Upload/Avatar", Method::Post, "", &[]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::FileUpload));
    }

    #[test]
    fn test_unmatched_get_falls_back_to_data_read() {
        let ep = endpoint("/things", Method::Get, "", &[]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::DataRead));
    }

    #[test]
    fn test_unmatched_write_methods_fall_back_to_data_write() {
        for method in [Method::Post, Method::Put, Method::Patch] {
            let ep = endpoint("/things", method, "", &[]);
            assert_eq!(classify_endpoint(&ep), Some(PageGroup::DataWrite));
        }
    }

    #[test]
    fn test_unmatched_delete_belongs_to_no_group() {
        let ep = endpoint("/things/{id}", Method::Delete, "", &[]);

        assert_eq!(classify_endpoint(&ep), None);

        let groups = classify(&[ep]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_keyword_rule_still_catches_delete() {
        let ep = endpoint("/users/{id}", Method::Delete, "", &[]);

        assert_eq!(classify_endpoint(&ep), Some(PageGroup::UserManagement));
    }

    #[test]
    fn test_classify_omits_empty_groups() {
        let endpoints = vec![
            endpoint("/users", Method::Get, "", &[]),
            endpoint("/things", Method::Get, "", &[]),
        ];

        let groups = classify(&endpoints);

        let names: Vec<&str> = groups.iter().map(|g| g.page.as_str()).collect();
        assert_eq!(names, vec!["user-management", "data-read"]);
    }

    #[test]
    fn test_classify_preserves_extraction_order_within_group() {
        let endpoints = vec![
            endpoint("/users/b", Method::Get, "", &[]),
            endpoint("/items", Method::Get, "", &[]),
            endpoint("/users/a", Method::Get, "", &[]),
        ];

        let groups = classify(&endpoints);

        let users: Vec<&str> = groups[0].endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(users, vec!["/users/b", "/users/a"]);
    }

    #[test]
    fn test_group_metadata() {
        let groups = classify(&[endpoint("/users", Method::Get, "", &[])]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].page, "user-management");
        assert_eq!(
            groups[0].description,
            "APIs for implementing the user-management page"
        );
    }
}
