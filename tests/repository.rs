#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use jira_reporter::api::jira::{JiraConfig, JiraIssue, SearchPage};
    use jira_reporter::libs::repository::{build_jql, extract_description, map_issues};
    use jira_reporter::libs::work_date::WorkDateResolver;
    use serde_json::{json, Value};

    fn config() -> JiraConfig {
        JiraConfig {
            api_url: "https://acme.atlassian.net/".to_string(),
            email: "dev@acme.com".to_string(),
            api_token: "secret-token".to_string(),
            in_progress_status: "In Progress".to_string(),
            qa_field: "QA[User Picker (single user)]".to_string(),
            timeout_secs: 30,
        }
    }

    fn window() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    fn raw_issue(key: &str, created: &str, description: Option<Value>) -> JiraIssue {
        serde_json::from_value(json!({
            "key": key,
            "fields": {
                "summary": format!("Summary {}", key),
                "description": description,
                "created": created
            }
        }))
        .unwrap()
    }

    fn paragraph(text: &str) -> Value {
        json!({
            "type": "doc",
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": text }] }]
        })
    }

    #[test]
    fn test_build_jql_for_assignee() {
        let (start, end) = window();
        assert_eq!(
            build_jql(start, end, false, &config()),
            "assignee = currentUser() AND (status changed to 'In Progress' during ('2025-01-01', '2025-01-31') \
             OR created >= '2025-01-01' AND created <= '2025-01-31')"
        );
    }

    #[test]
    fn test_build_jql_with_qa() {
        let (start, end) = window();
        let window = "(status changed to 'In Progress' during ('2025-01-01', '2025-01-31') \
                      OR created >= '2025-01-01' AND created <= '2025-01-31')";
        assert_eq!(
            build_jql(start, end, true, &config()),
            format!(
                "(assignee = currentUser() AND {w}) OR ('QA[User Picker (single user)]' = currentUser() AND {w})",
                w = window
            )
        );
    }

    #[test]
    fn test_build_jql_uses_configured_status() {
        let (start, end) = window();
        let mut config = config();
        config.in_progress_status = "Doing".to_string();
        assert!(build_jql(start, end, false, &config).contains("status changed to 'Doing'"));
    }

    #[test]
    fn test_extract_description() {
        assert_eq!(
            extract_description(&raw_issue("P-1", "", Some(paragraph("First line")))),
            "First line"
        );
        assert_eq!(extract_description(&raw_issue("P-2", "", None)), "");
        assert_eq!(
            extract_description(&raw_issue("P-3", "", Some(json!({ "type": "doc", "content": [] })))),
            ""
        );
    }

    #[test]
    fn test_map_issues_sorts_chronologically_with_undated_first() {
        let raw = vec![
            raw_issue("P-1", "2025-02-02T10:00:00.000-0300", None),
            raw_issue("P-2", "not a date", None),
            raw_issue("P-3", "2025-01-15T10:00:00.000-0300", None),
            raw_issue("P-4", "2025-01-15T10:00:00.000-0300", Some(paragraph("same day"))),
        ];
        let issues = map_issues(&raw, &config(), &WorkDateResolver::new("In Progress"));

        let keys: Vec<&str> = issues.iter().map(|issue| issue.key()).collect();
        assert_eq!(keys, vec!["P-2", "P-3", "P-4", "P-1"]);

        let dates: Vec<&str> = issues.iter().map(|issue| issue.date()).collect();
        assert_eq!(dates, vec!["", "15/01", "15/01", "02/02"]);
    }

    #[test]
    fn test_map_issues_builds_browse_urls() {
        let raw = vec![raw_issue("PROJ-42", "2025-01-15T10:00:00.000-0300", Some(paragraph("Fix login")))];
        let issues = map_issues(&raw, &config(), &WorkDateResolver::new("In Progress"));
        let issue = &issues.as_slice()[0];

        assert_eq!(issue.url(), "https://acme.atlassian.net/browse/PROJ-42");
        assert_eq!(issue.summary(), "Summary PROJ-42");
        assert_eq!(issue.description(), "Fix login");
    }

    #[test]
    fn test_null_summary_maps_to_empty() {
        let raw: JiraIssue = serde_json::from_value(json!({
            "key": "P-9",
            "fields": { "summary": null, "description": null, "created": "2025-01-15T10:00:00.000-0300" }
        }))
        .unwrap();
        let issues = map_issues(&[raw], &config(), &WorkDateResolver::new("In Progress"));

        assert_eq!(issues.as_slice()[0].summary(), "");
        assert_eq!(issues.as_slice()[0].date(), "15/01");
    }

    #[test]
    fn test_search_page_continuation() {
        let page: SearchPage = serde_json::from_value(json!({
            "issues": [{ "key": "P-1", "fields": { "summary": "One" } }],
            "nextPageToken": "abc"
        }))
        .unwrap();
        assert_eq!(page.issues.len(), 1);
        assert_eq!(page.next_token(), Some("abc"));

        let last: SearchPage = serde_json::from_value(json!({
            "issues": [],
            "nextPageToken": "abc",
            "isLast": true
        }))
        .unwrap();
        assert_eq!(last.next_token(), None);

        let no_token: SearchPage = serde_json::from_value(json!({ "issues": [] })).unwrap();
        assert_eq!(no_token.next_token(), None);
    }

    #[test]
    fn test_config_debug_hides_token() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("dev@acme.com"));
    }
}
