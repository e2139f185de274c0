#[cfg(test)]
mod tests {
    use jira_reporter::api::jira::JiraIssue;
    use jira_reporter::libs::work_date::{parse_jira_time, WorkDateResolver};
    use serde_json::{json, Value};

    fn issue(fields: Value, histories: Value) -> JiraIssue {
        serde_json::from_value(json!({
            "key": "PROJ-1",
            "fields": fields,
            "changelog": { "histories": histories }
        }))
        .unwrap()
    }

    fn status_change(created: &str, to: &str) -> Value {
        json!({ "created": created, "items": [{ "field": "status", "toString": to }] })
    }

    fn assignee_change(created: &str, account_id: &str) -> Value {
        json!({ "created": created, "items": [{ "field": "assignee", "to": account_id }] })
    }

    fn resolver() -> WorkDateResolver {
        WorkDateResolver::new("In Progress")
    }

    #[test]
    fn test_parse_jira_time() {
        let ts = parse_jira_time("2025-01-15T10:30:00.000-0300").unwrap();
        assert_eq!(ts.format("%d/%m %H:%M").to_string(), "15/01 10:30");
        assert!(parse_jira_time("15/01/2025").is_none());
    }

    #[test]
    fn test_earliest_in_progress_transition_wins() {
        let raw = issue(
            json!({
                "summary": "Task",
                "created": "2024-12-20T08:00:00.000-0300",
                "assignee": { "accountId": "abc" }
            }),
            json!([
                status_change("2025-01-10T09:00:00.000-0300", "In Progress"),
                assignee_change("2025-01-02T09:00:00.000-0300", "abc"),
                status_change("2025-01-05T09:00:00.000-0300", "In Progress"),
                status_change("2025-01-03T09:00:00.000-0300", "Done"),
            ]),
        );
        assert_eq!(resolver().display_date(&raw), "05/01");
    }

    #[test]
    fn test_assignment_to_current_assignee_is_second_choice() {
        let raw = issue(
            json!({
                "summary": "Task",
                "created": "2024-12-20T08:00:00.000-0300",
                "assignee": { "accountId": "abc" }
            }),
            json!([
                assignee_change("2025-01-03T09:00:00.000-0300", "someone-else"),
                assignee_change("2025-01-12T09:00:00.000-0300", "abc"),
                assignee_change("2025-01-08T09:00:00.000-0300", "abc"),
            ]),
        );
        assert_eq!(resolver().display_date(&raw), "08/01");
    }

    #[test]
    fn test_assignment_ignored_without_current_assignee() {
        let raw = issue(
            json!({ "summary": "Task", "created": "2024-12-20T08:00:00.000-0300" }),
            json!([assignee_change("2025-01-08T09:00:00.000-0300", "abc")]),
        );
        assert_eq!(resolver().display_date(&raw), "20/12");
    }

    #[test]
    fn test_created_is_last_resort() {
        let raw = issue(
            json!({ "summary": "Task", "created": "2025-01-21T14:00:00.000+0000" }),
            json!([]),
        );
        assert_eq!(resolver().display_date(&raw), "21/01");
    }

    #[test]
    fn test_unparseable_entries_are_skipped() {
        let raw = issue(
            json!({ "summary": "Task", "created": "2024-12-20T08:00:00.000-0300" }),
            json!([
                status_change("not a date", "In Progress"),
                status_change("2025-01-17T09:00:00.000-0300", "In Progress"),
            ]),
        );
        assert_eq!(resolver().display_date(&raw), "17/01");
    }

    #[test]
    fn test_no_rule_applies() {
        let raw = issue(json!({ "summary": "Task", "created": "garbage" }), json!([]));
        assert!(resolver().resolve(&raw).is_none());
        assert_eq!(resolver().display_date(&raw), "");
    }

    #[test]
    fn test_missing_changelog_falls_back_to_created() {
        let raw: JiraIssue = serde_json::from_value(json!({
            "key": "PROJ-2",
            "fields": { "summary": "Task", "created": "2025-01-09T10:00:00.000-0300" }
        }))
        .unwrap();
        assert_eq!(resolver().display_date(&raw), "09/01");
    }

    #[test]
    fn test_custom_in_progress_status() {
        let raw = issue(
            json!({ "summary": "Task", "created": "2024-12-20T08:00:00.000-0300" }),
            json!([
                status_change("2025-01-04T09:00:00.000-0300", "In Progress"),
                status_change("2025-01-06T09:00:00.000-0300", "Doing"),
            ]),
        );
        assert_eq!(WorkDateResolver::new("Doing").display_date(&raw), "06/01");
    }
}
