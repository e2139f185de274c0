#[cfg(test)]
mod tests {
    use jira_reporter::libs::config::{Config, DEFAULT_CONVERSION_TIMEOUT_SECS, DEFAULT_TEMPLATE_PATH};
    use jira_reporter::libs::error::ReportError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use test_context::{test_context, TestContext};

    /// Holds a complete set of variables; tests remove or override entries.
    struct ConfigTestContext {
        vars: HashMap<&'static str, String>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let vars = [
                ("URL", "https://acme.atlassian.net"),
                ("EMAIL", "dev@acme.com"),
                ("API_KEY", "token123"),
                ("COMPANY_NAME", "Acme Ltda"),
                ("CNPJ", "12.345.678/0001-90"),
                ("USER_NAME", "Jane Doe"),
            ]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
            ConfigTestContext { vars }
        }
    }

    impl ConfigTestContext {
        fn load(&self) -> Result<Config, ReportError> {
            Config::from_lookup(|key| self.vars.get(key).cloned())
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_complete_config_with_defaults(ctx: &mut ConfigTestContext) {
        let config = ctx.load().unwrap();

        assert_eq!(config.jira.api_url, "https://acme.atlassian.net");
        assert_eq!(config.jira.email, "dev@acme.com");
        assert_eq!(config.jira.in_progress_status, "In Progress");
        assert_eq!(config.jira.qa_field, "QA[User Picker (single user)]");
        assert_eq!(config.jira.timeout_secs, 30);
        assert_eq!(config.user.company_name, "Acme Ltda");
        assert_eq!(config.render.template_path, PathBuf::from(DEFAULT_TEMPLATE_PATH));
        assert_eq!(config.render.conversion_timeout_secs, DEFAULT_CONVERSION_TIMEOUT_SECS);

        let user = config.report_user();
        assert_eq!(user.cnpj, "12.345.678/0001-90");
        assert_eq!(user.user_name, "Jane Doe");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_required_variable(ctx: &mut ConfigTestContext) {
        ctx.vars.remove("API_KEY");
        assert!(matches!(ctx.load(), Err(ReportError::MissingConfig("API_KEY"))));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_blank_value_counts_as_missing(ctx: &mut ConfigTestContext) {
        ctx.vars.insert("USER_NAME", "   ".to_string());
        assert!(matches!(ctx.load(), Err(ReportError::MissingConfig("USER_NAME"))));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_optional_overrides(ctx: &mut ConfigTestContext) {
        ctx.vars.insert("JIRA_IN_PROGRESS_STATUS", "Em andamento".to_string());
        ctx.vars.insert("JIRA_QA_FIELD", "Tester".to_string());
        ctx.vars.insert("REPORT_TEMPLATE", "templates/monthly.html".to_string());
        ctx.vars.insert("HTTP_TIMEOUT_SECS", "10".to_string());
        ctx.vars.insert("CONVERSION_TIMEOUT_SECS", " 45 ".to_string());

        let config = ctx.load().unwrap();
        assert_eq!(config.jira.in_progress_status, "Em andamento");
        assert_eq!(config.jira.qa_field, "Tester");
        assert_eq!(config.jira.timeout_secs, 10);
        assert_eq!(config.render.template_path, PathBuf::from("templates/monthly.html"));
        assert_eq!(config.render.conversion_timeout_secs, 45);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_timeouts(ctx: &mut ConfigTestContext) {
        for bad in ["0", "-5", "soon"] {
            ctx.vars.insert("HTTP_TIMEOUT_SECS", bad.to_string());
            assert!(
                matches!(ctx.load(), Err(ReportError::InvalidConfig { var: "HTTP_TIMEOUT_SECS", .. })),
                "accepted '{}'",
                bad
            );
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_values_are_trimmed(ctx: &mut ConfigTestContext) {
        ctx.vars.insert("EMAIL", "  dev@acme.com\n".to_string());
        assert_eq!(ctx.load().unwrap().jira.email, "dev@acme.com");
    }
}
