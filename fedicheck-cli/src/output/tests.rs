//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::json::{SmokeOutput, StepOutput};
    use super::super::text::{strip_html, TextFormatter};
    use fedicheck_core::{Account, AuthContext, CookieJar, Status};

    fn account() -> Account {
        serde_json::from_str(
            r#"{"id": "42", "username": "newbie", "acct": "newbie", "display_name": "New Bie",
                "followers_count": 3, "following_count": 1,
                "fields": [{"name": "Pronouns", "value": "<p>they/them</p>"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello</p><p>world &amp; you</p>"), "Hello world & you");
        assert_eq!(strip_html("line<br>break"), "line break");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_strip_html_decodes_entities_once() {
        assert_eq!(
            strip_html("<p>write &amp;lt;b&amp;gt; for bold</p>"),
            "write &lt;b&gt; for bold"
        );
        assert_eq!(strip_html("<p>caf&#233; &nbsp;</p>"), "café");
        assert_eq!(
            strip_html(r#"<p>see <a href="https://fedi.test/@a"><span>@a</span></a></p>"#),
            "see @a"
        );
    }

    #[test]
    fn test_format_auth_without_colors() {
        let jar: CookieJar = [("_mastodon_session", "s")].into_iter().collect();
        let auth = AuthContext::new("alice@localhost", "pw")
            .with_token("Bearer abc")
            .with_session_cookies(jar);

        let text = TextFormatter::new(false).format_auth(&auth);
        assert!(text.starts_with("✓ alice@localhost"));
        assert!(text.contains("Token:   Bearer abc"));
        assert!(text.contains("Cookies: _mastodon_session"));
        assert!(!text.contains("pw"));
    }

    #[test]
    fn test_format_account() {
        let text = TextFormatter::new(false).format_account(&account());
        assert!(text.starts_with("@newbie (id 42)"));
        assert!(text.contains("Name:      New Bie"));
        assert!(text.contains("Followers: 3  Following: 1"));
        assert!(text.contains("Pronouns: they/them"));
    }

    #[test]
    fn test_format_statuses() {
        let statuses: Vec<Status> = serde_json::from_str(
            r#"[{"id": "7", "content": "<p>hi there</p>",
                 "account": {"id": "42", "username": "newbie", "acct": "newbie"}}]"#,
        )
        .unwrap();

        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_statuses(&statuses), "@newbie 7\n  hi there");
        assert_eq!(formatter.format_statuses(&[]), "No statuses");
    }

    #[test]
    fn test_format_smoke_colors() {
        let report = SmokeOutput {
            base_url: "http://localhost:3000".to_string(),
            steps: vec![
                StepOutput { name: "admin sign-in".to_string(), ok: true, detail: None },
                StepOutput {
                    name: "register".to_string(),
                    ok: false,
                    detail: Some("Unexpected status 422, expected 200".to_string()),
                },
            ],
        };

        let plain = TextFormatter::new(false).format_smoke(&report);
        assert!(plain.contains("✓ admin sign-in"));
        assert!(plain.contains("✗ register"));
        assert!(plain.ends_with("FAILED"));

        let colored = TextFormatter::new(true).format_smoke(&report);
        assert!(colored.contains("\x1b[31m"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, SmokeOutput};
    use fedicheck_core::{AuthContext, CookieJar};
    use serde_json::Value;

    #[test]
    fn test_format_auth_omits_password() {
        let jar: CookieJar = [("_mastodon_session", "s")].into_iter().collect();
        let auth = AuthContext::new("alice@localhost", "secret")
            .with_token("Bearer abc")
            .with_session_cookies(jar);

        let json = JsonFormatter::new(false).format_auth(&auth).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["username"], "alice@localhost");
        assert_eq!(value["token"], "Bearer abc");
        assert_eq!(value["cookies"][0], "_mastodon_session");
        assert_eq!(value["hasCsrf"], false);
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_format_auth_without_token() {
        let auth = AuthContext::new("alice@localhost", "secret");
        let json = JsonFormatter::new(false).format_auth(&auth).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("token").is_none());
        assert_eq!(value["cookies"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_pretty_output() {
        let report = SmokeOutput::default();
        let pretty = JsonFormatter::new(true).format(&report).unwrap();
        assert!(pretty.contains('\n'));
        assert!(report.passed());
    }
}
