//! Text output formatting.

use fedicheck_core::{Account, AuthContext, Status};
use scraper::{Html, Node};

use super::json::SmokeOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats a sign-in result.
    pub fn format_auth(&self, auth: &AuthContext) -> String {
        let mut lines = vec![format!("{} {}", self.paint(GREEN, "✓"), self.paint(BOLD, auth.username()))];

        if let Some(token) = auth.token() {
            lines.push(format!("  Token:   {token}"));
        }
        if let Some(jar) = auth.session_cookies() {
            let names: Vec<&str> = jar.iter().map(|(name, _)| name).collect();
            lines.push(format!("  Cookies: {}", names.join(", ")));
        }
        lines.join("\n")
    }

    /// Formats one account.
    pub fn format_account(&self, account: &Account) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.paint(BOLD, &format!("@{}", account.acct)),
            self.paint(DIM, &format!("(id {})", account.id))
        )];

        if let Some(name) = account.display_name.as_deref().filter(|n| !n.is_empty()) {
            lines.push(format!("  Name:      {name}"));
        }
        if let (Some(followers), Some(following)) = (account.followers_count, account.following_count) {
            lines.push(format!("  Followers: {followers}  Following: {following}"));
        }
        for field in &account.fields {
            lines.push(format!("  {}: {}", field.name, strip_html(&field.value)));
        }
        lines.join("\n")
    }

    /// Formats a timeline, one status per block.
    pub fn format_statuses(&self, statuses: &[Status]) -> String {
        if statuses.is_empty() {
            return self.paint(DIM, "No statuses");
        }

        statuses
            .iter()
            .map(|status| {
                let header = format!(
                    "{} {}",
                    self.paint(BOLD, &format!("@{}", status.account.acct)),
                    self.paint(DIM, &status.id)
                );
                format!("{header}\n  {}", strip_html(&status.content))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Formats the smoke report.
    pub fn format_smoke(&self, report: &SmokeOutput) -> String {
        let mut lines = vec![format!("Smoke test against {}", report.base_url)];
        lines.push("─".repeat(40));

        for step in &report.steps {
            let mark = if step.ok { self.paint(GREEN, "✓") } else { self.paint(RED, "✗") };
            match &step.detail {
                Some(detail) => lines.push(format!("{mark} {:<24} {detail}", step.name)),
                None => lines.push(format!("{mark} {}", step.name)),
            }
        }

        let summary = if report.passed() {
            self.paint(GREEN, "PASSED")
        } else {
            self.paint(RED, "FAILED")
        };
        lines.push(String::new());
        lines.push(summary);
        lines.join("\n")
    }
}

/// Renders status HTML as plain text. Paragraphs and line breaks become
/// spaces and entities are decoded once.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Element(element) if matches!(element.name(), "p" | "br") => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            Node::Text(text) => out.push_str(text),
            _ => {}
        }
    }

    out.trim().to_string()
}
