//! Utterances comment widget.

use std::fmt::Write;

use st_richtext::escape_html;

/// Script origin of the comment widget.
pub const UTTERANCES_ORIGIN: &str = "https://utteranc.es";

/// GitHub-issue backed comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsConfig {
    /// Repository holding the comment issues, as `owner/name`.
    pub repo: String,
    pub theme: String,
}

impl CommentsConfig {
    #[must_use]
    pub fn new(repo: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            theme: theme.into(),
        }
    }
}

/// Append the widget for the post identified by `slug`.
///
/// Each post maps to the issue whose title is its slug.
pub(crate) fn render_comments(html: &mut String, config: &CommentsConfig, slug: &str) {
    html.push_str("<div class=\"comments\">\n");
    let _ = writeln!(
        html,
        "<script src=\"{UTTERANCES_ORIGIN}/client.js\" repo=\"{}\" \
         issue-term=\"{}\" theme=\"{}\" crossorigin=\"anonymous\" async></script>",
        escape_html(&config.repo),
        escape_html(slug),
        escape_html(&config.theme),
    );
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_references_slug() {
        let mut html = String::new();
        render_comments(
            &mut html,
            &CommentsConfig::new("owner/blog", "github-dark"),
            "hello-world",
        );
        assert!(html.contains("src=\"https://utteranc.es/client.js\""));
        assert!(html.contains("repo=\"owner/blog\""));
        assert!(html.contains("issue-term=\"hello-world\""));
        assert!(html.contains("theme=\"github-dark\""));
    }
}
