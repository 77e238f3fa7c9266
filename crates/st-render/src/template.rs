//! HTML page template.
//!
//! Produces complete documents for each [`PageState`] by string building.
//! Class names match the site stylesheet, linked when one is configured.

use std::fmt::Write;

use st_content::{ContentSection, Document};
use st_post::{PageState, PostMeta, PostPage, SiteLocale, post_route};
use st_richtext::{HtmlSerializer, escape_html as escape};

use crate::comments::{CommentsConfig, render_comments};
use crate::labels::Labels;

/// Seconds before the loading page reloads itself.
const LOADING_REFRESH_SECS: u32 = 2;

/// Renders post pages for one site.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    site_name: String,
    locale: SiteLocale,
    comments: Option<CommentsConfig>,
    stylesheet: Option<String>,
    rich_text: HtmlSerializer,
}

impl PageRenderer {
    #[must_use]
    pub fn new(site_name: impl Into<String>, locale: SiteLocale) -> Self {
        Self {
            site_name: site_name.into(),
            locale,
            comments: None,
            stylesheet: None,
            rich_text: HtmlSerializer::new().with_document_link_prefix(post_route("")),
        }
    }

    /// Embed the comment widget on loaded posts.
    #[must_use]
    pub fn with_comments(mut self, comments: CommentsConfig) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Link a stylesheet from every page.
    #[must_use]
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }

    /// Render a complete HTML document for `state`.
    #[must_use]
    pub fn render(&self, state: &PageState) -> String {
        match state {
            PageState::Loading => self.render_loading(),
            PageState::Loaded(page) => self.render_post(page),
            PageState::NotFound { slug } => self.render_not_found(slug),
        }
    }

    /// Placeholder shown while a post is generated. Reloads itself.
    #[must_use]
    pub fn render_loading(&self) -> String {
        let labels = self.labels();
        let mut html = String::with_capacity(1024);
        let refresh = format!("<meta http-equiv=\"refresh\" content=\"{LOADING_REFRESH_SECS}\">\n");
        self.open_document(&mut html, labels.loading, &refresh);
        let _ = writeln!(
            html,
            "<main class=\"container loading\">\n<h1>{}</h1>\n</main>",
            escape(labels.loading)
        );
        close_document(&mut html);
        html
    }

    #[must_use]
    pub fn render_not_found(&self, slug: &str) -> String {
        let labels = self.labels();
        let mut html = String::with_capacity(1024);
        self.open_document(&mut html, labels.not_found_title, "");
        html.push_str("<main class=\"container not-found\">\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape(labels.not_found_title));
        let _ = writeln!(
            html,
            "<p>{} <code>{}</code>.</p>",
            escape(labels.not_found_body),
            escape(&post_route(slug))
        );
        let _ = writeln!(html, "<a href=\"/\">{}</a>", escape(labels.back_home));
        html.push_str("</main>\n");
        close_document(&mut html);
        html
    }

    #[must_use]
    pub fn render_post(&self, page: &PostPage) -> String {
        let labels = self.labels();
        let post = &page.post;
        let meta = PostMeta::from_page(page, self.locale);

        let mut html = String::with_capacity(16 * 1024);
        self.open_document(&mut html, &post.data.title, "");

        if let Some(url) = &post.data.banner.url {
            let alt = post.data.banner.alt.as_deref().unwrap_or("banner");
            let _ = writeln!(
                html,
                "<img src=\"{}\" alt=\"{}\" class=\"banner\">",
                escape(url),
                escape(alt)
            );
        }

        html.push_str("<main class=\"container\">\n<article class=\"post\">\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape(&post.data.title));
        render_info(&mut html, post, &meta, labels);
        for section in &post.data.content {
            self.render_section(&mut html, section);
        }
        html.push_str("</article>\n");

        html.push_str("<div class=\"divider\"></div>\n");
        html.push_str("<div class=\"post-footer\">\n");
        render_neighbors(&mut html, page, labels);
        if let Some(comments) = &self.comments {
            render_comments(&mut html, comments, post.slug());
        }
        if page.preview {
            let _ = writeln!(
                html,
                "<aside class=\"exit-preview\"><a href=\"/api/exit-preview\">{}</a></aside>",
                escape(labels.exit_preview)
            );
        }
        html.push_str("</div>\n</main>\n");

        close_document(&mut html);
        html
    }

    fn render_section(&self, html: &mut String, section: &ContentSection) {
        html.push_str("<section class=\"post-content\">\n");
        if let Some(heading) = section.heading.as_deref().filter(|h| !h.is_empty()) {
            let _ = writeln!(html, "<h2>{}</h2>", escape(heading));
        }
        html.push_str("<div class=\"post-body\">");
        html.push_str(&self.rich_text.serialize(&section.body));
        html.push_str("</div>\n</section>\n");
    }

    /// Doctype, head, and site header.
    fn open_document(&self, html: &mut String, title: &str, extra_head: &str) {
        let _ = writeln!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
            self.locale.language_tag()
        );
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        html.push_str(extra_head);
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            escape(title),
            escape(&self.site_name)
        );
        if let Some(href) = &self.stylesheet {
            let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", escape(href));
        }
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(
            html,
            "<header class=\"header\"><a href=\"/\" class=\"logo\">{}</a></header>",
            escape(&self.site_name)
        );
    }

    fn labels(&self) -> &'static Labels {
        Labels::for_locale(self.locale)
    }
}

fn close_document(html: &mut String) {
    html.push_str("</body>\n</html>\n");
}

/// Publication date, author, reading time, and last edit.
fn render_info(html: &mut String, post: &Document, meta: &PostMeta, labels: &Labels) {
    html.push_str("<div class=\"info\">\n");
    if let (Some(date), Some(raw)) = (&meta.published_date, &post.first_publication_date) {
        let _ = writeln!(
            html,
            "<time class=\"published\" datetime=\"{}\">{}</time>",
            escape(raw),
            escape(date)
        );
    }
    let _ = writeln!(
        html,
        "<span class=\"author\">{}</span>",
        escape(&post.data.author)
    );
    let _ = writeln!(
        html,
        "<time class=\"reading-time\">{} {}</time>",
        meta.reading_minutes,
        escape(labels.reading_time_unit)
    );
    html.push_str("</div>\n");

    if let (Some(date), Some(time), Some(raw)) = (
        &meta.updated_date,
        &meta.updated_time,
        &post.last_publication_date,
    ) {
        let _ = writeln!(
            html,
            "<p class=\"edited\"><time datetime=\"{}\">* {} {}, {} {}</time></p>",
            escape(raw),
            escape(labels.edited_on),
            escape(date),
            escape(labels.at),
            escape(time)
        );
    }
}

fn render_neighbors(html: &mut String, page: &PostPage, labels: &Labels) {
    html.push_str("<nav class=\"neighbors\">\n");
    render_neighbor(
        html,
        page.previous.as_ref(),
        "previous",
        labels.previous_post,
    );
    render_neighbor(html, page.next.as_ref(), "next", labels.next_post);
    html.push_str("</nav>\n");
}

fn render_neighbor(html: &mut String, neighbor: Option<&Document>, class: &str, label: &str) {
    let _ = writeln!(html, "<div class=\"{class}\">");
    if let Some(doc) = neighbor.filter(|d| !d.slug().is_empty()) {
        let _ = writeln!(
            html,
            "<p>{}</p>\n<a href=\"{}\">{}</a>",
            escape(&doc.data.title),
            escape(&post_route(doc.slug())),
            escape(label)
        );
    }
    html.push_str("</div>\n");
}
