//! Built-in reader templates using Tera template engine
//!
//! Templates and the base stylesheet are embedded in the binary. HTML
//! autoescaping stays on because index titles and descriptions come from the
//! remote store; post bodies are already sanitized and marked `safe`.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::css_for_theme_with_class_style;
use tera::{Context, Tera};

use crate::config::AboutConfig;
use crate::content::{PostDocument, CLASS_STYLE};
use crate::helpers::date::format_date;
use crate::theme::Theme;
use crate::view::{Chrome, HomeFeed, PostViewState};

/// Base stylesheet
pub const STYLE_CSS: &str = include_str!("reader/style.css");

/// Syntect theme used for code in the light theme
const LIGHT_HIGHLIGHT_THEME: &str = "InspiredGitHub";
/// Syntect theme used for code in the dark theme
const DARK_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Template renderer with the embedded reader templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("reader/layout.html")),
            ("home.html", include_str!("reader/home.html")),
            ("about.html", include_str!("reader/about.html")),
            ("post.html", include_str!("reader/post.html")),
            ("not_found.html", include_str!("reader/not_found.html")),
            (
                "partials/header.html",
                include_str!("reader/partials/header.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    pub fn render_home(&self, chrome: &Chrome, feed: &HomeFeed) -> Result<String> {
        let mut context = Context::new();
        context.insert("chrome", chrome);
        context.insert("feed", feed);
        self.render("home.html", &context)
    }

    pub fn render_about(&self, chrome: &Chrome, about: &AboutConfig) -> Result<String> {
        let mut context = Context::new();
        context.insert("chrome", chrome);
        context.insert("about", about);
        self.render("about.html", &context)
    }

    pub fn render_post(&self, chrome: &Chrome, state: &PostViewState) -> Result<String> {
        let mut context = Context::new();
        context.insert("chrome", chrome);

        let (post, not_found, error) = match state {
            PostViewState::Displayed(document) => (Some(PostData::from(document)), false, None),
            PostViewState::NotFound => (None, true, None),
            PostViewState::Error(message) => (None, false, Some(message.as_str())),
            PostViewState::Loading => (None, false, None),
        };
        context.insert("post", &post);
        context.insert("not_found", &not_found);
        context.insert("error", &error);

        self.render("post.html", &context)
    }

    pub fn render_not_found(&self, chrome: &Chrome) -> Result<String> {
        let mut context = Context::new();
        context.insert("chrome", chrome);
        self.render("not_found.html", &context)
    }
}

/// A displayed post, with its date formatted for reading
#[derive(Debug, Clone, Serialize)]
struct PostData<'a> {
    title: &'a str,
    date: String,
    description: Option<&'a str>,
    content: &'a str,
}

impl<'a> From<&'a PostDocument> for PostData<'a> {
    fn from(document: &'a PostDocument) -> Self {
        Self {
            title: &document.title,
            date: format_date(&document.date),
            description: document.description.as_deref(),
            content: &document.content,
        }
    }
}

/// Stylesheet for highlighted code in the given theme
pub fn highlight_css(theme: Theme) -> Result<String> {
    let name = match theme {
        Theme::Light => LIGHT_HIGHLIGHT_THEME,
        Theme::Dark => DARK_HIGHLIGHT_THEME,
    };
    let theme_set = ThemeSet::load_defaults();
    let highlight_theme = theme_set
        .themes
        .get(name)
        .ok_or_else(|| anyhow!("Highlight theme not found: {}", name))?;
    Ok(css_for_theme_with_class_style(highlight_theme, CLASS_STYLE)?)
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::content::PostSummary;

    fn chrome(theme: Theme) -> Chrome {
        Chrome::new(&ReaderConfig::default(), theme, "/")
    }

    #[test]
    fn test_layout_carries_theme() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_home(&chrome(Theme::Dark), &HomeFeed::default())
            .unwrap();
        assert!(html.contains(r#"data-theme="black""#));
        assert!(html.contains("highlight-dark.css"));
        assert!(html.contains(r#"name="theme" value="silk""#));
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_home_escapes_index_fields() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![PostSummary {
            title: "<script>alert(1)</script>".to_string(),
            slug: "x".to_string(),
            date: "2024-01-01".to_string(),
            description: "<b onmouseover=x>hi</b>".to_string(),
            file: "x.md".to_string(),
        }];
        let feed = HomeFeed::from_posts(&posts, &Default::default());
        let html = renderer.render_home(&chrome(Theme::Light), &feed).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b onmouseover"));
        assert!(html.contains("Read Latest"));
    }

    #[test]
    fn test_post_states() {
        let renderer = TemplateRenderer::new().unwrap();
        let chrome = chrome(Theme::Light);

        let document = PostDocument {
            title: "Hello".to_string(),
            date: "2024-06-01".to_string(),
            description: None,
            content: "<p>Body <strong>bold</strong></p>".to_string(),
        };
        let html = renderer
            .render_post(&chrome, &PostViewState::Displayed(document))
            .unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("June 01, 2024"));
        assert!(html.contains("<p>Body <strong>bold</strong></p>"));

        let html = renderer.render_post(&chrome, &PostViewState::NotFound).unwrap();
        assert!(html.contains("Post not found"));

        let html = renderer
            .render_post(&chrome, &PostViewState::Error("Failed".to_string()))
            .unwrap();
        assert!(html.contains("alert-error"));

        let html = renderer.render_post(&chrome, &PostViewState::Loading).unwrap();
        assert!(html.contains("Loading..."));
    }

    #[test]
    fn test_about_cards() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_about(&chrome(Theme::Light), &AboutConfig::default())
            .unwrap();
        assert!(html.contains("About This Project"));
        assert!(html.contains("pulldown-cmark + syntect"));
    }

    #[test]
    fn test_highlight_css() {
        let light = highlight_css(Theme::Light).unwrap();
        let dark = highlight_css(Theme::Dark).unwrap();
        assert!(light.contains(".hl-"));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out = truncate_chars_filter(&tera::Value::from("Hello world"), &args).unwrap();
        assert_eq!(out, tera::Value::from("Hello..."));
    }
}
