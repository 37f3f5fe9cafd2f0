//! Content module - front-matter, markdown rendering and sanitizing
//!
//! A post goes through three stages, each usable on its own:
//! [`FrontMatter::parse`] splits metadata from the body,
//! [`MarkdownRenderer::render`] turns the body into highlighted HTML, and
//! [`sanitize`] strips anything executable. [`MarkdownPipeline::render_post`]
//! chains them and is the only way to build a [`PostDocument`].

mod frontmatter;
mod markdown;
mod post;
mod sanitize;

pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, CLASS_STYLE, PLAINTEXT};
pub use post::{sort_by_date_desc, PostDocument, PostSummary};
pub use sanitize::sanitize;

use thiserror::Error;

/// Largest post body the pipeline accepts by default (2 MiB)
pub const DEFAULT_MAX_POST_BYTES: usize = 2 * 1024 * 1024;

/// Errors raised while turning a post into HTML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Post body is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Render error: {0}")]
    Render(String),
}

/// The full post rendering pipeline
pub struct MarkdownPipeline {
    renderer: MarkdownRenderer,
    max_post_bytes: usize,
}

impl MarkdownPipeline {
    /// Create a pipeline with the default size limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_POST_BYTES)
    }

    /// Create a pipeline that rejects bodies over `max_post_bytes`
    pub fn with_limit(max_post_bytes: usize) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            max_post_bytes,
        }
    }

    /// Render markdown and sanitize the result
    pub fn render_html(&self, markdown: &str) -> Result<String, ContentError> {
        if markdown.len() > self.max_post_bytes {
            return Err(ContentError::TooLarge {
                size: markdown.len(),
                limit: self.max_post_bytes,
            });
        }
        let html = self.renderer.render(markdown)?;
        Ok(sanitize(&html))
    }

    /// Turn a raw post into a document ready for display
    ///
    /// The title falls back to the slug and the date to an empty string when
    /// the front-matter does not provide them.
    pub fn render_post(&self, slug: &str, raw: &str) -> Result<PostDocument, ContentError> {
        let (front_matter, body) = FrontMatter::parse(raw);
        let content = self.render_html(body)?;

        Ok(PostDocument {
            title: front_matter.title().unwrap_or_else(|| slug.to_string()),
            date: front_matter.date().unwrap_or_default(),
            description: front_matter.description(),
            content,
        })
    }
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new()
    }
}
