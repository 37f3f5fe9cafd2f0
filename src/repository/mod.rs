//! Post repository - fetches the post index and post bodies
//!
//! Failures never reach the caller as errors: they are logged and turned into
//! an empty list or an absent body.

mod source;

#[cfg(test)]
pub(crate) use source::memory::MemorySource;
pub use source::{ContentSource, FetchError, HttpSource};

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ReaderConfig;
use crate::content::{sort_by_date_desc, PostSummary};

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").unwrap();
}

/// Whether a slug is safe to use as a resource name
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Reads posts from a remote store
pub struct PostRepository<S> {
    source: S,
    index_url: String,
    posts_base_url: String,
}

impl<S: ContentSource> PostRepository<S> {
    pub fn new(source: S, index_url: &str, posts_base_url: &str) -> Self {
        Self {
            source,
            index_url: index_url.to_string(),
            posts_base_url: posts_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(source: S, config: &ReaderConfig) -> Self {
        Self::new(source, &config.index_url, &config.posts_base_url)
    }

    /// Fetch the post index, newest first
    ///
    /// Returns an empty list if the index cannot be fetched or parsed.
    pub async fn list_posts(&self) -> Vec<PostSummary> {
        let body = match self.source.fetch_text(&self.index_url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error fetching posts list: {}", e);
                return Vec::new();
            }
        };

        let mut posts: Vec<PostSummary> = match serde_json::from_str(&body) {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!("Error parsing posts list from {}: {}", self.index_url, e);
                return Vec::new();
            }
        };

        sort_by_date_desc(&mut posts);
        tracing::debug!("Loaded {} posts", posts.len());
        posts
    }

    /// Fetch the raw markdown of a post
    ///
    /// Returns `None` when the post does not exist, cannot be fetched, or is
    /// blank.
    pub async fn get_post_body(&self, slug: &str) -> Option<String> {
        if !is_valid_slug(slug) {
            tracing::warn!("Rejected invalid slug {:?}", slug);
            return None;
        }

        let url = self.post_url(slug);
        match self.source.fetch_text(&url).await {
            Ok(body) if body.trim().is_empty() => {
                tracing::info!("Post {} has an empty body", slug);
                None
            }
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("Error fetching markdown for {}: {}", slug, e);
                None
            }
        }
    }

    /// URL of the markdown resource for a slug
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}.md", self.posts_base_url, slug)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "https://store.test/posts.json";
    const BASE: &str = "https://store.test/blogs";

    fn repository(source: MemorySource) -> PostRepository<MemorySource> {
        PostRepository::new(source, INDEX, BASE)
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("post_2024.v2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../secret"));
        assert!(!is_valid_slug(".hidden"));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug("a b"));
    }

    #[tokio::test]
    async fn test_list_posts_sorted_by_date() {
        let index = r#"[
            {"title":"A","slug":"a","date":"2024-01-01","description":"","file":"a.md"},
            {"title":"B","slug":"b","date":"2024-06-01","description":"","file":"b.md"},
            {"title":"C","slug":"c","date":"2023-12-31","description":"","file":"c.md"}
        ]"#;
        let repo = repository(MemorySource::new().with(INDEX, index));
        let dates: Vec<_> = repo
            .list_posts()
            .await
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[tokio::test]
    async fn test_list_posts_on_http_error() {
        for status in [404, 500] {
            let source = MemorySource::new().with_error(
                INDEX,
                FetchError::Status {
                    status,
                    url: INDEX.to_string(),
                },
            );
            assert!(repository(source).list_posts().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_list_posts_on_bad_json() {
        let repo = repository(MemorySource::new().with(INDEX, "{not json"));
        assert!(repo.list_posts().await.is_empty());

        let repo = repository(MemorySource::new().with(INDEX, r#"{"title":"object"}"#));
        assert!(repo.list_posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_post_body() {
        let url = format!("{}/hello.md", BASE);
        let repo = repository(MemorySource::new().with(&url, "# Hello"));
        assert_eq!(repo.get_post_body("hello").await.as_deref(), Some("# Hello"));
        assert_eq!(repo.get_post_body("missing-slug").await, None);
    }

    #[tokio::test]
    async fn test_blank_body_is_not_found() {
        let url = format!("{}/blank.md", BASE);
        let repo = repository(MemorySource::new().with(&url, "  \n\t\n"));
        assert_eq!(repo.get_post_body("blank").await, None);
    }

    #[tokio::test]
    async fn test_invalid_slug_is_not_fetched() {
        let repo = repository(MemorySource::new());
        assert_eq!(repo.get_post_body("../posts").await, None);
        assert!(repo.source().requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_caching() {
        let url = format!("{}/again.md", BASE);
        let repo = repository(MemorySource::new().with(&url, "v1"));
        assert_eq!(repo.get_post_body("again").await.as_deref(), Some("v1"));
        repo.source().insert(&url, Ok("v2".to_string()));
        assert_eq!(repo.get_post_body("again").await.as_deref(), Some("v2"));
        assert_eq!(repo.source().requests().len(), 2);
    }

    #[test]
    fn test_post_url_trims_slash() {
        let repo = PostRepository::new(MemorySource::new(), INDEX, "https://store.test/blogs/");
        assert_eq!(repo.post_url("x"), "https://store.test/blogs/x.md");
    }
}
