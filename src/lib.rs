//! blog-reader: a markdown blog reader
//!
//! Fetches a post index and markdown posts from a remote store and renders a
//! home feed, an about page and a reading view, with a persisted light/dark
//! theme and highlighted code blocks.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod repository;
pub mod server;
pub mod templates;
pub mod theme;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use content::MarkdownPipeline;
use repository::{ContentSource, HttpSource, PostRepository};
use theme::{FileStore, KeyValueStore, ThemeStore};
use view::PostView;

/// The reader application
pub struct BlogReader<S = HttpSource> {
    /// Reader configuration
    pub config: config::ReaderConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Remote post store
    pub repository: Arc<PostRepository<S>>,
    /// Markdown rendering pipeline
    pub pipeline: Arc<MarkdownPipeline>,
    /// Shared theme preference
    pub theme: Arc<ThemeStore>,
}

impl BlogReader {
    /// Create a reader from a directory, loading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::ReaderConfig::load(&config_path)?
        } else {
            config::ReaderConfig::default()
        };

        let source = HttpSource::new(Duration::from_secs(config.http.timeout_secs));
        let storage = FileStore::open(&base_dir);

        Ok(Self::from_parts(config, base_dir, source, Box::new(storage)))
    }
}

impl<S: ContentSource> BlogReader<S> {
    /// Assemble a reader from its collaborators
    pub fn from_parts(
        config: config::ReaderConfig,
        base_dir: PathBuf,
        source: S,
        storage: Box<dyn KeyValueStore>,
    ) -> Self {
        let repository = Arc::new(PostRepository::from_config(source, &config));
        let pipeline = Arc::new(MarkdownPipeline::with_limit(config.max_post_bytes));
        let system = theme::system_theme(&config.theme);
        let theme = Arc::new(ThemeStore::new(storage, system));

        Self {
            config,
            base_dir,
            repository,
            pipeline,
            theme,
        }
    }

    /// A fresh controller for the post view
    pub fn post_view(&self) -> PostView<S> {
        PostView::new(self.repository.clone(), self.pipeline.clone())
    }
}
