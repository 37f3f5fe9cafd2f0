//! Reader configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_MAX_POST_BYTES;

/// Main reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    // Site
    pub title: String,
    pub show_theme_toggle: bool,
    pub menu: Vec<MenuItem>,

    // Remote store
    pub index_url: String,
    pub posts_base_url: String,
    pub max_post_bytes: usize,
    #[serde(default)]
    pub http: HttpConfig,

    // Pages
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub about: AboutConfig,

    // Appearance
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            title: "Blogs".to_string(),
            show_theme_toggle: true,
            menu: vec![MenuItem::link("Home", "/"), MenuItem::link("About", "/about")],

            index_url: "https://raw.githubusercontent.com/the-mr-compiler/my-blogs/refs/heads/main/src/assets/posts.json".to_string(),
            posts_base_url: "https://raw.githubusercontent.com/the-mr-compiler/my-blogs/refs/heads/main/src/blogs".to_string(),
            max_post_bytes: DEFAULT_MAX_POST_BYTES,
            http: HttpConfig::default(),

            feed: FeedConfig::default(),
            about: AboutConfig::default(),

            theme: ThemeConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ReaderConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A header menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub submenu: Vec<MenuItem>,
}

impl MenuItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            submenu: Vec::new(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Home feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Card image URL with `{width}`, `{height}` and `{n}` placeholders
    pub image_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            image_url: "https://picsum.photos/{width}/{height}?random={n}".to_string(),
        }
    }
}

/// About page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub heading: String,
    pub cards: Vec<AboutCard>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            heading: "About This Project".to_string(),
            cards: vec![
                AboutCard {
                    title: "👋 Hello!".to_string(),
                    body: Some(
                        "Welcome to a small markdown blog about building tools and writing code."
                            .to_string(),
                    ),
                    items: Vec::new(),
                },
                AboutCard {
                    title: "📚 Purpose".to_string(),
                    body: Some(
                        "Posts live as markdown files in a remote repository and are rendered on demand."
                            .to_string(),
                    ),
                    items: Vec::new(),
                },
                AboutCard {
                    title: "🛠 Tech Stack".to_string(),
                    body: None,
                    items: vec![
                        "Rust + axum".to_string(),
                        "pulldown-cmark + syntect".to_string(),
                        "ammonia".to_string(),
                        "Tera templates".to_string(),
                    ],
                },
            ],
        }
    }
}

/// A card on the about page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutCard {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Color theme configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Overrides the detected system color scheme (`light` or `dark`)
    pub prefers_color_scheme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.title, "Blogs");
        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.show_theme_toggle);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
index_url: http://localhost:9000/posts.json
posts_base_url: http://localhost:9000/blogs/
menu:
  - label: Home
    href: /
  - label: More
    submenu:
      - label: About
        href: /about
theme:
  prefers_color_scheme: dark
"#;
        let config: ReaderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.menu[1].href, None);
        assert_eq!(config.menu[1].submenu[0].label, "About");
        assert_eq!(config.theme.prefers_color_scheme.as_deref(), Some("dark"));
        assert_eq!(config.posts_base_url, "http://localhost:9000/blogs/");
        // Unset sections keep their defaults
        assert_eq!(config.about.cards.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From File\nshow_theme_toggle: false\n").unwrap();
        let config = ReaderConfig::load(&path).unwrap();
        assert_eq!(config.title, "From File");
        assert!(!config.show_theme_toggle);
    }
}
