//! Post models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::helpers::date::parse_date;

/// An entry of the remote post index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Post title
    pub title: String,

    /// URL-safe identifier, also the stem of the markdown file
    pub slug: String,

    /// Publication date as written in the index
    pub date: String,

    /// Short description shown on cards
    #[serde(default)]
    pub description: String,

    /// Name of the markdown resource
    #[serde(default)]
    pub file: String,
}

impl PostSummary {
    /// Publication date, if the index wrote a recognizable one
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }

    /// Route of the reading view for this post
    pub fn path(&self) -> String {
        format!("/post/{}", self.slug)
    }
}

/// Sort posts newest first
///
/// The sort is stable: posts with equal dates keep their index order, and
/// posts without a recognizable date go last.
pub fn sort_by_date_desc(posts: &mut [PostSummary]) {
    posts.sort_by_cached_key(|post| std::cmp::Reverse(post.parsed_date()));
}

/// A post rendered for reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDocument {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    /// Sanitized HTML body
    pub content: String,
}
