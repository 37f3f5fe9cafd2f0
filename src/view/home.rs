//! Home feed view

use serde::Serialize;

use crate::config::FeedConfig;
use crate::content::PostSummary;
use crate::helpers::date::format_date;

/// Banner image size for the latest post
const BANNER_SIZE: (u32, u32) = (800, 300);
/// Card image size for the other posts
const CARD_SIZE: (u32, u32) = (400, 200);

/// A post card on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedCard {
    pub title: String,
    pub description: String,
    pub date: String,
    pub path: String,
    pub image_url: String,
}

/// The home page: the latest post as a banner, the rest as cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeFeed {
    pub latest: Option<FeedCard>,
    pub others: Vec<FeedCard>,
}

impl HomeFeed {
    /// Build the feed from posts already sorted newest first
    pub fn from_posts(posts: &[PostSummary], feed: &FeedConfig) -> Self {
        let Some((latest, others)) = posts.split_first() else {
            return Self::default();
        };

        Self {
            latest: Some(card(latest, image_url(&feed.image_url, BANNER_SIZE, 1))),
            others: others
                .iter()
                .enumerate()
                .map(|(idx, post)| card(post, image_url(&feed.image_url, CARD_SIZE, idx + 2)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }
}

fn card(post: &PostSummary, image_url: String) -> FeedCard {
    FeedCard {
        title: post.title.clone(),
        description: post.description.clone(),
        date: format_date(&post.date),
        path: post.path(),
        image_url,
    }
}

fn image_url(template: &str, (width, height): (u32, u32), n: usize) -> String {
    template
        .replace("{width}", &width.to_string())
        .replace("{height}", &height.to_string())
        .replace("{n}", &n.to_string())
}
