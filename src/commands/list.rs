//! List posts from the remote index

use anyhow::Result;

use crate::content::PostSummary;
use crate::helpers::date::short_date;
use crate::repository::ContentSource;
use crate::BlogReader;

/// Print the post index, newest first
pub async fn run<S: ContentSource>(reader: &BlogReader<S>) -> Result<()> {
    let posts = reader.repository.list_posts().await;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_line(post));
    }

    Ok(())
}

fn format_line(post: &PostSummary) -> String {
    let date = if post.date.is_empty() {
        "----------".to_string()
    } else {
        short_date(&post.date)
    };
    format!("{} - {} [{}]", date, post.title, post.slug)
}
