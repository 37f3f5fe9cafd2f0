//! Show a single post

use anyhow::Result;

use crate::repository::ContentSource;
use crate::view::PostViewState;
use crate::BlogReader;

/// Print a post as sanitized HTML, or its raw markdown
pub async fn run<S: ContentSource>(reader: &BlogReader<S>, slug: &str, raw: bool) -> Result<()> {
    if raw {
        match reader.repository.get_post_body(slug).await {
            Some(body) => print!("{}", body),
            None => anyhow::bail!("Post not found: {}", slug),
        }
        return Ok(());
    }

    let view = reader.post_view();
    let state = match view.navigate(slug).await {
        Some(state) => state,
        None => view.state(),
    };

    match state {
        PostViewState::Displayed(post) => {
            println!("{}", post.title);
            if !post.date.is_empty() {
                println!("{}", crate::helpers::date::format_date(&post.date));
            }
            println!();
            println!("{}", post.content);
        }
        PostViewState::NotFound => anyhow::bail!("Post not found: {}", slug),
        PostViewState::Error(message) => anyhow::bail!("{}", message),
        PostViewState::Loading => {}
    }

    Ok(())
}
