//! Reader server - renders the feed, about page and posts for a browser

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::repository::ContentSource;
use crate::templates::{self, TemplateRenderer};
use crate::theme::Theme;
use crate::view::{Chrome, HomeFeed, PostViewState};
use crate::BlogReader;

/// Server state
struct ServerState<S> {
    reader: Arc<BlogReader<S>>,
    renderer: TemplateRenderer,
    highlight_light: String,
    highlight_dark: String,
}

impl<S: ContentSource> ServerState<S> {
    fn chrome(&self, path: &str) -> Chrome {
        Chrome::new(&self.reader.config, self.reader.theme.theme(), path)
    }
}

/// Build the router for a reader
pub fn router<S: ContentSource + 'static>(reader: Arc<BlogReader<S>>) -> Result<Router> {
    let state = Arc::new(ServerState {
        reader,
        renderer: TemplateRenderer::new()?,
        highlight_light: templates::highlight_css(Theme::Light)?,
        highlight_dark: templates::highlight_css(Theme::Dark)?,
    });

    Ok(Router::new()
        .route("/", get(home_handler::<S>))
        .route("/about", get(about_handler::<S>))
        .route("/post/:slug", get(post_handler::<S>))
        .route("/theme", post(theme_handler::<S>))
        .route("/assets/style.css", get(style_handler))
        .route("/assets/highlight-light.css", get(highlight_light_handler::<S>))
        .route("/assets/highlight-dark.css", get(highlight_dark_handler::<S>))
        .fallback(fallback_handler::<S>)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the reader server
pub async fn start<S: ContentSource + 'static>(
    reader: Arc<BlogReader<S>>,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let app = router(reader)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Reader running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    let posts = state.reader.repository.list_posts().await;
    let feed = HomeFeed::from_posts(&posts, &state.reader.config.feed);
    page(StatusCode::OK, state.renderer.render_home(&state.chrome("/"), &feed))
}

async fn about_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    page(
        StatusCode::OK,
        state
            .renderer
            .render_about(&state.chrome("/about"), &state.reader.config.about),
    )
}

async fn post_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
) -> Response {
    let view = state.reader.post_view();
    let view_state = match view.navigate(&slug).await {
        Some(view_state) => view_state,
        None => view.state(),
    };

    let status = match &view_state {
        PostViewState::Displayed(_) | PostViewState::Loading => StatusCode::OK,
        PostViewState::NotFound => StatusCode::NOT_FOUND,
        PostViewState::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let chrome = state.chrome(&format!("/post/{}", slug));
    page(status, state.renderer.render_post(&chrome, &view_state))
}

/// Theme toggle form
#[derive(Debug, Deserialize)]
struct ThemeForm {
    theme: String,
    #[serde(default)]
    return_to: Option<String>,
}

async fn theme_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Form(form): Form<ThemeForm>,
) -> Response {
    let theme: Theme = match form.theme.parse() {
        Ok(theme) => theme,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    // The storage write touches the filesystem
    let store = state.reader.theme.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || store.set_theme(theme)).await {
        tracing::error!("Theme update failed: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Theme update failed").into_response();
    }
    Redirect::to(local_path(form.return_to.as_deref())).into_response()
}

async fn style_handler() -> Response {
    css(templates::STYLE_CSS.to_string())
}

async fn highlight_light_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    css(state.highlight_light.clone())
}

async fn highlight_dark_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    css(state.highlight_dark.clone())
}

async fn fallback_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    page(
        StatusCode::NOT_FOUND,
        state.renderer.render_not_found(&state.chrome("/")),
    )
}

fn page(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn css(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], body).into_response()
}

/// Only redirect to paths on this server
fn local_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
