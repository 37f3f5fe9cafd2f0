//! Single post view

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::content::{MarkdownPipeline, PostDocument};
use crate::repository::{ContentSource, PostRepository};

/// Shown when a post fails to load for any reason other than not existing
pub const LOAD_FAILED: &str = "Failed to load post. Please try again later.";

/// Shown when the route carries no slug
pub const NO_POST: &str = "No post specified.";

/// What the post view is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostViewState {
    Loading,
    Displayed(PostDocument),
    NotFound,
    Error(String),
}

/// The route a load was started for
#[derive(Debug, Clone, PartialEq, Eq)]
struct Route {
    slug: String,
    generation: u64,
}

/// Controller for the `/post/:slug` view
///
/// Every navigation bumps a generation counter. A load only commits its
/// result if its route is still the active one, so a slow load for an
/// abandoned slug can never overwrite a newer route's state.
pub struct PostView<S> {
    repository: Arc<PostRepository<S>>,
    pipeline: Arc<MarkdownPipeline>,
    active: Mutex<Route>,
    state: watch::Sender<PostViewState>,
}

impl<S: ContentSource> PostView<S> {
    pub fn new(repository: Arc<PostRepository<S>>, pipeline: Arc<MarkdownPipeline>) -> Self {
        let (state, _) = watch::channel(PostViewState::Loading);
        Self {
            repository,
            pipeline,
            active: Mutex::new(Route {
                slug: String::new(),
                generation: 0,
            }),
            state,
        }
    }

    /// Current state
    pub fn state(&self) -> PostViewState {
        self.state.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<PostViewState> {
        self.state.subscribe()
    }

    /// Slug of the active route
    pub fn active_slug(&self) -> String {
        self.lock_active().slug.clone()
    }

    /// Enter the route for `slug` and load it
    ///
    /// Returns the committed state, or `None` if another navigation took
    /// over while this one was loading.
    pub async fn navigate(&self, slug: &str) -> Option<PostViewState> {
        let route = self.enter(slug);
        let outcome = self.load(slug).await;
        self.commit(&route, outcome)
    }

    fn enter(&self, slug: &str) -> Route {
        let mut active = self.lock_active();
        active.generation += 1;
        active.slug = slug.to_string();
        self.state.send_replace(PostViewState::Loading);
        active.clone()
    }

    async fn load(&self, slug: &str) -> PostViewState {
        if slug.trim().is_empty() {
            return PostViewState::Error(NO_POST.to_string());
        }

        let Some(raw) = self.repository.get_post_body(slug).await else {
            return PostViewState::NotFound;
        };

        match self.pipeline.render_post(slug, &raw) {
            Ok(document) => PostViewState::Displayed(document),
            Err(e) => {
                tracing::error!("Failed to render post {}: {}", slug, e);
                PostViewState::Error(LOAD_FAILED.to_string())
            }
        }
    }

    fn commit(&self, route: &Route, outcome: PostViewState) -> Option<PostViewState> {
        let active = self.lock_active();
        if *active != *route {
            tracing::debug!(
                "Discarding stale load of {} (generation {}, active {} generation {})",
                route.slug,
                route.generation,
                active.slug,
                active.generation
            );
            return None;
        }
        self.state.send_replace(outcome.clone());
        Some(outcome)
    }

    fn lock_active(&self) -> MutexGuard<'_, Route> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
