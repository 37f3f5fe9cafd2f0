//! Views - the data each page renders
//!
//! Views hold no markup; the templates module turns them into HTML.

mod home;
mod post;

pub use home::{FeedCard, HomeFeed};
pub use post::{PostView, PostViewState, LOAD_FAILED, NO_POST};

use serde::Serialize;

use crate::config::{MenuItem, ReaderConfig};
use crate::theme::Theme;

/// Header and theme data shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub title: String,
    pub menu: Vec<MenuLink>,
    pub show_theme_toggle: bool,
    /// Marker applied to the document
    pub theme: &'static str,
    pub is_dark: bool,
    /// Marker the toggle switches to
    pub toggle_to: &'static str,
    /// Path the toggle returns to
    pub return_to: String,
}

impl Chrome {
    pub fn new(config: &ReaderConfig, theme: Theme, current_path: &str) -> Self {
        Self {
            title: config.title.clone(),
            menu: config.menu.iter().map(MenuLink::from).collect(),
            show_theme_toggle: config.show_theme_toggle,
            theme: theme.marker(),
            is_dark: theme.is_dark(),
            toggle_to: theme.toggled().marker(),
            return_to: current_path.to_string(),
        }
    }
}

/// A menu entry with its link resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
    pub submenu: Vec<MenuLink>,
}

impl From<&MenuItem> for MenuLink {
    fn from(item: &MenuItem) -> Self {
        Self {
            label: item.label.clone(),
            href: item.href.clone().unwrap_or_else(|| "#".to_string()),
            submenu: item.submenu.iter().map(MenuLink::from).collect(),
        }
    }
}
