//! Shared theme state

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use super::storage::KeyValueStore;
use super::Theme;

/// Storage key of the persisted theme
pub const STORAGE_KEY: &str = "theme";

/// The session's theme preference
///
/// One instance is shared (behind an `Arc`) by everything that renders
/// chrome. Writes go through [`ThemeStore::set_theme`], which persists the
/// marker and then publishes the new value to subscribers.
pub struct ThemeStore {
    storage: Mutex<Box<dyn KeyValueStore>>,
    current: watch::Sender<Theme>,
}

impl ThemeStore {
    /// Create the store, picking the persisted theme, then the system
    /// theme, then light
    pub fn new(storage: Box<dyn KeyValueStore>, system: Option<Theme>) -> Self {
        let persisted = storage.get(STORAGE_KEY);
        let initial = match persisted.as_deref().and_then(Theme::from_marker) {
            Some(theme) => theme,
            None => {
                if let Some(value) = &persisted {
                    tracing::warn!("Ignoring invalid stored theme {:?}", value);
                }
                system.unwrap_or_default()
            }
        };
        tracing::debug!("Initial theme: {}", initial);

        let (current, _) = watch::channel(initial);
        Self {
            storage: Mutex::new(storage),
            current,
        }
    }

    /// The theme currently applied
    pub fn theme(&self) -> Theme {
        *self.current.borrow()
    }

    /// Watch for theme changes
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.current.subscribe()
    }

    /// Apply and persist a theme
    ///
    /// Returns `false` without writing anything when `theme` is already
    /// applied. A failed write is logged; the theme still changes for the
    /// session.
    pub fn set_theme(&self, theme: Theme) -> bool {
        let mut storage = self.lock_storage();
        self.apply(&mut storage, theme)
    }

    /// Switch to the other theme and return it
    pub fn toggle(&self) -> Theme {
        let mut storage = self.lock_storage();
        let next = self.theme().toggled();
        self.apply(&mut storage, next);
        next
    }

    fn apply(&self, storage: &mut MutexGuard<'_, Box<dyn KeyValueStore>>, theme: Theme) -> bool {
        if self.theme() == theme {
            return false;
        }
        if let Err(e) = storage.set(STORAGE_KEY, theme.marker()) {
            tracing::warn!("Failed to persist theme {}: {}", theme, e);
        }
        self.current.send_replace(theme);
        tracing::info!("Theme set to {}", theme);
        true
    }

    fn lock_storage(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
