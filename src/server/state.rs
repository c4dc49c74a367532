//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::traits::StudentStore;
use crate::view::ViewSettings;

/// State shared by all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The selected store binding.
    pub store: Arc<dyn StudentStore>,
    /// Server configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn StudentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// View settings derived from the configuration.
    #[must_use]
    pub fn settings(&self) -> ViewSettings {
        ViewSettings::from_config(&self.config)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockStudentStore;
    use crate::view::Theme;
    use static_assertions::assert_impl_all;

    assert_impl_all!(AppState: Clone, Send, Sync);

    #[test]
    fn test_debug_hides_store() {
        let state = AppState::new(Arc::new(MockStudentStore::new()), Config::default());
        let debug = format!("{state:?}");
        assert!(debug.contains("AppState"));
        assert!(debug.contains("config"));
    }

    #[test]
    fn test_settings_follow_config() {
        let config = Config {
            theme: Theme::Dark,
            ..Config::default()
        };
        let state = AppState::new(Arc::new(MockStudentStore::new()), config);
        assert_eq!(state.settings().theme, Theme::Dark);
    }
}
