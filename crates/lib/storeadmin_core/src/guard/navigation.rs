//! Navigation capability consumed by guard dispatch.

use std::sync::Mutex;

/// Options for a navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// The host router.
pub trait Navigator {
    fn navigate_to(&self, path: &str, options: NavigateOptions);
}

/// Navigator that records every navigation instead of performing it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<(String, NavigateOptions)>>,
}

impl RecordingNavigator {
    /// Navigations seen so far, oldest first.
    pub fn history(&self) -> Vec<(String, NavigateOptions)> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// Most recent navigation.
    pub fn last(&self) -> Option<(String, NavigateOptions)> {
        self.history().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str, options: NavigateOptions) {
        if let Ok(mut history) = self.history.lock() {
            history.push((path.to_string(), options));
        }
    }
}
