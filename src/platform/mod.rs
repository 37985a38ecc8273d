//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (pointer timestamps)
//! - Navigation to the results page
//! - Ending a session (score hand-off)

use crate::persistence::{KeyValueStore, save_last_score};

/// Page shown after a run ends
pub const RESULTS_PAGE: &str = "home.html";

/// Something that can leave the game view
pub trait Navigator {
    fn navigate(&mut self, href: &str);
}

/// Browser navigation via `window.location` (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn navigate(&mut self, href: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to navigate from");
            return;
        };
        if let Err(e) = window.location().set_href(href) {
            log::error!("Navigation to {} failed: {:?}", href, e);
        }
    }
}

/// Navigator that only logs (native builds)
#[derive(Debug, Default)]
pub struct LogNavigator {
    /// Last destination requested
    pub last: Option<String>,
}

impl Navigator for LogNavigator {
    fn navigate(&mut self, href: &str) {
        log::info!("Would navigate to {}", href);
        self.last = Some(href.to_string());
    }
}

/// Hand the final score to the results page and leave.
///
/// Terminal for the session: the score write is best-effort and navigation
/// happens regardless.
pub fn end_session(store: &mut impl KeyValueStore, navigator: &mut impl Navigator, score: u32) {
    save_last_score(store, score);
    navigator.navigate(RESULTS_PAGE);
}

/// Milliseconds since an arbitrary epoch, monotonic for the session
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since an arbitrary epoch, monotonic for the session
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, load_last_score};

    #[test]
    fn test_end_session_saves_then_navigates() {
        let mut store = MemoryStore::new();
        let mut nav = LogNavigator::default();

        end_session(&mut store, &mut nav, 23);

        assert_eq!(load_last_score(&store), Some(23));
        assert_eq!(nav.last.as_deref(), Some(RESULTS_PAGE));
    }

    #[test]
    fn test_now_ms_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
