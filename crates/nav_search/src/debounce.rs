//! Input coalescing for the search box

use std::time::{Duration, Instant};

use catalog_store::LinkGroup;
use tracing::debug;

use crate::index::{SearchIndex, SearchResults};

/// Holds the most recent value until `window` has passed with no newer one
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet window
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Release the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().map_or(false, |deadline| deadline <= now) {
            self.cancel()
        } else {
            None
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Sleep until the pending value is due and return it.
    /// Returns `None` right away when nothing is pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.cancel()
    }
}

/// Search box state: the index, the debounced query and the last results.
/// Results are recomputed when the debounced query settles or when the
/// catalog changes.
#[derive(Debug)]
pub struct SearchSession {
    index: SearchIndex,
    input: Debouncer<String>,
    applied: String,
    results: SearchResults,
}

impl SearchSession {
    pub fn new(groups: &[LinkGroup], window: Duration) -> Self {
        let index = SearchIndex::new(groups);
        let results = index.search("");
        Self {
            index,
            input: Debouncer::new(window),
            applied: String::new(),
            results,
        }
    }

    /// Catalog changed: re-annotate and refilter with the applied query
    pub fn set_groups(&mut self, groups: &[LinkGroup]) {
        self.index.rebuild(groups);
        self.results = self.index.search(&self.applied);
    }

    pub fn type_query(&mut self, raw: impl Into<String>, now: Instant) {
        self.input.push(raw.into(), now);
    }

    /// Apply the typed query if its quiet window has passed.
    /// Returns whether the results were recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.input.poll(now) {
            Some(query) => {
                self.apply(query);
                true
            }
            None => false,
        }
    }

    /// Wait for the pending query to settle and apply it
    pub async fn settle(&mut self) -> bool {
        match self.input.settle().await {
            Some(query) => {
                self.apply(query);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, query: String) {
        debug!("Applying search query {:?}", query);
        self.results = self.index.search(&query);
        self.applied = query;
    }

    pub fn is_pending(&self) -> bool {
        self.input.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.input.deadline()
    }

    pub fn applied_query(&self) -> &str {
        &self.applied
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_only_last_value_is_released() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.push("a", start);
        debouncer.push("ab", start + Duration::from_millis(100));
        debouncer.push("abc", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("abc"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(1, start);

        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.deadline(), None);
    }

    #[tokio::test]
    async fn test_settle_waits_for_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(20));
        let before = Instant::now();
        debouncer.push("query".to_string(), before);

        assert_eq!(debouncer.settle().await.as_deref(), Some("query"));
        assert!(before.elapsed() >= Duration::from_millis(20));
        assert_eq!(debouncer.settle().await, None);
    }

    #[test]
    fn test_session_applies_after_quiet_window() {
        let groups = vec![LinkGroup::new("开发环境", "dev-tools")
            .with_link("本地开发地址", "http://localhost:3000")
            .with_link("测试环境", "http://test.example.com")];
        let start = Instant::now();
        let mut session = SearchSession::new(&groups, WINDOW);
        assert_eq!(session.results().total_links(), 2);

        session.type_query("本", start);
        session.type_query("本地", start + Duration::from_millis(50));

        assert!(!session.poll(start + Duration::from_millis(200)));
        assert_eq!(session.results().total_links(), 2);

        assert!(session.poll(start + Duration::from_millis(350)));
        assert_eq!(session.applied_query(), "本地");
        assert_eq!(session.results().total_links(), 1);
    }

    #[test]
    fn test_session_refilters_on_catalog_change() {
        let start = Instant::now();
        let mut session = SearchSession::new(&[], WINDOW);
        session.type_query("grafana", start);
        assert!(session.poll(start + WINDOW));
        assert!(session.results().hits.is_empty());

        session.set_groups(&[
            LinkGroup::new("监控平台", "dev-tools").with_link("Grafana", "https://grafana.example.com")
        ]);
        assert_eq!(session.results().total_links(), 1);
    }
}
