//! View state and actions for the four dashboard tabs.
//!
//! Loads are never cancelled, so a slow response can arrive after a newer
//! one. Every load takes a sequence number from [`FeedState::begin`] and
//! only the response to the latest dispatched load is applied. Numbers come
//! from one process-wide counter, so a response addressed to a feed that has
//! since been replaced never matches its successor.

pub mod developers;
pub mod friends;
pub mod projects;
pub mod stories;

use crate::error::ClientError;
use crate::notify::Severity;
use crate::session::store::SessionStore;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub enum Applied {
    Loaded,
    Failed(ClientError),
    /// A newer load was dispatched after this one; the response was ignored.
    Stale,
}

#[derive(Debug)]
pub struct FeedState<T> {
    data: T,
    loading: bool,
    latest: u64,
}

impl<T: Default> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: true,
            latest: 0,
        }
    }
}

impl<T> FeedState<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    /// True until the first response (success or failure) arrives.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) -> u64 {
        self.latest = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        self.latest
    }

    #[cfg(test)]
    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn apply(&mut self, seq: u64, result: Result<T, ClientError>) -> Applied {
        if seq != self.latest {
            tracing::debug!(seq, latest = self.latest, "ignoring stale response");
            return Applied::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                Applied::Loaded
            }
            Err(err) => Applied::Failed(err),
        }
    }

    /// Applies a load result and reports a failed load with `failure`.
    pub fn settle(
        &mut self,
        seq: u64,
        result: Result<T, ClientError>,
        session: &SessionStore,
        failure: &str,
    ) {
        if let Applied::Failed(err) = self.apply(seq, result) {
            tracing::warn!(%err, "{failure}");
            session.notify(failure, Severity::Error);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{Applied, FeedState};
    use crate::error::ClientError;

    #[test]
    fn latest_response_wins_regardless_of_arrival_order() {
        let mut feed: FeedState<Vec<&str>> = FeedState::default();
        let first = feed.begin();
        let second = feed.begin();

        assert!(matches!(feed.apply(second, Ok(vec!["fresh"])), Applied::Loaded));
        assert!(matches!(feed.apply(first, Ok(vec!["stale"])), Applied::Stale));

        assert_eq!(feed.data(), &vec!["fresh"]);
        assert!(!feed.is_loading());
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut feed: FeedState<Vec<u8>> = FeedState::default();
        let first = feed.begin();
        let _second = feed.begin();

        assert!(matches!(feed.apply(first, Ok(vec![1])), Applied::Stale));
        assert!(feed.is_loading());
        assert!(feed.data().is_empty());
    }

    #[test]
    fn sequence_numbers_are_not_shared_between_feeds() {
        let mut replaced: FeedState<Vec<&str>> = FeedState::default();
        let in_flight = replaced.begin();
        drop(replaced);

        let mut fresh: FeedState<Vec<&str>> = FeedState::default();
        let current = fresh.begin();
        assert_ne!(in_flight, current);

        assert!(matches!(fresh.apply(in_flight, Ok(vec!["previous user"])), Applied::Stale));
        assert!(fresh.is_loading());
        assert!(fresh.data().is_empty());

        assert!(matches!(fresh.apply(current, Ok(vec!["current user"])), Applied::Loaded));
        assert_eq!(fresh.data(), &vec!["current user"]);
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut feed: FeedState<Vec<u8>> = FeedState::default();
        let seq = feed.begin();
        feed.apply(seq, Ok(vec![1, 2]));

        let seq = feed.begin();
        let applied = feed.apply(seq, Err(ClientError::status(500, None)));

        assert!(matches!(applied, Applied::Failed(_)));
        assert_eq!(feed.data(), &vec![1, 2]);
        assert!(!feed.is_loading());
    }
}
