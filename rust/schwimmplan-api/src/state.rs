use std::sync::Arc;

use tokio::sync::RwLock;

use schwimmplan_core::PublishedState;

/// The single shared published state.
///
/// Writers replace the whole value; readers clone a complete snapshot.
/// Nobody ever observes a mix of two refresh cycles.
#[derive(Debug, Clone)]
pub struct SharedState {
    inner: Arc<RwLock<PublishedState>>,
}

impl SharedState {
    /// Starts in the initializing state, before the first cycle runs.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PublishedState::initializing())),
        }
    }

    /// Replace the state wholesale with the result of one cycle.
    pub async fn publish(&self, state: PublishedState) {
        *self.inner.write().await = state;
    }

    /// A complete snapshot of the current state.
    pub async fn snapshot(&self) -> PublishedState {
        self.inner.read().await.clone()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schwimmplan_core::RefreshStatus;

    #[tokio::test]
    async fn test_publish_replaces_wholesale() {
        let shared = SharedState::new();
        assert_eq!(shared.snapshot().await.status, RefreshStatus::Initializing);

        shared.publish(PublishedState::no_dates()).await;
        assert_eq!(shared.snapshot().await.status, RefreshStatus::NoDatesFound);

        shared.publish(PublishedState::download_error()).await;
        let state = shared.snapshot().await;
        assert_eq!(state.status, RefreshStatus::ErrorPdfDownload);
        assert!(state.next_event.is_none());
    }
}
