use crate::repository::RepositoryState;

/// Receives the repository state after every change.
///
/// Called synchronously from the task that completed the fetch, outside of
/// any repository lock.
pub trait StateObserver: Send + Sync {
    fn on_change(&self, state: &RepositoryState);
}

impl<F> StateObserver for F
where
    F: Fn(&RepositoryState) + Send + Sync,
{
    fn on_change(&self, state: &RepositoryState) {
        self(state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
