use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use observatory_common::{Collection, FetchError, Risk, Solution};

use crate::gateway::RiskGateway;
use crate::observer::{StateObserver, SubscriptionId};

/// Snapshot of what the session knows about the store.
///
/// Collections are shared slices, so cloning a snapshot is cheap.
#[derive(Debug, Clone)]
pub struct RepositoryState {
    pub risks: Arc<[Risk]>,
    pub solutions: Arc<[Solution]>,
    pub loading: bool,
    /// One entry per collection whose fetch failed.
    pub errors: Vec<FetchError>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl RepositoryState {
    /// Empty collections, fetch pending.
    pub fn initial() -> Self {
        Self {
            risks: Arc::from(Vec::new()),
            solutions: Arc::from(Vec::new()),
            loading: true,
            errors: Vec::new(),
            loaded_at: None,
        }
    }

    /// User-visible error message, if any fetch failed.
    pub fn error(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn error_for(&self, collection: Collection) -> Option<&FetchError> {
        self.errors.iter().find(|e| e.collection == collection)
    }

    pub fn failed(&self, collection: Collection) -> bool {
        self.error_for(collection).is_some()
    }
}

/// Session-wide holder of the risk and solution collections.
///
/// Construct once, share behind an `Arc`, call [`RiskRepository::load`] once.
/// The collections are a read-only snapshot after that; there is no refetch,
/// retry or invalidation.
pub struct RiskRepository {
    gateway: Arc<dyn RiskGateway>,
    state: RwLock<RepositoryState>,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn StateObserver>)>>,
    next_subscription: AtomicU64,
    started: AtomicBool,
    torn_down: AtomicBool,
}

impl RiskRepository {
    pub fn new(gateway: Arc<dyn RiskGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(RepositoryState::initial()),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            started: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> RepositoryState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the one fetch cycle of this session.
    ///
    /// Both collections are requested concurrently. Each success replaces its
    /// (empty) collection, each failure is recorded, so a solutions failure
    /// still leaves risks visible. Later calls do not touch the gateway and
    /// return the current snapshot.
    pub async fn load(&self) -> RepositoryState {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Fetch already issued for this session");
            return self.snapshot();
        }

        info!("Fetching risks and solutions");
        let (risks, solutions) =
            tokio::join!(self.gateway.list_risks(), self.gateway.list_solutions());

        if self.torn_down.load(Ordering::SeqCst) {
            info!("Repository torn down before fetch completed, discarding results");
            return self.snapshot();
        }

        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            match risks {
                Ok(risks) => state.risks = Arc::from(risks),
                Err(e) => {
                    warn!(error = %e, "Risk fetch failed");
                    state.errors.push(e);
                }
            }
            match solutions {
                Ok(solutions) => state.solutions = Arc::from(solutions),
                Err(e) => {
                    warn!(error = %e, "Solution fetch failed");
                    state.errors.push(e);
                }
            }
            state.loading = false;
            state.loaded_at = Some(Utc::now());
            state.clone()
        };

        info!(
            risks = snapshot.risks.len(),
            solutions = snapshot.solutions.len(),
            failed = snapshot.errors.len(),
            "Fetch complete"
        );
        self.notify(&snapshot);
        snapshot
    }

    /// Register an observer for state changes. It is not called with the
    /// current state; read [`RiskRepository::snapshot`] for that.
    pub fn subscribe<O: StateObserver + 'static>(&self, observer: O) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        let observer: Arc<dyn StateObserver> = Arc::new(observer);
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    /// Tear the repository down. A fetch still in flight completes but its
    /// results are dropped and no observer is called.
    pub fn shutdown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    fn notify(&self, state: &RepositoryState) {
        // Snapshot the list so observers may (un)subscribe from inside a callback.
        let observers: Vec<Arc<dyn StateObserver>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in observers {
            observer.on_change(state);
        }
    }
}
