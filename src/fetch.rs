//! Fetch-and-track units.
//!
//! A [`FetchUnit`] owns the state cell of one dashboard section. Activation
//! marks it pending on the caller's thread, then runs the request on a
//! dedicated thread and publishes exactly one terminal state. Units share
//! nothing but the [`Liveness`] token and the subscriber list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use crate::error::{DashboardError, Result};
use crate::state::{FetchState, Phase, Section, Transition};

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

/// Shared flag that late resolutions check before touching state.
///
/// Once revoked it stays revoked; a re-activation hands out a fresh token.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Fan-out of [`Transition`]s to every live subscriber.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Mutex<Vec<Sender<Transition>>>,
}

impl Notifier {
    pub fn subscribe(&self) -> Receiver<Transition> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Send to all subscribers, dropping those whose receiver is gone.
    pub fn notify(&self, transition: Transition) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(transition).is_ok());
    }
}

/// What a running unit needs besides its own cell.
#[derive(Debug, Clone)]
pub struct UnitContext {
    pub liveness: Liveness,
    pub notifier: Arc<Notifier>,
}

// ---------------------------------------------------------------------------
// FetchUnit
// ---------------------------------------------------------------------------

/// State cell of one section plus the logic that drives it.
///
/// Cloning yields another handle to the same cell.
#[derive(Debug)]
pub struct FetchUnit<T> {
    section: Section,
    state: Arc<RwLock<FetchState<T>>>,
    last_loaded: Arc<RwLock<Option<Arc<T>>>>,
}

impl<T> Clone for FetchUnit<T> {
    fn clone(&self) -> Self {
        Self {
            section: self.section,
            state: Arc::clone(&self.state),
            last_loaded: Arc::clone(&self.last_loaded),
        }
    }
}

impl<T: Send + Sync + 'static> FetchUnit<T> {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            state: Arc::new(RwLock::new(FetchState::Pending)),
            last_loaded: Arc::new(RwLock::new(None)),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn state(&self) -> FetchState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent successful payload, kept across later failures.
    pub fn last_loaded(&self) -> Option<Arc<T>> {
        self.last_loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mark the unit pending. Called before the request is issued.
    pub fn begin(&self, ctx: &UnitContext) {
        if !ctx.liveness.is_alive() {
            return;
        }
        self.publish(FetchState::Pending, ctx);
    }

    /// Publish the outcome of a request, unless the dashboard was torn down.
    ///
    /// Returns `false` when the outcome was discarded.
    pub fn resolve(&self, outcome: Result<T>, ctx: &UnitContext) -> bool {
        if !ctx.liveness.is_alive() {
            log::warn!(
                "Dropping late {} result after teardown",
                self.section.label()
            );
            return false;
        }
        match outcome {
            Ok(data) => self.publish(FetchState::Loaded(Arc::new(data)), ctx),
            Err(e) => {
                log::warn!("{} fetch failed: {}", self.section.label(), e);
                self.publish(FetchState::Failed(failure_message(self.section, &e)), ctx)
            }
        }
    }

    /// Mark pending, then run `fetch` on its own thread and publish the result.
    pub fn spawn<F>(&self, ctx: UnitContext, fetch: F) -> Result<JoinHandle<()>>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        self.begin(&ctx);
        let unit = self.clone();
        let handle = thread::Builder::new()
            .name(format!("fetch-{}", self.section.endpoint().name()))
            .spawn(move || {
                let outcome = fetch();
                unit.resolve(outcome, &ctx);
            })?;
        Ok(handle)
    }

    /// Wait out any publication that passed its liveness check before a
    /// revoke. Once this returns, a revoked context can no longer write.
    pub fn fence(&self) {
        drop(self.state.write().unwrap_or_else(PoisonError::into_inner));
    }

    fn publish(&self, next: FetchState<T>, ctx: &UnitContext) -> bool {
        let phase: Phase = next.phase();
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            // Teardown may have happened since the caller checked.
            if !ctx.liveness.is_alive() {
                return false;
            }
            if let FetchState::Loaded(data) = &next {
                *self
                    .last_loaded
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(data));
            }
            *state = next;
        }
        ctx.notifier.notify(Transition {
            section: self.section,
            phase,
        });
        true
    }
}

/// User-visible message for a failed unit.
///
/// A non-2xx answer shows the section's fixed literal; transport and
/// validation failures show the underlying error.
pub fn failure_message(section: Section, err: &DashboardError) -> String {
    match err {
        DashboardError::Status { .. } => section.failure_message().to_string(),
        other => other.to_string(),
    }
}
