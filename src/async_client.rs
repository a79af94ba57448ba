//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all dashboard operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! fetch units keep their own threads and the blocking reqwest client, so
//! nothing network-bound ever runs on a runtime worker.
//!
//! # Example
//!
//! ```no_run
//! use ticker_dashboard::AsyncDashboard;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dashboard = AsyncDashboard::builder().symbol("MSFT").build().await.unwrap();
//!
//!     // Resolves once all eight units are loaded or failed
//!     let snapshot = dashboard.activate().await.unwrap();
//!     println!("settled: {}", snapshot.is_settled());
//!
//!     println!("{}", dashboard.render().await.unwrap());
//!     dashboard.close().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::range::TradingRange;
use crate::state::DashboardSnapshot;
use crate::transport::Transport;
use crate::view::{Tab, ViewMode, ViewState};
use crate::{join_all, Dashboard, DashboardBuilder};

fn join_error(e: tokio::task::JoinError) -> DashboardError {
    DashboardError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboard`].
#[derive(Default)]
pub struct AsyncDashboardBuilder {
    inner: DashboardBuilder,
}

impl AsyncDashboardBuilder {
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(base_url);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.inner = self.inner.symbol(symbol);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = self.inner.transport(transport);
        self
    }

    /// Build the async dashboard.
    ///
    /// The blocking HTTP client is created on the blocking thread pool so it
    /// won't block the async event loop.
    pub async fn build(self) -> Result<AsyncDashboard> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let dashboard = inner.build()?;
            Ok(AsyncDashboard {
                inner: Arc::new(Mutex::new(dashboard)),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`Dashboard`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`Dashboard`] is
/// protected by a [`Mutex`] since activation and view changes need `&mut`.
/// Clones share the same dashboard.
#[derive(Clone)]
pub struct AsyncDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl AsyncDashboard {
    pub fn builder() -> AsyncDashboardBuilder {
        AsyncDashboardBuilder::default()
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Dashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = dashboard
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("Dashboard lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Start all eight fetches and wait until every unit has settled.
    ///
    /// The lock is released once the fetches are spawned, so teardown and
    /// snapshots go through while requests are still in flight.
    pub async fn activate(&self) -> Result<DashboardSnapshot> {
        let handles = self
            .run(|d| {
                d.activate()?;
                Ok(d.take_handles())
            })
            .await?;
        tokio::task::spawn_blocking(move || join_all(handles))
            .await
            .map_err(join_error)?;
        self.snapshot().await
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        self.run(|d| Ok(d.snapshot())).await
    }

    pub async fn view(&self) -> Result<ViewState> {
        self.run(|d| Ok(d.view())).await
    }

    pub async fn select_tab(&self, tab: Tab) -> Result<()> {
        self.run(move |d| {
            d.select_tab(tab);
            Ok(())
        })
        .await
    }

    pub async fn select_range(&self, range: TradingRange) -> Result<()> {
        self.run(move |d| {
            d.select_range(range);
            Ok(())
        })
        .await
    }

    pub async fn toggle_trends(&self) -> Result<ViewMode> {
        self.run(|d| Ok(d.toggle_trends())).await
    }

    pub async fn toggle_peaks(&self) -> Result<ViewMode> {
        self.run(|d| Ok(d.toggle_peaks())).await
    }

    pub async fn render(&self) -> Result<String> {
        self.run(|d| Ok(d.render())).await
    }

    pub async fn teardown(&self) -> Result<()> {
        self.run(|d| {
            d.teardown();
            Ok(())
        })
        .await
    }

    /// Tear down and drop the dashboard on the blocking pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let mut dashboard = self
                .inner
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("Dashboard lock poisoned".into()))?;
            dashboard.teardown();
            drop(dashboard);
            drop(self);
            Ok(())
        })
        .await
        .map_err(join_error)?
    }
}
