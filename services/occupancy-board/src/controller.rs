//! Poll loop controller: fetch, diff, render, reschedule

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::api::{ApiClient, ApiRule, CallOptions};
use crate::config::PollingConfig;
use crate::frontend::{Frontend, LoadingGuard};
use crate::model::{StatusItem, StatusPayload};
use crate::render::render;
use crate::snapshot::SnapshotCache;

/// Where the controller is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
    Rendering,
    Degraded,
    Scheduled,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Idle => write!(f, "Idle"),
            PollState::Fetching => write!(f, "Fetching"),
            PollState::Rendering => write!(f, "Rendering"),
            PollState::Degraded => write!(f, "Degraded"),
            PollState::Scheduled => write!(f, "Scheduled"),
        }
    }
}

/// What one fetch cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Payload changed; this many entries were applied
    Rendered(usize),
    /// Payload matched the snapshot; nothing re-rendered
    Unchanged,
    /// Fetch failed or the server reported failure
    Degraded,
}

/// Drives the status endpoint. Owns the snapshot cache for its context.
///
/// All cycle methods take `&mut self`, so one controller never has two
/// fetches in flight.
pub struct PollController {
    api: Arc<ApiClient>,
    rule: ApiRule,
    cache: SnapshotCache,
    state: PollState,
    interval: Duration,
    render_delay: Duration,
}

impl fmt::Debug for PollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollController")
            .field("rule", &self.rule)
            .field("state", &self.state)
            .field("interval", &self.interval)
            .finish()
    }
}

impl PollController {
    pub fn new(api: Arc<ApiClient>, rule: ApiRule, polling: &PollingConfig) -> Self {
        Self {
            api,
            rule,
            cache: SnapshotCache::new(),
            state: PollState::Idle,
            interval: polling.interval,
            render_delay: polling.render_delay,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn snapshot(&self) -> &SnapshotCache {
        &self.cache
    }

    fn frontend(&self) -> &Arc<dyn Frontend> {
        self.api.frontend()
    }

    /// Single-shot refresh: one cycle, then back to `Idle` with nothing armed
    pub async fn run_once(&mut self) -> CycleOutcome {
        let outcome = self.cycle().await;
        self.state = PollState::Idle;
        outcome
    }

    /// One `Fetching -> {Rendering | Degraded} -> Scheduled` pass. Never fails;
    /// every error ends in degraded display mode.
    pub async fn cycle(&mut self) -> CycleOutcome {
        self.state = PollState::Fetching;

        let outcome = match self.fetch_items().await {
            Ok((raw, items)) => {
                self.frontend().set_valid_display_mode(true);
                if self.cache.has_changed(&raw) {
                    self.cache.commit(&raw);
                    self.state = PollState::Rendering;
                    CycleOutcome::Rendered(self.apply(&items).await)
                } else {
                    tracing::info!("Status unchanged since last render, skipping");
                    CycleOutcome::Unchanged
                }
            }
            Err(e) => {
                self.state = PollState::Degraded;
                self.frontend().set_valid_display_mode(false);
                tracing::error!("Status poll failed: {}", e);
                CycleOutcome::Degraded
            }
        };

        self.state = PollState::Scheduled;
        outcome
    }

    async fn fetch_items(&self) -> crate::Result<(Value, Vec<StatusItem>)> {
        let raw: Value = self
            .api
            .call(&self.rule, None, CallOptions::silent())
            .await?;
        let payload: StatusPayload = serde_json::from_value(raw.clone()).map_err(|e| {
            crate::BoardError::Payload(format!("malformed status payload: {}", e))
        })?;
        let items = payload.into_items()?;
        Ok((raw, items))
    }

    async fn apply(&self, items: &[StatusItem]) -> usize {
        let _loading = LoadingGuard::show(self.frontend());
        if !self.render_delay.is_zero() {
            tokio::time::sleep(self.render_delay).await;
        }
        let entries = render(items);
        self.frontend().apply_status(&entries);
        tracing::debug!("Applied {} status entries", entries.len());
        entries.len()
    }

    /// Continuous polling on a background task.
    ///
    /// The delay timer is armed only after a cycle completes, so cycles never
    /// overlap. Stopping only prevents the next cycle; an in-flight one still
    /// finishes and is applied. Dropping the handle stops the loop too.
    pub fn spawn(self) -> PollHandle {
        let cancel = CancellationToken::new();
        let refresh = Arc::new(Notify::new());

        let task = tokio::spawn(run_loop(self, cancel.clone(), Arc::clone(&refresh)));

        PollHandle {
            _stop_on_drop: cancel.clone().drop_guard(),
            cancel,
            refresh,
            task,
        }
    }
}

async fn run_loop(
    mut controller: PollController,
    cancel: CancellationToken,
    refresh: Arc<Notify>,
) -> PollController {
    tracing::info!("Status polling started (every {:?})", controller.interval);

    loop {
        let outcome = controller.cycle().await;
        tracing::debug!("Poll cycle finished: {:?}", outcome);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Status polling cancelled");
                break;
            }
            _ = refresh.notified() => {
                tracing::debug!("Manual refresh requested");
            }
            _ = tokio::time::sleep(controller.interval) => {}
        }
    }

    controller.state = PollState::Idle;
    tracing::info!("Status polling stopped");
    controller
}

/// Cancel handle for a spawned poll loop
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    _stop_on_drop: DropGuard,
    refresh: Arc<Notify>,
    task: JoinHandle<PollController>,
}

impl PollHandle {
    /// Fetch now instead of waiting out the timer. Queued behind any cycle
    /// already in flight.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop scheduling and hand back the controller once any in-flight
    /// cycle has finished
    pub async fn stop(self) -> crate::Result<PollController> {
        self.cancel.cancel();
        self.task
            .await
            .map_err(|e| crate::BoardError::Task(e.to_string()))
    }
}
