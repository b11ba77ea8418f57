// ── Dashboard engine ──
//
// Owns the status and summary loops, the force-test state machine, and
// the settings fields. Every change is rendered through the `UiAdapter`;
// every request goes through the `IntercheckClient`.

mod settings;

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use intercheck_api::{IntercheckClient, TransportConfig};

use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::force::{ForceController, ForceRefusal, ForceState};
use crate::model::{SettingField, StatusSet, SummarySnapshot};
use crate::schedule::{LoopHandle, Trigger, drive};
use crate::ui::{UiAdapter, messages, render_status, render_summary};

/// Result of a user's force-test request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceOutcome {
    /// The server scheduled a test; the status loop was accelerated.
    Forcing,
    /// The server answered but could not schedule a test.
    Rejected,
    /// The guard refused to send a request.
    Refused(ForceRefusal),
    /// The request failed in transit; a status poll was requested.
    Failed,
}

// ── Dashboard ────────────────────────────────────────────────────

/// The main entry point for front ends.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Create with
/// [`new()`](Self::new), then [`start()`](Self::start) the background
/// loops. User actions ([`force()`](Self::force),
/// [`field_changed()`](Self::field_changed), ...) can be called at any
/// time, with or without the loops running.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    client: IntercheckClient,
    ui: Arc<dyn UiAdapter>,
    state: Mutex<EngineState>,
    status_loop: LoopHandle,
    summary_loop: LoopHandle,
    /// Taken by `start()`; present until the loops are spawned.
    status_rx: Mutex<Option<mpsc::UnboundedReceiver<Trigger>>>,
    summary_rx: Mutex<Option<mpsc::UnboundedReceiver<Trigger>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    /// Pending clear of the settings acknowledgment.
    ack_clear: Mutex<Option<JoinHandle<()>>>,
}

#[derive(Debug, Default)]
struct EngineState {
    last_status: StatusSet,
    polls_dispatched: u64,
    last_applied_poll: u64,
    force: ForceController,
    summary: Option<SummarySnapshot>,
    fields: Vec<SettingField>,
}

impl EngineState {
    fn field_mut(&mut self, name: &str) -> Result<&mut SettingField, CoreError> {
        self.fields
            .iter_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| CoreError::UnknownField {
                name: name.to_owned(),
            })
    }
}

impl Dashboard {
    /// Create a dashboard and its HTTP client. Does NOT start polling.
    pub fn new(config: DashboardConfig, ui: Arc<dyn UiAdapter>) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = IntercheckClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client, ui))
    }

    /// Create a dashboard around an existing client.
    pub fn with_client(
        config: DashboardConfig,
        client: IntercheckClient,
        ui: Arc<dyn UiAdapter>,
    ) -> Self {
        let (status_loop, status_rx) = LoopHandle::channel("status");
        let (summary_loop, summary_rx) = LoopHandle::channel("summary");
        let fields = config
            .fields
            .iter()
            .map(|spec| SettingField::new(spec.name.clone(), spec.kind))
            .collect();

        Self {
            inner: Arc::new(DashboardInner {
                config,
                client,
                ui,
                state: Mutex::new(EngineState {
                    fields,
                    ..EngineState::default()
                }),
                status_loop,
                summary_loop,
                status_rx: Mutex::new(Some(status_rx)),
                summary_rx: Mutex::new(Some(summary_rx)),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
                ack_clear: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// The HTTP client, for requests outside the engine (log downloads).
    pub fn client(&self) -> &IntercheckClient {
        &self.inner.client
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the status and summary loops. Both run immediately, then
    /// reschedule themselves after each completed run.
    ///
    /// Calling this twice is a no-op; a stopped dashboard cannot be
    /// restarted.
    pub async fn start(&self) {
        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.status_rx.lock().await.take() {
            let dashboard = self.clone();
            let period = self.inner.config.status_interval;
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(drive("status", period, rx, cancel, move || {
                let dashboard = dashboard.clone();
                async move {
                    dashboard.poll_status().await;
                }
            })));
        }

        if let Some(rx) = self.inner.summary_rx.lock().await.take() {
            let dashboard = self.clone();
            let period = self.inner.config.summary_interval;
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(drive("summary", period, rx, cancel, move || {
                let dashboard = dashboard.clone();
                async move {
                    // Failures are rendered and logged inside.
                    let _ = dashboard.refresh_summary().await;
                }
            })));
        }

        info!(server = %self.inner.config.url, "dashboard started");
    }

    /// Stop both loops and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        if let Some(clear) = self.inner.ack_clear.lock().await.take() {
            clear.abort();
        }

        debug!("dashboard stopped");
    }

    /// Ask the status loop to poll now, cancelling its pending timer.
    pub fn request_status_poll(&self) {
        self.inner.status_loop.run_now();
    }

    /// Ask the summary loop to refresh now ("refresh now" link).
    pub fn request_summary_refresh(&self) {
        self.inner.summary_loop.run_now();
    }

    // ── Status poller ────────────────────────────────────────────

    /// Run one status poll and render it.
    ///
    /// Transport and parse failures are rendered as an empty status set
    /// ("cannot connect") and never returned as errors.
    pub async fn poll_status(&self) -> StatusSet {
        let seq = {
            let mut state = self.inner.state.lock().await;
            state.polls_dispatched += 1;
            state.polls_dispatched
        };

        let status = match self.inner.client.get_status().await {
            Ok(resp) => StatusSet::from(resp),
            Err(e) => {
                warn!(error = %e, "status poll failed");
                StatusSet::empty()
            }
        };

        let released = {
            let mut guard = self.inner.state.lock().await;
            let state = &mut *guard;
            if seq < state.last_applied_poll {
                debug!(seq, "discarding stale status poll");
                return status;
            }
            state.last_applied_poll = seq;
            state.last_status = status.clone();
            state.force.observe(&status, seq)
        };

        render_status(self.inner.ui.as_ref(), &status);
        if released {
            info!("forced speed test picked up");
            self.inner.ui.set_forcing_affordance(false);
        }
        status
    }

    // ── Force-test controller ────────────────────────────────────

    /// Ask the server to run a speed test now.
    pub async fn force(&self) -> ForceOutcome {
        {
            let mut guard = self.inner.state.lock().await;
            let state = &mut *guard;
            if let Err(refusal) = state.force.try_begin(&state.last_status) {
                debug!(%refusal, "force request refused");
                return ForceOutcome::Refused(refusal);
            }
        }

        info!("forcing speed test");
        let result = self.inner.client.force_test().await;

        let mut state = self.inner.state.lock().await;
        match result {
            Ok(resp) if resp.status => {
                let polls = state.polls_dispatched;
                state.force.accept(polls);
                drop(state);

                self.inner.ui.set_forcing_affordance(true);
                self.inner
                    .status_loop
                    .run_after(self.inner.config.force_poll_interval);
                ForceOutcome::Forcing
            }
            Ok(_) => {
                state.force.reject();
                drop(state);

                warn!("server could not schedule a speed test");
                self.inner
                    .ui
                    .set_status_message(messages::FORCE_REJECTED, true);
                ForceOutcome::Rejected
            }
            Err(e) => {
                state.force.fail();
                drop(state);

                warn!(error = %e, "force request failed");
                self.inner.status_loop.run_now();
                ForceOutcome::Failed
            }
        }
    }

    // ── Summary refresher ────────────────────────────────────────

    /// Fetch and render the summary, replacing the previous snapshot.
    ///
    /// On failure the summary area shows an error and a status poll is
    /// requested to re-check connectivity.
    pub async fn refresh_summary(&self) -> Result<SummarySnapshot, CoreError> {
        match self.inner.client.get_summary().await {
            Ok(resp) => {
                let snapshot = SummarySnapshot::from(resp);
                let updated_at = chrono::Local::now().format("%H:%M:%S").to_string();
                render_summary(self.inner.ui.as_ref(), &snapshot, &updated_at);
                self.inner.state.lock().await.summary = Some(snapshot.clone());
                debug!(%updated_at, "summary refreshed");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "summary refresh failed");
                self.inner.ui.show_summary_error(messages::SUMMARY_FAILED);
                self.inner.status_loop.run_now();
                Err(e.into())
            }
        }
    }

    // ── Snapshots ────────────────────────────────────────────────

    pub async fn force_state(&self) -> ForceState {
        self.inner.state.lock().await.force.state()
    }

    /// The most recently applied status set.
    pub async fn last_status(&self) -> StatusSet {
        self.inner.state.lock().await.last_status.clone()
    }

    pub async fn summary(&self) -> Option<SummarySnapshot> {
        self.inner.state.lock().await.summary.clone()
    }
}
