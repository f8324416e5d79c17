//! Polling state machine that drives a run to resolution.

use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{CourierError, Result};
use crate::service::wire::RunStatus;
use crate::session::Session;

use super::dispatch::ToolCallDispatcher;

/// Poll cadence and bounds for [`RunPoller`].
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed wait between status queries.
    pub interval: Duration,
    /// Wall-clock bound on the whole run; `None` polls until a terminal
    /// status arrives.
    pub max_wall_clock: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_wall_clock: Some(Duration::from_secs(300)),
        }
    }
}

/// Drives a started run to a terminal outcome.
///
/// The loop is cooperative: it suspends only at the inter-poll waits, where
/// it also observes the cancellation token. Exactly one run is active per
/// thread, so there is no useful work to interleave until it resolves.
pub struct RunPoller {
    config: PollerConfig,
}

impl RunPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    /// Poll the session's active run until it completes, returning the
    /// extracted summary.
    ///
    /// `requires_action` pauses are resolved through the dispatcher and the
    /// resulting outputs submitted before polling resumes. Terminal failure
    /// statuses, the wall-clock bound, and cancellation all abort the turn
    /// with a typed error; none are retried here, retry is a caller
    /// decision.
    pub async fn drive(
        &self,
        session: &mut Session,
        dispatcher: &ToolCallDispatcher,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let started = Instant::now();

        loop {
            if let Some(max) = self.config.max_wall_clock {
                if started.elapsed() >= max {
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    warn!(elapsed_ms, "run exceeded local deadline, treating as expired");
                    session.clear_active_run();
                    return Err(CourierError::Timeout { elapsed_ms });
                }
            }

            let run = session.refresh_run().await?;
            debug!(run_id = %run.id, status = %run.status, "poll");

            match run.status {
                RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling => {}
                RunStatus::RequiresAction => {
                    let calls = run.pending_tool_calls();
                    if calls.is_empty() {
                        return Err(CourierError::MalformedState(
                            "requires_action with an empty tool-call batch".to_string(),
                        ));
                    }
                    info!(run_id = %run.id, count = calls.len(), "run paused on tool calls");
                    let outputs = dispatcher.dispatch(calls).await?;
                    session.submit_tool_outputs(&outputs).await?;
                }
                RunStatus::Completed => {
                    info!(run_id = %run.id, "run completed");
                    session.clear_active_run();
                    return session.summary().await;
                }
                RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                    warn!(run_id = %run.id, status = %run.status, "run ended in terminal failure");
                    session.clear_active_run();
                    return Err(CourierError::RemoteTerminal { status: run.status });
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("poll loop cancelled by caller; remote run may still be live");
                    session.clear_active_run();
                    return Err(CourierError::Cancelled);
                }
                _ = time::sleep(self.config.interval) => {}
            }
        }
    }
}
