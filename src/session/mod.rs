//! Conversation session: identities, transcript, and run lifecycle.

pub mod store;

pub use store::{FileIdentityStore, IdentityStore, MemoryIdentityStore, StoredIdentities};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{CourierError, Result};
use crate::run::{PollerConfig, RunPoller, ToolCallDispatcher};
use crate::service::wire::{CreateAssistant, MessageRole, Run, RunStatus};
use crate::service::AgentService;
use crate::tools::ToolRegistry;

/// What the assistant should be when it has to be created.
#[derive(Debug, Clone)]
pub struct AssistantProfile {
    pub model: String,
    pub name: String,
    pub instructions: String,
}

struct ActiveRun {
    id: String,
    last_status: RunStatus,
}

/// Owns the assistant, thread, and run identities for one conversation,
/// plus the transcript reached through them.
///
/// A session is created once and reused across turns; the thread persists
/// across runs and at most one run is active on it at a time.
pub struct Session {
    service: Arc<dyn AgentService>,
    registry: Arc<ToolRegistry>,
    store: Arc<dyn IdentityStore>,
    profile: AssistantProfile,
    assistant_id: Option<String>,
    thread_id: Option<String>,
    active_run: Option<ActiveRun>,
}

impl Session {
    pub fn new(
        service: Arc<dyn AgentService>,
        registry: Arc<ToolRegistry>,
        store: Arc<dyn IdentityStore>,
        profile: AssistantProfile,
    ) -> Self {
        Self {
            service,
            registry,
            store,
            profile,
            assistant_id: None,
            thread_id: None,
            active_run: None,
        }
    }

    /// The assistant id, once ensured.
    pub fn assistant_id(&self) -> Option<&str> {
        self.assistant_id.as_deref()
    }

    /// The thread id, once ensured.
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// The active run id, while one is in flight.
    pub fn active_run_id(&self) -> Option<&str> {
        self.active_run.as_ref().map(|run| run.id.as_str())
    }

    /// Ensure the assistant definition exists, reusing a cached identity
    /// when the store has one. A stale cached id (the remote answers 404)
    /// falls back to creation; anything else propagates.
    pub async fn ensure_assistant(&mut self) -> Result<()> {
        if self.assistant_id.is_some() {
            return Ok(());
        }

        if let Some(cached) = self.store.load()?.and_then(|ids| ids.assistant_id) {
            match self.service.retrieve_assistant(&cached).await {
                Ok(assistant) => {
                    debug!(assistant_id = %assistant.id, "reusing cached assistant");
                    self.assistant_id = Some(assistant.id);
                    return Ok(());
                }
                Err(CourierError::Api { status: 404, .. }) => {
                    debug!(assistant_id = %cached, "cached assistant is gone, recreating");
                }
                Err(err) => return Err(err),
            }
        }

        let request = CreateAssistant {
            model: self.profile.model.clone(),
            name: self.profile.name.clone(),
            instructions: self.profile.instructions.clone(),
            tools: self.registry.declarations(),
        };
        let assistant = self.service.create_assistant(&request).await?;
        info!(assistant_id = %assistant.id, "created assistant");
        self.assistant_id = Some(assistant.id);
        self.persist_identities()?;
        Ok(())
    }

    /// Ensure the conversation thread exists, reusing a cached identity
    /// when the store has one.
    pub async fn ensure_thread(&mut self) -> Result<()> {
        if self.thread_id.is_some() {
            return Ok(());
        }

        if let Some(cached) = self.store.load()?.and_then(|ids| ids.thread_id) {
            match self.service.retrieve_thread(&cached).await {
                Ok(thread) => {
                    debug!(thread_id = %thread.id, "reusing cached thread");
                    self.thread_id = Some(thread.id);
                    return Ok(());
                }
                Err(CourierError::Api { status: 404, .. }) => {
                    debug!(thread_id = %cached, "cached thread is gone, recreating");
                }
                Err(err) => return Err(err),
            }
        }

        let thread = self.service.create_thread().await?;
        info!(thread_id = %thread.id, "created thread");
        self.thread_id = Some(thread.id);
        self.persist_identities()?;
        Ok(())
    }

    fn persist_identities(&self) -> Result<()> {
        self.store.save(&StoredIdentities::new(
            self.assistant_id.clone(),
            self.thread_id.clone(),
        ))
    }

    fn require_thread(&self) -> Result<&str> {
        self.thread_id.as_deref().ok_or_else(|| {
            CourierError::MalformedState("no thread; call ensure_thread first".to_string())
        })
    }

    /// Append a user message to the thread.
    pub async fn append_user_message(&mut self, text: &str) -> Result<()> {
        let thread_id = self.require_thread()?.to_string();
        let message = self
            .service
            .create_message(&thread_id, MessageRole::User, text)
            .await?;
        debug!(thread_id = %thread_id, message_id = %message.id, "appended user message");
        Ok(())
    }

    /// Start a run of the assistant against the thread.
    ///
    /// At most one non-terminal run may exist per thread; a second start is
    /// a contract violation and leaves the existing run untouched.
    pub async fn start_run(&mut self) -> Result<String> {
        if let Some(active) = &self.active_run {
            return Err(CourierError::RunInProgress {
                run_id: active.id.clone(),
            });
        }

        let thread_id = self.require_thread()?.to_string();
        let assistant_id = self.assistant_id.clone().ok_or_else(|| {
            CourierError::MalformedState("no assistant; call ensure_assistant first".to_string())
        })?;

        let run = self.service.create_run(&thread_id, &assistant_id).await?;
        info!(run_id = %run.id, thread_id = %thread_id, "started run");
        self.active_run = Some(ActiveRun {
            id: run.id.clone(),
            last_status: run.status,
        });
        Ok(run.id)
    }

    /// Fetch the active run's current state from the remote service.
    pub async fn refresh_run(&mut self) -> Result<Run> {
        let thread_id = self.require_thread()?.to_string();
        let run_id = self
            .active_run
            .as_ref()
            .map(|run| run.id.clone())
            .ok_or_else(|| {
                CourierError::MalformedState("no active run to poll".to_string())
            })?;

        let run = self.service.retrieve_run(&thread_id, &run_id).await?;
        if let Some(active) = &mut self.active_run {
            active.last_status = run.status;
        }
        Ok(run)
    }

    /// Submit the outputs for the active run's pending tool calls.
    ///
    /// Only valid while the run is paused in `requires_action`; the remote
    /// re-validates and either advances or re-emits the pause if outputs
    /// were incomplete.
    pub async fn submit_tool_outputs(
        &mut self,
        outputs: &[crate::service::wire::ToolOutput],
    ) -> Result<Run> {
        let thread_id = self.require_thread()?.to_string();
        let (run_id, last_status) = match &self.active_run {
            Some(active) => (active.id.clone(), active.last_status),
            None => {
                return Err(CourierError::MalformedState(
                    "no active run to submit tool outputs for".to_string(),
                ))
            }
        };
        if last_status != RunStatus::RequiresAction {
            return Err(CourierError::MalformedState(format!(
                "run {run_id} is `{last_status}`, not awaiting tool outputs"
            )));
        }

        let run = self
            .service
            .submit_tool_outputs(&thread_id, &run_id, outputs)
            .await?;
        debug!(run_id = %run.id, status = %run.status, "submitted tool outputs");
        if let Some(active) = &mut self.active_run {
            active.last_status = run.status;
        }
        Ok(run)
    }

    /// Forget the active run. Called on terminal transitions.
    pub fn clear_active_run(&mut self) {
        self.active_run = None;
    }

    /// Extract the summary: the newest transcript message, which after a
    /// correctly completed run is assistant-authored. Anything else is a
    /// protocol violation, never an empty-string answer.
    pub async fn summary(&self) -> Result<String> {
        let thread_id = self.require_thread()?;
        let messages = self.service.list_messages(thread_id).await?;
        match messages.first() {
            Some(message) if message.role == crate::service::wire::MessageRole::Assistant => {
                Ok(message.text())
            }
            _ => Err(CourierError::EmptyTranscript),
        }
    }

    /// One full conversation turn: append the topic as a user message,
    /// run the assistant, resolve tool pauses, return the summary.
    pub async fn submit_topic(&mut self, topic: &str) -> Result<String> {
        self.submit_topic_with(topic, PollerConfig::default(), &CancellationToken::new())
            .await
    }

    /// [`submit_topic`](Self::submit_topic) with explicit polling bounds
    /// and a caller-held cancellation token.
    pub async fn submit_topic_with(
        &mut self,
        topic: &str,
        config: PollerConfig,
        cancel: &CancellationToken,
    ) -> Result<String> {
        self.ensure_assistant().await?;
        self.ensure_thread().await?;
        self.append_user_message(topic).await?;
        self.start_run().await?;

        let dispatcher = ToolCallDispatcher::new(Arc::clone(&self.registry));
        let poller = RunPoller::new(config);
        poller.drive(self, &dispatcher, cancel).await
    }
}
