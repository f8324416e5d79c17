//! Shared test helpers and scripted mock agent service.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use courier::error::{CourierError, Result};
use courier::service::wire::{
    Assistant, CreateAssistant, MessageContent, MessageRole, RequiredAction, Run, RunStatus,
    SubmitToolOutputs, Thread, ThreadMessage, ToolCallRequest, ToolOutput,
};
use courier::service::AgentService;

/// One scripted step of a run's lifecycle, consumed per status poll.
#[derive(Debug, Clone)]
pub enum Scripted {
    Status(RunStatus),
    RequiresAction(Vec<ToolCallRequest>),
}

/// In-memory agent service with a scripted run lifecycle.
///
/// Each `retrieve_run` consumes the next scripted step. A `RequiresAction`
/// step pins the run until a submission covers every pending call id;
/// partial submissions leave the run paused, matching the remote protocol.
pub struct MockAgentService {
    script: Mutex<VecDeque<Scripted>>,
    loop_final_status: Mutex<Option<RunStatus>>,
    pending: Mutex<Option<Vec<ToolCallRequest>>>,
    final_message: Mutex<Option<String>>,
    final_message_appended: Mutex<bool>,

    assistants: Mutex<HashMap<String, Assistant>>,
    threads: Mutex<HashMap<String, Vec<ThreadMessage>>>,

    pub submissions: Mutex<Vec<Vec<ToolOutput>>>,
    pub assistants_created: AtomicUsize,
    pub threads_created: AtomicUsize,
    pub runs_created: AtomicUsize,
    message_counter: AtomicUsize,
}

impl MockAgentService {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            loop_final_status: Mutex::new(None),
            pending: Mutex::new(None),
            final_message: Mutex::new(None),
            final_message_appended: Mutex::new(false),
            assistants: Mutex::new(HashMap::new()),
            threads: Mutex::new(HashMap::new()),
            submissions: Mutex::new(Vec::new()),
            assistants_created: AtomicUsize::new(0),
            threads_created: AtomicUsize::new(0),
            runs_created: AtomicUsize::new(0),
            message_counter: AtomicUsize::new(0),
        }
    }

    /// Queue the run lifecycle the service will report, in order.
    pub fn with_script(self, steps: Vec<Scripted>) -> Self {
        *self.script.lock().unwrap() = steps.into();
        self
    }

    /// Report `status` forever once the script is exhausted.
    pub fn looping(self, status: RunStatus) -> Self {
        *self.loop_final_status.lock().unwrap() = Some(status);
        self
    }

    /// The assistant message appended to the thread when the run completes.
    pub fn with_final_message(self, text: &str) -> Self {
        *self.final_message.lock().unwrap() = Some(text.to_string());
        self
    }

    /// Whether the run is still pinned on an unanswered tool-call batch.
    pub fn has_pending_action(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }

    fn run(&self, status: RunStatus, required_action: Option<RequiredAction>) -> Run {
        Run {
            id: "run_mock_1".to_string(),
            thread_id: "thread_mock_1".to_string(),
            assistant_id: "asst_mock_1".to_string(),
            status,
            required_action,
        }
    }

    fn paused_run(&self, calls: Vec<ToolCallRequest>) -> Run {
        self.run(
            RunStatus::RequiresAction,
            Some(RequiredAction {
                kind: "submit_tool_outputs".to_string(),
                submit_tool_outputs: SubmitToolOutputs { tool_calls: calls },
            }),
        )
    }

    fn append_final_message(&self, thread_id: &str) {
        let mut appended = self.final_message_appended.lock().unwrap();
        if *appended {
            return;
        }
        if let Some(text) = self.final_message.lock().unwrap().clone() {
            let id = format!("msg_{}", self.message_counter.fetch_add(1, Ordering::SeqCst));
            self.threads
                .lock()
                .unwrap()
                .entry(thread_id.to_string())
                .or_default()
                .push(ThreadMessage {
                    id,
                    role: MessageRole::Assistant,
                    content: vec![MessageContent::text(text)],
                });
        }
        *appended = true;
    }
}

#[async_trait]
impl AgentService for MockAgentService {
    async fn create_assistant(&self, request: &CreateAssistant) -> Result<Assistant> {
        let n = self.assistants_created.fetch_add(1, Ordering::SeqCst) + 1;
        let assistant = Assistant {
            id: format!("asst_mock_{n}"),
            name: Some(request.name.clone()),
            model: request.model.clone(),
            instructions: Some(request.instructions.clone()),
        };
        self.assistants
            .lock()
            .unwrap()
            .insert(assistant.id.clone(), assistant.clone());
        Ok(assistant)
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.assistants
            .lock()
            .unwrap()
            .get(assistant_id)
            .cloned()
            .ok_or_else(|| CourierError::api(404, format!("no assistant {assistant_id}")))
    }

    async fn create_thread(&self) -> Result<Thread> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("thread_mock_{n}");
        self.threads.lock().unwrap().insert(id.clone(), Vec::new());
        Ok(Thread { id })
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        if self.threads.lock().unwrap().contains_key(thread_id) {
            Ok(Thread {
                id: thread_id.to_string(),
            })
        } else {
            Err(CourierError::api(404, format!("no thread {thread_id}")))
        }
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        let id = format!("msg_{}", self.message_counter.fetch_add(1, Ordering::SeqCst));
        let message = ThreadMessage {
            id,
            role,
            content: vec![MessageContent::text(content)],
        };
        self.threads
            .lock()
            .unwrap()
            .entry(thread_id.to_string())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let mut messages = self
            .threads
            .lock()
            .unwrap()
            .get(thread_id)
            .cloned()
            .unwrap_or_default();
        messages.reverse(); // newest first, as the remote endpoint reports
        Ok(messages)
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run> {
        self.runs_created.fetch_add(1, Ordering::SeqCst);
        Ok(self.run(RunStatus::Queued, None))
    }

    async fn retrieve_run(&self, thread_id: &str, _run_id: &str) -> Result<Run> {
        if let Some(calls) = self.pending.lock().unwrap().clone() {
            return Ok(self.paused_run(calls));
        }

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Scripted::Status(status)) => {
                if status == RunStatus::Completed {
                    self.append_final_message(thread_id);
                }
                Ok(self.run(status, None))
            }
            Some(Scripted::RequiresAction(calls)) => {
                *self.pending.lock().unwrap() = Some(calls.clone());
                Ok(self.paused_run(calls))
            }
            None => {
                if let Some(status) = *self.loop_final_status.lock().unwrap() {
                    return Ok(self.run(status, None));
                }
                self.append_final_message(thread_id);
                Ok(self.run(RunStatus::Completed, None))
            }
        }
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        self.submissions.lock().unwrap().push(outputs.to_vec());

        let mut pending = self.pending.lock().unwrap();
        let Some(calls) = pending.clone() else {
            return Err(CourierError::api(400, "run has no required action"));
        };

        let answered: HashSet<&str> = outputs.iter().map(|o| o.tool_call_id.as_str()).collect();
        let fully_matched = calls.iter().all(|call| answered.contains(call.id.as_str()));

        if fully_matched {
            *pending = None;
            Ok(self.run(RunStatus::InProgress, None))
        } else {
            // Incomplete outputs: the remote re-emits the pause.
            Ok(self.paused_run(calls))
        }
    }
}
