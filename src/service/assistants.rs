//! REST implementation of [`AgentService`] against the Assistants v2 protocol.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::CourierConfig;
use crate::error::{CourierError, Result};

use super::http::{assistants_headers, shared_client, status_to_error};
use super::wire::{
    Assistant, CreateAssistant, ListMessages, MessageRole, Run, Thread, ThreadMessage,
    ToolOutput,
};
use super::AgentService;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for an Assistants-style agent endpoint.
#[derive(Debug)]
pub struct HttpAgentService {
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct CreateMessageBody<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Serialize)]
struct CreateRunBody<'a> {
    assistant_id: &'a str,
}

#[derive(Serialize)]
struct SubmitToolOutputsBody<'a> {
    tool_outputs: &'a [ToolOutput],
}

impl HttpAgentService {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Build from config; requires an `agent` API key.
    pub fn from_config(config: &CourierConfig) -> Result<Self> {
        let api_key = config.get_api_key("agent").ok_or_else(|| {
            CourierError::Configuration(
                "missing agent API key (set OPENAI_API_KEY or AGENT_API_KEY)".to_string(),
            )
        })?;
        Ok(Self::new(api_key, config.get_base_url("agent")))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = shared_client()
            .post(&url)
            .headers(assistants_headers(&self.api_key))
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = shared_client()
            .get(&url)
            .headers(assistants_headers(&self.api_key))
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T>(resp: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl AgentService for HttpAgentService {
    async fn create_assistant(&self, request: &CreateAssistant) -> Result<Assistant> {
        debug!(name = %request.name, model = %request.model, "create assistant");
        self.post("/assistants", request).await
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        debug!(assistant_id, "retrieve assistant");
        self.get(&format!("/assistants/{assistant_id}")).await
    }

    async fn create_thread(&self) -> Result<Thread> {
        debug!("create thread");
        self.post("/threads", &serde_json::json!({})).await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        debug!(thread_id, "retrieve thread");
        self.get(&format!("/threads/{thread_id}")).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        debug!(thread_id, "append message");
        self.post(
            &format!("/threads/{thread_id}/messages"),
            &CreateMessageBody { role, content },
        )
        .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        debug!(thread_id, "list messages");
        let list: ListMessages = self.get(&format!("/threads/{thread_id}/messages")).await?;
        Ok(list.data)
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        debug!(thread_id, assistant_id, "create run");
        self.post(
            &format!("/threads/{thread_id}/runs"),
            &CreateRunBody { assistant_id },
        )
        .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        debug!(thread_id, run_id, count = outputs.len(), "submit tool outputs");
        self.post(
            &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            &SubmitToolOutputsBody {
                tool_outputs: outputs,
            },
        )
        .await
    }
}
