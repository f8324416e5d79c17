//! Courier: run orchestration for Assistants-style agent services.
//!
//! Drives a single agent run from submission to completion: append the
//! user's request to a durable thread, start a run, poll its status, answer
//! any tool calls the agent pauses on, and extract the final summary.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use courier::config::CourierConfig;
//! use courier::news::{news_tool, NewsClient};
//! use courier::service::HttpAgentService;
//! use courier::session::{AssistantProfile, MemoryIdentityStore, Session};
//! use courier::tools::ToolRegistry;
//!
//! # async fn example() -> courier::error::Result<()> {
//! let config = CourierConfig::from_env();
//! let mut registry = ToolRegistry::new();
//! registry.register(news_tool(Arc::new(NewsClient::from_config(&config)?)));
//!
//! let mut session = Session::new(
//!     Arc::new(HttpAgentService::from_config(&config)?),
//!     Arc::new(registry),
//!     Arc::new(MemoryIdentityStore::new()),
//!     AssistantProfile {
//!         model: "gpt-3.5-turbo".to_string(),
//!         name: "News Summarizer".to_string(),
//!         instructions: "Summarize news articles fetched for the user's topic.".to_string(),
//!     },
//! );
//! let summary = session.submit_topic("bitcoin").await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod news;
pub mod prelude;
pub mod run;
pub mod service;
pub mod session;
pub mod tools;

#[cfg(feature = "cli")]
pub mod cli;
