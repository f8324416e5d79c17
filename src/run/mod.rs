//! Run orchestration: tool-call dispatch and the polling state machine.

pub mod dispatch;
pub mod poller;

pub use dispatch::ToolCallDispatcher;
pub use poller::{PollerConfig, RunPoller};
