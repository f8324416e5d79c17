//! CLI argument definitions for Courier.

use clap::Parser;

/// Courier news summarizer CLI
#[derive(Parser, Debug)]
#[command(name = "courier", version, about = "Summarize recent news on a topic")]
pub struct Cli {
    /// Topic to fetch and summarize news for
    pub topic: String,

    /// Model backing the assistant
    #[arg(short, long, default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Give up after this many seconds of polling
    #[arg(long, default_value = "300")]
    pub timeout_secs: u64,

    /// Ignore cached assistant/thread identities and start fresh
    #[arg(long)]
    pub fresh: bool,
}
