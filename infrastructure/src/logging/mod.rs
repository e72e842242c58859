//! Structured conversation logging.
//!
//! Provides [`JsonlConversationLogger`], a JSONL file writer implementing
//! the [`ConversationLogger`](infraflow_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
