//! Reasoning gateway providers

pub mod openai;

pub use openai::OpenAiReasoningGateway;
