//! Chat-completion backends.
//!
//! The scanner only depends on [`ChatCompletion`]; [`OpenAiClient`] is the
//! production implementation and tests substitute in-process stubs.

mod openai;
mod types;

use futures::future::BoxFuture;

use crate::error::LlmError;

pub use openai::OpenAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

/// Sampling temperature for attribute analysis.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Completion budget for attribute analysis.
pub const ANALYSIS_MAX_TOKENS: u32 = 500;

/// A model that turns a system message plus one user message into text.
///
/// Returns a boxed future so the trait stays object-safe and the scanner can
/// hold any backend as `Arc<dyn ChatCompletion>`.
pub trait ChatCompletion: Send + Sync {
    /// Run one completion and return the first choice's text.
    ///
    /// An empty string is a valid result (the model produced no content).
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> BoxFuture<'a, Result<String, LlmError>>;
}
