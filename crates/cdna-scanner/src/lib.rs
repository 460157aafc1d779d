//! Creator DNA scanner.
//!
//! Aggregates a creator's posts into a bounded text payload, asks a chat
//! model four narrow questions about it (tone, humor, risk tolerance,
//! audience), and normalizes the answers into a [`cdna_core::CreatorDnaProfile`].
//! Model failures degrade individual attributes to low-confidence defaults
//! rather than failing the scan.

pub mod aggregator;
pub mod analyzers;
pub mod confidence;
pub mod error;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod types;

mod keywords;

pub use aggregator::{aggregate_content, build_comments_context, normalize_text};
pub use confidence::apply_data_confidence_penalty;
pub use error::{LlmError, ParseError, ScannerError, ScannerErrorCode};
pub use llm::{ChatCompletion, OpenAiClient};
pub use pipeline::CreatorDnaScanner;
pub use types::{AggregatedContent, AverageEngagement, ScannerConfig, MAX_CONTENT_LENGTH};
