use std::collections::HashMap;
use std::time::Duration;

use cdna_core::{AppConfig, PostType};

/// Hard cap on `combined_text`, in characters (roughly 3,000 tokens).
pub const MAX_CONTENT_LENGTH: usize = 12_000;

/// Default bound on a single model call.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Mean engagement per post. Fractional, unlike the per-post counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageEngagement {
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
}

/// Bounded, normalized view of a creator's posts, built fresh per scan.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedContent {
    /// Post captions with non-blank text, in input order.
    pub all_captions: Vec<String>,
    /// Flattened comment samples with non-blank text, in input order.
    pub all_comments: Vec<String>,
    /// Labelled, normalized captions; never longer than the configured cap.
    pub combined_text: String,
    pub total_posts: usize,
    pub avg_engagement: AverageEngagement,
    /// Count per post type. All four types are always present.
    pub post_type_distribution: HashMap<PostType, usize>,
}

/// Tunables for a [`crate::CreatorDnaScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Character budget for `combined_text`.
    pub max_content_length: usize,
    /// Upper bound on each model call. Expiry falls back like any other failure.
    pub llm_timeout: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_content_length: MAX_CONTENT_LENGTH,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

impl ScannerConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            llm_timeout: Duration::from_secs(config.llm_timeout_secs),
            ..Self::default()
        }
    }
}
