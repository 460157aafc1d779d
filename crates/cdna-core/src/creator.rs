//! Scan input: a creator and the posts submitted for analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Reel,
    Image,
    Video,
    Text,
}

impl PostType {
    pub const ALL: [PostType; 4] = [
        PostType::Reel,
        PostType::Image,
        PostType::Video,
        PostType::Text,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Reel => "reel",
            PostType::Image => "image",
            PostType::Video => "video",
            PostType::Text => "text",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw engagement counters for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEngagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// One unit of creator content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorPost {
    pub content: String,
    pub post_type: PostType,
    pub engagement: PostEngagement,
    pub comments_sample: Vec<String>,
    pub posted_at: DateTime<Utc>,
}

/// Input envelope for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorData {
    pub creator_id: String,
    pub posts: Vec<CreatorPost>,
}
