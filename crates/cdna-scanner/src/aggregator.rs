//! Content aggregation: turns raw posts into a bounded analysis payload.

use std::collections::HashMap;
use std::sync::LazyLock;

use cdna_core::{CreatorData, CreatorPost, PostType};
use regex::Regex;

use crate::types::{AggregatedContent, AverageEngagement};

/// Default character budget for [`build_comments_context`].
pub const DEFAULT_COMMENTS_CONTEXT_LENGTH: usize = 2_000;

/// Maximum number of comments sampled into a comments context.
const COMMENT_SAMPLE_SIZE: usize = 20;

/// Length of the `\n\n` separator written after every caption.
const TRAILING_SEPARATOR_LEN: usize = 2;

/// Characters reserved per comment for its `- ` bullet and newline.
const COMMENT_BULLET_ALLOWANCE: usize = 5;

const NO_COMMENTS: &str = "No comments available for analysis.";
const NO_MEANINGFUL_COMMENTS: &str = "No meaningful comments available.";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Build the analysis payload for one scan.
///
/// Pure and deterministic: identical input always yields identical output,
/// including the order and truncation point of `combined_text`.
#[must_use]
pub fn aggregate_content(data: &CreatorData, max_content_length: usize) -> AggregatedContent {
    let posts = &data.posts;

    let all_captions: Vec<String> = posts
        .iter()
        .map(|p| p.content.clone())
        .filter(|c| !c.trim().is_empty())
        .collect();

    let all_comments: Vec<String> = posts
        .iter()
        .flat_map(|p| p.comments_sample.iter())
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect();

    let combined_text = build_combined_text(&all_captions, max_content_length);

    AggregatedContent {
        all_captions,
        all_comments,
        combined_text,
        total_posts: posts.len(),
        avg_engagement: average_engagement(posts),
        post_type_distribution: post_type_distribution(posts),
    }
}

fn average_engagement(posts: &[CreatorPost]) -> AverageEngagement {
    if posts.is_empty() {
        return AverageEngagement::default();
    }

    let (likes, comments, shares) = posts.iter().fold((0u64, 0u64, 0u64), |acc, p| {
        (
            acc.0.saturating_add(p.engagement.likes),
            acc.1.saturating_add(p.engagement.comments),
            acc.2.saturating_add(p.engagement.shares),
        )
    });

    #[allow(clippy::cast_precision_loss)]
    let n = posts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    AverageEngagement {
        likes: likes as f64 / n,
        comments: comments as f64 / n,
        shares: shares as f64 / n,
    }
}

fn post_type_distribution(posts: &[CreatorPost]) -> HashMap<PostType, usize> {
    let mut distribution: HashMap<PostType, usize> =
        PostType::ALL.into_iter().map(|t| (t, 0)).collect();
    for post in posts {
        *distribution.entry(post.post_type).or_insert(0) += 1;
    }
    distribution
}

/// Concatenate normalized captions, longest first, within `max_length` chars.
///
/// Each caption is labelled `[Post N]:` where `N` is its 1-based position in
/// the length-sorted order. A caption that does not fit is skipped and the
/// next (shorter) one is tried.
fn build_combined_text(captions: &[String], max_length: usize) -> String {
    let mut sorted: Vec<&str> = captions.iter().map(String::as_str).collect();
    // Stable: equal-length captions keep input order.
    sorted.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));

    let mut combined = String::new();
    let mut combined_len = 0usize;

    for (i, caption) in sorted.iter().enumerate() {
        if combined_len >= max_length {
            break;
        }

        let entry = format!("[Post {}]: {}\n\n", i + 1, normalize_text(caption));
        let entry_len = entry.chars().count();
        // The trailing blank line of the last entry is trimmed off at the end.
        if combined_len + entry_len - TRAILING_SEPARATOR_LEN > max_length {
            continue;
        }

        combined.push_str(&entry);
        combined_len += entry_len;
    }

    combined.trim().to_string()
}

/// Normalize free text before it is shown to the model.
///
/// - URLs become `[LINK]`
/// - whitespace runs collapse to one space
/// - a supplementary-plane symbol (emoji) repeated 3+ times in a row is cut to 2
/// - leading/trailing whitespace is removed
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let without_links = URL_RE.replace_all(text, "[LINK]");
    let collapsed = without_links.split_whitespace().collect::<Vec<_>>().join(" ");
    collapse_repeated_emoji(&collapsed).trim().to_string()
}

fn collapse_repeated_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run > 2 && u32::from(c) > 0xFFFF {
            continue;
        }
        out.push(c);
    }

    out
}

/// Build a bounded, bulleted comments context.
///
/// Samples up to 20 comments spread evenly across the whole list so the
/// context covers early and late comments alike.
#[must_use]
pub fn build_comments_context(comments: &[String], max_length: usize) -> String {
    if comments.is_empty() {
        return NO_COMMENTS.to_string();
    }

    let sample_size = COMMENT_SAMPLE_SIZE.min(comments.len());
    let mut context = String::new();
    let mut context_len = 0usize;

    for comment in sample_comments(comments, sample_size) {
        let normalized = normalize_text(comment);
        let normalized_len = normalized.chars().count();
        if context_len + normalized_len + COMMENT_BULLET_ALLOWANCE <= max_length {
            context.push_str("- ");
            context.push_str(&normalized);
            context.push('\n');
            context_len += normalized_len + 3;
        }
    }

    let trimmed = context.trim();
    if trimmed.is_empty() {
        NO_MEANINGFUL_COMMENTS.to_string()
    } else {
        trimmed.to_string()
    }
}

fn sample_comments(comments: &[String], sample_size: usize) -> Vec<&String> {
    if comments.len() <= sample_size {
        return comments.iter().collect();
    }

    let step = comments.len() / sample_size;
    (0..sample_size)
        .map(|i| &comments[(i * step).min(comments.len() - 1)])
        .collect()
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
