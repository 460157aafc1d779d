//! Prompt templates for the four attribute analyses.
//!
//! Each attribute gets its own narrow prompt and a fixed JSON response shape,
//! which keeps the parsers in [`crate::parser`] simple.

use crate::types::AverageEngagement;

/// System message sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an expert content analyst specializing in understanding creator personalities and content styles.
Your analysis must be:
- Objective and based only on the provided content
- Conservative in confidence (don't overstate certainty)
- Consistent in using the exact categories provided

Always respond in valid JSON format only. No explanations outside the JSON.";

#[must_use]
pub fn build_tone_prompt(content: &str) -> String {
    format!(
        r#"Analyze the following creator content and determine their PRIMARY content tone.

CONTENT TO ANALYZE:
"""
{content}
"""

Choose exactly ONE tone from these options:
- casual: Relaxed, conversational, friend-like communication
- professional: Formal, business-like, polished content
- educational: Teaching-focused, informative, tutorial-style
- satirical: Using humor to critique, mock, or comment on topics
- emotional: Heart-centered, personal stories, vulnerability
- political: Focused on political topics, advocacy, social issues
- inspirational: Motivational, uplifting, empowering messages
- entertainment: Pure fun, jokes, memes, viral content

Respond with this exact JSON structure:
{{
  "primary_tone": "one of the options above",
  "confidence": 0.0 to 1.0,
  "reasoning": "brief explanation (max 50 words)"
}}"#
    )
}

#[must_use]
pub fn build_humor_prompt(content: &str) -> String {
    format!(
        r#"Analyze the humor characteristics in this creator's content.

CONTENT TO ANALYZE:
"""
{content}
"""

Evaluate:
1. HUMOR LEVEL: How much humor is present? (0 = no humor, 10 = constant humor)
2. DARK HUMOR: Is there dark humor, morbid jokes, or taboo topic humor present?

Consider:
- Sarcasm and irony count as humor
- Self-deprecating jokes
- Wordplay and puns
- Absurdist content
- Controversial or edgy jokes (dark humor)

Respond with this exact JSON structure:
{{
  "humor_level": 0 to 10 (integer),
  "dark_humor_present": true or false,
  "confidence": 0.0 to 1.0,
  "reasoning": "brief explanation (max 50 words)"
}}"#
    )
}

/// Risk prompt. `comments_context` is shown verbatim as audience reactions.
#[must_use]
pub fn build_risk_prompt(content: &str, comments_context: &str) -> String {
    format!(
        r#"Analyze the risk tolerance level of this creator based on their content and audience reactions.

CREATOR'S CONTENT:
"""
{content}
"""

AUDIENCE COMMENTS/REACTIONS:
"""
{comments_context}
"""

Risk factors to consider:
- Controversial opinions or takes
- Strong language or profanity
- Sensitive topics (politics, religion, social issues)
- Provocative statements
- Brand-unsafe content
- Audience polarization in comments

Risk Tolerance Levels:
- LOW: Safe content, avoids controversy, brand-friendly, mainstream appeal
- MEDIUM: Occasional edge, some opinions, manageable controversy
- HIGH: Frequently controversial, strong opinions, polarizing, edgy content

Respond with this exact JSON structure:
{{
  "risk_tolerance": "low" or "medium" or "high",
  "confidence": 0.0 to 1.0,
  "reasoning": "brief explanation (max 50 words)"
}}"#
    )
}

/// Audience prompt. `engagement_context` comes from [`build_engagement_context`].
#[must_use]
pub fn build_audience_prompt(content: &str, engagement_context: &str) -> String {
    format!(
        r#"Determine the primary audience type for this creator based on their content style and engagement patterns.

CREATOR'S CONTENT:
"""
{content}
"""

ENGAGEMENT CONTEXT:
{engagement_context}

Audience Type Options:
- mass entertainment: Broad appeal, viral potential, general audience
- niche technical: Specialized knowledge, expert audience, technical depth
- opinion-driven: Commentary, reactions, hot takes, debate-oriented audience
- activist / political: Cause-focused, politically engaged, advocacy audience
- educational / learner-focused: Students, professionals learning, skill-seekers
- lifestyle / aspirational: Aesthetic, lifestyle, aspirational content consumers
- community-focused: Tight-knit following, personal connection, loyal fanbase

Choose the SINGLE most dominant audience type.

Respond with this exact JSON structure:
{{
  "audience_type": "one of the options above",
  "confidence": 0.0 to 1.0,
  "reasoning": "brief explanation (max 50 words)"
}}"#
    )
}

/// Summarize engagement for the audience prompt.
///
/// Ratios are relative to average likes, floored at 1 so a creator with no
/// likes does not divide by zero.
#[must_use]
pub fn build_engagement_context(avg: &AverageEngagement, total_posts: usize) -> String {
    let like_base = avg.likes.max(1.0);
    let comment_ratio = avg.comments / like_base * 100.0;
    let share_ratio = avg.shares / like_base * 100.0;

    format!(
        "\n- Total posts analyzed: {total_posts}\n- Average likes: {}\n- Average comments: {}\n- Average shares: {}\n- Comment-to-like ratio: {comment_ratio:.1}%\n- Share-to-like ratio: {share_ratio:.1}%\n",
        avg.likes.round(),
        avg.comments.round(),
        avg.shares.round(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_embedded_in_every_prompt() {
        let content = "[Post 1]: hello world";
        assert!(build_tone_prompt(content).contains("\"\"\"\n[Post 1]: hello world\n\"\"\""));
        assert!(build_humor_prompt(content).contains(content));
        assert!(build_risk_prompt(content, "- nice").contains(content));
        assert!(build_audience_prompt(content, "ctx").contains(content));
    }

    #[test]
    fn prompts_request_their_own_json_keys() {
        assert!(build_tone_prompt("x").contains("\"primary_tone\""));
        assert!(build_humor_prompt("x").contains("\"humor_level\""));
        assert!(build_humor_prompt("x").contains("\"dark_humor_present\""));
        assert!(build_risk_prompt("x", "y").contains("\"risk_tolerance\""));
        assert!(build_audience_prompt("x", "y").contains("\"audience_type\""));
    }

    #[test]
    fn tone_prompt_lists_every_tone() {
        let prompt = build_tone_prompt("x");
        for tone in cdna_core::ContentTone::ALL {
            assert!(prompt.contains(&format!("- {tone}:")), "missing {tone}");
        }
    }

    #[test]
    fn audience_prompt_lists_every_audience() {
        let prompt = build_audience_prompt("x", "y");
        for audience in cdna_core::AudienceType::ALL {
            assert!(
                prompt.contains(&format!("- {audience}:")),
                "missing {audience}"
            );
        }
    }

    #[test]
    fn risk_prompt_embeds_comments_context() {
        let prompt = build_risk_prompt("content", "- you went too far");
        assert!(prompt.contains("AUDIENCE COMMENTS/REACTIONS:\n\"\"\"\n- you went too far\n\"\"\""));
    }

    #[test]
    fn engagement_context_formats_rounded_values_and_ratios() {
        let avg = AverageEngagement {
            likes: 1000.4,
            comments: 50.6,
            shares: 12.0,
        };
        let ctx = build_engagement_context(&avg, 12);
        assert_eq!(
            ctx,
            "\n- Total posts analyzed: 12\n- Average likes: 1000\n- Average comments: 51\n- Average shares: 12\n- Comment-to-like ratio: 5.1%\n- Share-to-like ratio: 1.2%\n"
        );
    }

    #[test]
    fn engagement_context_floors_like_base_at_one() {
        let avg = AverageEngagement {
            likes: 0.0,
            comments: 3.0,
            shares: 0.0,
        };
        let ctx = build_engagement_context(&avg, 1);
        assert!(ctx.contains("- Comment-to-like ratio: 300.0%"));
        assert!(ctx.contains("- Share-to-like ratio: 0.0%"));
    }
}
