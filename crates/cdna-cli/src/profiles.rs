//! `profiles` commands: read-only queries plus delete over stored profiles.

use clap::Subcommand;

/// Sub-commands available under `profiles`.
#[derive(Debug, Subcommand)]
pub enum ProfilesCommands {
    /// Print a stored profile as JSON
    Get {
        creator_id: String,
    },
    /// List stored profiles, most recently updated first
    List {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: i64,
        /// Profiles per page (max 100)
        #[arg(long, default_value = "20")]
        page_size: i64,
    },
    /// Delete a stored profile (history is kept)
    Delete {
        creator_id: String,
    },
    /// Show past scans for a creator, newest first
    History {
        creator_id: String,
        /// Maximum number of snapshots to show
        #[arg(long, default_value = "10")]
        limit: i64,
    },
}

/// Dispatch a `profiles` sub-command.
///
/// # Errors
///
/// Returns an error if the profile is missing (for `get`/`delete`) or the
/// database query fails.
pub(crate) async fn run_profiles(
    pool: &sqlx::PgPool,
    command: ProfilesCommands,
) -> anyhow::Result<()> {
    match command {
        ProfilesCommands::Get { creator_id } => {
            let profile = cdna_db::get_profile(pool, &creator_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("no profile stored for creator '{creator_id}'"))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfilesCommands::List { page, page_size } => {
            let result = cdna_db::list_profiles(pool, page, page_size).await?;
            if result.profiles.is_empty() {
                println!("no profiles found; run `scan --save` first");
                return Ok(());
            }
            println!(
                "{:<24}{:<15}{:<7}{:<8}{:<32}GENERATED",
                "CREATOR", "TONE", "HUMOR", "RISK", "AUDIENCE"
            );
            for profile in &result.profiles {
                let dna = &profile.creator_dna;
                println!(
                    "{:<24}{:<15}{:<7}{:<8}{:<32}{}",
                    truncate(&profile.creator_id, 22),
                    dna.primary_tone,
                    dna.humor_level,
                    dna.risk_tolerance,
                    dna.audience_type,
                    profile.generated_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!();
            println!(
                "{} of {} profile(s){}",
                result.profiles.len(),
                result.total,
                if result.has_more {
                    format!("; more with --page {}", page.max(1) + 1)
                } else {
                    String::new()
                }
            );
        }
        ProfilesCommands::Delete { creator_id } => {
            if !cdna_db::delete_profile(pool, &creator_id).await? {
                anyhow::bail!("no profile stored for creator '{creator_id}'");
            }
            println!("deleted profile for '{creator_id}'");
        }
        ProfilesCommands::History { creator_id, limit } => {
            let rows = cdna_db::list_profile_history(pool, &creator_id, limit).await?;
            if rows.is_empty() {
                println!("no history for creator '{creator_id}'");
                return Ok(());
            }
            println!(
                "{:<18}{:<15}{:<7}{:<8}AUDIENCE",
                "ANALYZED", "TONE", "HUMOR", "RISK"
            );
            for row in rows {
                let analyzed_at = row.analyzed_at.format("%Y-%m-%d %H:%M").to_string();
                let profile = row.into_profile()?;
                let dna = &profile.creator_dna;
                println!(
                    "{:<18}{:<15}{:<7}{:<8}{}",
                    analyzed_at,
                    dna.primary_tone,
                    dna.humor_level,
                    dna.risk_tolerance,
                    dna.audience_type
                );
            }
        }
    }
    Ok(())
}

/// Cut `value` to `max` characters, marking the cut with `...`.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("creator_1", 22), "creator_1");
    }

    #[test]
    fn truncate_marks_long_values() {
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
