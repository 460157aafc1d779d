//! `scan` command: run the scanner against a JSON file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use cdna_core::AppConfig;
use cdna_scanner::{CreatorDnaScanner, OpenAiClient, ScannerConfig, ScannerError};

/// Scan the creator in `input` and print the profile as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the model client
/// cannot be built, the scan fails, or `save` is set and storage fails.
/// `DATABASE_URL` is only needed with `save`.
pub(crate) async fn run_scan(config: &AppConfig, input: &Path, save: bool) -> anyhow::Result<()> {
    // Fail before any model calls when the profile could not be stored anyway.
    if save {
        config.require_database_url()?;
    }

    let raw = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let llm = OpenAiClient::from_config(config)?;
    let scanner = CreatorDnaScanner::new(Arc::new(llm), ScannerConfig::from_app_config(config));

    let profile = scanner
        .scan_json(body)
        .await
        .map_err(|e| anyhow::anyhow!(describe_scan_error(&e)))?;

    if save {
        let pool = cdna_db::connect_pool_from_config(config).await?;
        cdna_db::save_profile(&pool, &profile).await?;
        cdna_db::record_profile_history(&pool, &profile).await?;
        tracing::info!(creator_id = %profile.creator_id, "profile saved");
    }

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// One-line summary plus any structured details.
pub(crate) fn describe_scan_error(error: &ScannerError) -> String {
    match &error.details {
        Some(details) => format!("{error}\n{details:#}"),
        None => error.to_string(),
    }
}
