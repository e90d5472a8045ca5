//! `dbretry info` – server version, privilege and feature support.

use anyhow::Result;
use dbretry_core::connection::{Feature, RetryableConnection, SqliteConnection};

pub async fn run_info(
    db: &RetryableConnection<'_, SqliteConnection>,
    only: &[Feature],
    json: bool,
) -> Result<()> {
    let superuser = db.is_superuser().await?;
    let features: Vec<(Feature, bool)> = selected_features(only)
        .into_iter()
        .map(|f| (f, db.feature_supported(f)))
        .collect();

    if json {
        let features: serde_json::Map<String, serde_json::Value> = features
            .iter()
            .map(|(f, ok)| (f.as_str().to_string(), serde_json::Value::Bool(*ok)))
            .collect();
        let report = serde_json::json!({
            "database_url": db.client().database_url(),
            "version": db.version().to_string(),
            "superuser": superuser,
            "max_attempts": db.policy().max_attempts(),
            "features": features,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("database:     {}", db.client().database_url());
    println!("version:      {}", db.version());
    println!("superuser:    {}", superuser);
    println!("max attempts: {}", db.policy().max_attempts());
    println!("{:<20} {:<10} {}", "FEATURE", "SINCE", "SUPPORTED");
    for (f, ok) in features {
        println!(
            "{:<20} {:<10} {}",
            f.as_str(),
            f.min_version().to_string(),
            if ok { "yes" } else { "no" }
        );
    }
    Ok(())
}

/// Features to report: the ones asked for, or all of them.
pub(crate) fn selected_features(only: &[Feature]) -> Vec<Feature> {
    if only.is_empty() {
        Feature::ALL.to_vec()
    } else {
        let mut picked = Vec::with_capacity(only.len());
        for f in only {
            if !picked.contains(f) {
                picked.push(*f);
            }
        }
        picked
    }
}
