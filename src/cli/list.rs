//! Non-interactive listing of the configured models.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::ConfigStore;
use crate::model::{ModelRecord, Provider};

/// Prints every record in file order, one per line.
pub fn print_models(store: &ConfigStore) -> Result<()> {
    let doc = store.load().context("Failed to load config")?;
    let records = doc.custom_models(store.path())?;

    println!("{} {}", "Config:".bold(), store.path().display());
    if records.is_empty() {
        println!("{}", "No custom models configured.".dimmed());
        return Ok(());
    }
    println!();
    for (i, record) in records.iter().enumerate() {
        println!("{}", format_row(i, record));
    }
    Ok(())
}

fn format_row(index: usize, record: &ModelRecord) -> String {
    let badge = match record.provider {
        Provider::Anthropic => record.provider.badge().magenta(),
        Provider::OpenAI => record.provider.badge().green(),
        Provider::GenericChatCompletion => record.provider.badge().white(),
    };
    let mut row = format!("{:>3}. {} {}", index + 1, badge, record.label().bold());
    if !record.model.is_empty() {
        row.push_str(&format!(" {}", format!("({})", record.model).dimmed()));
    }
    row.push_str(&format!(" {}", format!("max {}", record.max_tokens).dimmed()));
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_has_position_name_and_model() {
        colored::control::set_override(false);
        let record = ModelRecord {
            model_display_name: "Sonnet".into(),
            model: "claude-sonnet".into(),
            provider: Provider::Anthropic,
            ..ModelRecord::default()
        };
        assert_eq!(
            format_row(0, &record),
            "  1. [A] Sonnet (claude-sonnet) max 8192"
        );
    }
}
