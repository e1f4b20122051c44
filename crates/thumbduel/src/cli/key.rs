//! The `thumbduel key` command: operator API key override management.
//!
//! The override lives in the config TOML under `[gemini] api_key` and wins
//! over the GEMINI_API_KEY environment variable during resolution.

use clap::{Args, Subcommand};
use console::Style;
use dialoguer::Password;
use std::path::Path;
use thumbduel_core::Config;

/// Arguments for the `key` command.
#[derive(Args, Debug)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

/// Subcommands for API key management.
#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Store an operator override key (prompts if VALUE is omitted)
    Set {
        /// The key value; omit to enter it at a hidden prompt
        value: Option<String>,
    },

    /// Show whether an override is configured (masked)
    Show,

    /// Remove the stored override
    Clear,
}

/// Execute the key command.
pub async fn execute(args: KeyArgs) -> anyhow::Result<()> {
    match args.command {
        KeyCommand::Set { value } => {
            let key = match value {
                Some(key) => key,
                None => Password::new()
                    .with_prompt("Enter your Gemini API key")
                    .interact()?,
            };
            if key.trim().is_empty() {
                anyhow::bail!("Refusing to store an empty key. Use `thumbduel key clear` to remove the override.");
            }
            save_key_to_config(&Config::default_path(), Some(key.trim()))?;
            println!("Key saved to {}", Config::default_path().display());
        }

        KeyCommand::Show => {
            let config = Config::load()?;
            match config.api_key_override() {
                Some(key) => println!("Override configured: {}", mask(&key)),
                None => {
                    let dim = Style::new().dim();
                    println!("{}", dim.apply_to("No override configured."));
                    if std::env::var("GEMINI_API_KEY").is_ok() {
                        println!("GEMINI_API_KEY is set and will be used instead.");
                    }
                }
            }
        }

        KeyCommand::Clear => {
            save_key_to_config(&Config::default_path(), None)?;
            println!("Override removed.");
        }
    }

    Ok(())
}

/// Write or remove the override in the config file, preserving existing
/// comments and unrelated keys.
fn save_key_to_config(config_path: &Path, key: Option<&str>) -> anyhow::Result<()> {
    let content = if config_path.exists() {
        std::fs::read_to_string(config_path)?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = content.parse().unwrap_or_default();

    // Ensure [gemini] table exists
    if !doc.contains_key("gemini") {
        doc["gemini"] = toml_edit::Item::Table(toml_edit::Table::new());
    }

    match key {
        Some(key) => {
            doc["gemini"]["api_key"] = toml_edit::value(key);
        }
        None => {
            if let Some(table) = doc["gemini"].as_table_mut() {
                table.remove("api_key");
            }
        }
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, doc.to_string())?;

    Ok(())
}

/// Mask a key for display: first four characters, then stars.
fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(key.chars().count().saturating_sub(4)))
}
