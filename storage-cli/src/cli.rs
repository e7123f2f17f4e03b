//! CLI parser, config loading and command dispatch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::env;
use storage::{JsonResponse, StorageConfig, StorageProvider, StorageResponse, Template, User};

#[derive(Parser, Debug)]
#[command(name = "tstore")]
#[command(about = "Users and templates storage CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Connection string; overrides MONGODB_URI.
    #[arg(long, global = true)]
    pub uri: Option<String>,
    /// Database name; overrides MONGODB_DATABASE.
    #[arg(long, global = true)]
    pub database: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Entity arguments are JSON objects, e.g. `'{"team": ["a", "b"]}'`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Connect to the store and report the outcome.
    Ping,
    /// List users matching a partial user.
    GetUsers {
        #[arg(default_value = "{}")]
        query: String,
    },
    /// List templates matching a partial template.
    GetTemplates {
        #[arg(default_value = "{}")]
        query: String,
    },
    InsertUser { user: String },
    InsertTemplate { template: String },
    /// Set fields on one user matching the query.
    UpdateUser { query: String, update: String },
    /// Set fields on one template matching the query.
    UpdateTemplate { query: String, update: String },
    /// Remove one user matching the query.
    RemoveUser { query: String },
    /// Remove one template matching the query.
    RemoveTemplate { query: String },
}

/// Loads StorageConfig from env; `uri` and `database` override MONGODB_URI / MONGODB_DATABASE.
pub fn load_config(uri: Option<String>, database: Option<String>) -> Result<StorageConfig> {
    load_config_from(|key| env::var(key).ok(), uri, database)
}

/// Same as [`load_config`] over an arbitrary variable lookup.
pub fn load_config_from<F>(
    lookup: F,
    uri: Option<String>,
    database: Option<String>,
) -> Result<StorageConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = StorageConfig::from_lookup(|key| match (key, &uri) {
        ("MONGODB_URI", Some(uri)) => Some(uri.clone()),
        _ => lookup(key),
    })?;
    if let Some(database) = database {
        config.database = database;
    }
    Ok(config)
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).with_context(|| format!("Invalid {} JSON: {}", what, json))
}

fn render<T: Serialize>(response: StorageResponse<T>) -> Result<Value> {
    Ok(serde_json::to_value(JsonResponse::from(response))?)
}

/// Runs one command against an already connected provider and returns the envelope as JSON.
/// Only malformed arguments are errors; storage failures are part of the returned envelope.
pub async fn run_command<P>(provider: &P, command: &Commands) -> Result<Value>
where
    P: StorageProvider + ?Sized,
{
    match command {
        Commands::Ping => render(StorageResponse::success(true)),
        Commands::GetUsers { query } => {
            render(provider.get_users(&parse::<User>("user", query)?).await)
        }
        Commands::GetTemplates { query } => {
            render(provider.get_templates(&parse::<Template>("template", query)?).await)
        }
        Commands::InsertUser { user } => {
            render(provider.insert_user(&parse::<User>("user", user)?).await)
        }
        Commands::InsertTemplate { template } => render(
            provider
                .insert_template(&parse::<Template>("template", template)?)
                .await,
        ),
        Commands::UpdateUser { query, update } => {
            let query: User = parse("user", query)?;
            let update: User = parse("user update", update)?;
            render(provider.update_user(&query, &update).await)
        }
        Commands::UpdateTemplate { query, update } => {
            let query: Template = parse("template", query)?;
            let update: Template = parse("template update", update)?;
            render(provider.update_template(&query, &update).await)
        }
        Commands::RemoveUser { query } => {
            render(provider.remove_user(&parse::<User>("user", query)?).await)
        }
        Commands::RemoveTemplate { query } => {
            render(provider.remove_template(&parse::<Template>("template", query)?).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_users_default_query() {
        let cli = Cli::try_parse_from(["tstore", "get-users"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::GetUsers {
                query: "{}".to_string()
            }
        );
        assert!(cli.uri.is_none());
    }

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "tstore",
            "remove-template",
            r#"{"id":"t1"}"#,
            "--uri",
            "mongodb://db:27017",
            "--database",
            "cards",
        ])
        .unwrap();
        assert_eq!(cli.uri.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(cli.database.as_deref(), Some("cards"));
        assert_eq!(
            cli.command,
            Commands::RemoveTemplate {
                query: r#"{"id":"t1"}"#.to_string()
            }
        );
    }

    #[test]
    fn test_update_requires_two_arguments() {
        assert!(Cli::try_parse_from(["tstore", "update-user", "{}"]).is_err());
    }

    #[test]
    fn test_load_config_uri_override() {
        let env = |key: &str| match key {
            "MONGODB_URI" => Some("mongodb://env:27017".to_string()),
            "MONGODB_DATABASE" => Some("env-db".to_string()),
            _ => None,
        };
        let config = load_config_from(
            env,
            Some("mongodb://override:27017".to_string()),
            Some("cards".to_string()),
        )
        .unwrap();
        assert_eq!(config.uri, "mongodb://override:27017");
        assert_eq!(config.database, "cards");
        assert_eq!(config.options, storage::ConnectionOptions::default());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_config_without_overrides() {
        let env = |key: &str| match key {
            "MONGODB_URI" => Some("mongodb://env:27017".to_string()),
            "MONGODB_CONNECT_TIMEOUT_MS" => Some("1500".to_string()),
            _ => None,
        };
        let config = load_config_from(env, None, None).unwrap();
        assert_eq!(config.uri, "mongodb://env:27017");
        assert_eq!(config.database, storage::DEFAULT_DATABASE);
        assert_eq!(config.options.connect_timeout_ms, 1500);
        assert!(load_config_from(|_: &str| None, None, None).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(parse::<User>("user", "{not json").is_err());
        assert!(parse::<User>("user", r#"{"team": "a"}"#).is_err());
    }
}
