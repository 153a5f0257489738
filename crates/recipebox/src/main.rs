//! `recipebox` - CLI for the recipe service
//!
//! This binary runs the HTTP service and offers a few commands for looking
//! at the backing store and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use recipebox::cli::{Cli, Command, ConfigCommand, ListCommand, StatusCommand};
use recipebox::{init_logging, server, Config, FileStore, RecipeStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let mut config = Config::extract_from(cli.config.clone()).context("loading configuration")?;
    if let Command::Serve(serve_cmd) = &cli.command {
        serve_cmd.apply(&mut config);
    }
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Serve(_) => server::serve(&config).await?,
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await?,
        Command::Status(status_cmd) => handle_status(&config, &status_cmd).await?,
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let recipes = FileStore::new(config.data_path()).read().await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes stored in {}", config.data_path().display());
        return Ok(());
    }

    for recipe in &recipes {
        println!("[{}] {} ({} min)", recipe.id, recipe.title, recipe.cook_time);
        for ingredient in &recipe.ingredients {
            match ingredient.as_str() {
                Some(text) => println!("    - {text}"),
                None => println!("    - {ingredient}"),
            }
        }
        println!("    {}", recipe.instructions);
    }
    Ok(())
}

async fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let stats = FileStore::new(config.data_path()).stats().await;

    if cmd.json {
        let status = serde_json::json!({
            "listen": format!("{}:{}", config.server.host, config.server.port),
            "strict_reads": config.storage.strict_reads,
            "store": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("recipebox status");
        println!("----------------");
        println!("Listen:        {}:{}", config.server.host, config.server.port);
        println!("Data file:     {}", stats.path.display());
        println!("Exists:        {}", stats.exists);
        println!("Recipes:       {}", stats.total_recipes);
        println!("Size (bytes):  {}", stats.size_bytes);
        println!("Strict reads:  {}", config.storage.strict_reads);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!("  CORS:               {}", config.server.cors_enabled);
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!("  Strict reads:       {}", config.storage.strict_reads);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
