//! Command-line interface for the pizza API simulator.
//!
//! Without a subcommand the binary starts the HTTP server. Subcommands:
//! - `routes` - Print the route precedence table
//! - `fixtures` - Print the seeded users, franchises and menu as JSON
//! - `config check` - Validate the configuration file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::api::dispatch::routes;
use crate::config::Config;
use crate::db::{menu, Simulator, User};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "pizza-mock")]
#[command(author, version, about = "In-memory simulator of the pizza storefront API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pizza-mock.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Override the listen port
    #[arg(short, long, env = "PIZZA_MOCK_PORT")]
    pub port: Option<u16>,

    /// Subcommand to run (if none, starts the server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the route precedence table, highest priority first
    Routes,

    /// Print the seeded fixture state as JSON
    Fixtures,

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

/// Run a CLI command
pub fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Routes) => cmd_routes(),
        Some(Commands::Fixtures) => cmd_fixtures(cli),
        Some(Commands::Config(ConfigCommands::Check)) => cmd_config_check(cli),
        None => {
            // No subcommand means start the server - this is handled in main.rs
            Ok(())
        }
    }
}

/// One line per route, numbered in match order.
pub fn route_table() -> Vec<String> {
    routes()
        .iter()
        .enumerate()
        .map(|(i, route)| format!("{:>2}. {}", i + 1, route.describe()))
        .collect()
}

/// Seeded state as a JSON document.
pub fn fixtures_json(config: &Config) -> Value {
    let sim = Simulator::new(&config.simulator);
    let users: Vec<&User> = sim.users.iter().collect();

    json!({
        "users": users,
        "franchises": sim.catalog.franchises(),
        "menu": menu(),
        "next_franchise_id": sim.catalog.next_franchise_id(),
        "next_store_id": sim.catalog.next_store_id(),
    })
}

fn cmd_routes() -> Result<()> {
    println!("Route precedence (first match wins, anything else passes through):");
    println!();
    for line in route_table() {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_fixtures(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let output = serde_json::to_string_pretty(&fixtures_json(&config))
        .context("Failed to encode fixtures")?;
    println!("{}", output);
    Ok(())
}

fn cmd_config_check(cli: &Cli) -> Result<()> {
    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("A default configuration will be used when starting the server.");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("Server:");
            println!("  Listen:       {}", config.bind_addr());
            println!(
                "  CORS:         {}",
                if config.server.cors { "Enabled" } else { "Disabled" }
            );
            println!();
            println!("Logging:");
            println!("  Level:        {}", config.logging.level);
            println!();
            println!("Simulator:");
            println!("  Auth token:   {}", config.simulator.token);
            println!("  Order token:  {}", config.simulator.order_token);
            println!("  Order id:     {}", config.simulator.order_id);
            println!(
                "  RNG seed:     {}",
                config
                    .simulator
                    .rng_seed
                    .map_or_else(|| "random".to_string(), |s| s.to_string())
            );
            println!(
                "  Pass-through: {}",
                config
                    .simulator
                    .passthrough_url
                    .as_deref()
                    .unwrap_or("disabled (unmocked requests get 501)")
            );
            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid:");
            println!();
            println!("  {:#}", e);
            anyhow::bail!("Configuration validation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["pizza-mock", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::Check))
        ));

        let cli = Cli::try_parse_from(["pizza-mock", "--port", "4010"]).unwrap();
        assert_eq!(cli.port, Some(4010));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_route_table_lists_every_route() {
        let table = route_table();
        assert_eq!(table.len(), routes().len());
        assert!(table[0].contains("register"));
        assert!(table.iter().any(|l| l.contains("pass-through")));
    }

    #[test]
    fn test_fixtures_json() {
        let fixtures = fixtures_json(&Config::default());
        assert_eq!(fixtures["users"].as_array().unwrap().len(), 12);
        assert_eq!(fixtures["users"][1]["email"], "a@jwt.com");
        assert_eq!(fixtures["franchises"].as_array().unwrap().len(), 4);
        assert_eq!(fixtures["next_store_id"], 8);
    }
}
