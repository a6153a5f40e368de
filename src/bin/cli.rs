//! NovaTrace CLI
//!
//! Command-line interface for NovaTrace shell operations:
//! - Resolve host paths to frame URLs
//! - Inspect the route table and origin allow-list
//! - Check a running shell's status
//! - Generate and validate config files

use clap::{Parser, Subcommand};
use novatrace::api::dto::{FrameResponse, MicrofrontendResponse};
use novatrace::config::{generate_default_config, Config};
use novatrace::frame::{Environment, RouteTable};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "novatrace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "NovaTrace microfrontend shell tools")]
#[command(long_about = "Inspect how the NovaTrace shell maps host routes to microfrontend frames.\nLocal commands read the same config file as the shell server.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Shell server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Config file (default: standard search locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the frame URL for a host path
    Resolve {
        /// Host path, e.g. /novatrace/status
        path: String,
        /// Environment (default: from config)
        #[arg(short, long)]
        env: Option<Environment>,
        /// Ask the running shell instead of resolving locally
        #[arg(long)]
        remote: bool,
    },

    /// List the route table
    Routes {
        /// Environment (default: from config)
        #[arg(short, long)]
        env: Option<Environment>,
    },

    /// List origins allowed to post navigation messages
    Origins {
        /// Environment (default: from config)
        #[arg(short, long)]
        env: Option<Environment>,
    },

    /// Show shell server status
    Status,

    /// Generate or validate config files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a default config file
    Init {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a config file
    Check {
        /// Path to config.toml
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Resolve { path, env, remote } => {
            if remote {
                let response = client
                    .get(format!(
                        "{}/api/v1/frame?path={}",
                        cli.api_url,
                        urlencoding::encode(&path)
                    ))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    eprintln!("Resolve failed ({}): {}", status, text);
                    std::process::exit(1);
                }

                let frame: FrameResponse = response.json().await?;
                print_frame(&frame, &cli.format)?;
                return Ok(());
            }

            let config = load_config(cli.config.as_ref())?;
            let table = config.route_table()?;
            let environment = env.unwrap_or(config.shell.environment);

            match table.lookup(&path) {
                Some(entry) => {
                    let frame = FrameResponse {
                        path: path.clone(),
                        microfrontend: entry.microfrontend.id.clone(),
                        sub_path: entry.sub_path.to_string(),
                        src: entry.microfrontend.frame_url(entry.sub_path, environment),
                        environment,
                    };
                    print_frame(&frame, &cli.format)?;
                }
                None => {
                    eprintln!("No microfrontend mounted at '{}' (shell shows not-found)", path);
                    std::process::exit(1);
                }
            }
        }

        Commands::Routes { env } => {
            let config = load_config(cli.config.as_ref())?;
            let table = config.route_table()?;
            let environment = env.unwrap_or(config.shell.environment);
            print_routes(&table, environment, &cli.format)?;
        }

        Commands::Origins { env } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(env) = env {
                config.shell.environment = env;
            }
            let table = config.route_table()?;
            let policy = config.origin_policy(&table)?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&policy)?);
            } else {
                println!("Navigation accepted from ({}):", config.shell.environment);
                for origin in policy.origins() {
                    println!("  {}", origin);
                }
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!(
                        "NovaTrace shell v{}",
                        health["version"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!("Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!(
                        "Environment: {}",
                        health["environment"].as_str().unwrap_or("unknown")
                    );

                    if let Some(bundles) = health["bundles"].as_array() {
                        println!();
                        println!("Bundles:");
                        for bundle in bundles {
                            let present = bundle["present"].as_bool().unwrap_or(false);
                            println!(
                                "  {:<12} {}",
                                bundle["id"].as_str().unwrap_or("-"),
                                if present { "ok" } else { "missing" }
                            );
                        }
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Shell returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to NovaTrace shell at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the shell server is running:");
                    eprintln!("  cargo run --bin novatrace");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { output } => {
                let content = generate_default_config();
                match output {
                    Some(path) => {
                        std::fs::write(&path, content)?;
                        println!("Wrote default config to {:?}", path);
                    }
                    None => print!("{}", content),
                }
            }
            ConfigAction::Check { path } => {
                let config = Config::load(&path)?;
                match config.validate() {
                    Ok(()) => {
                        let table = config.route_table()?;
                        println!(
                            "{:?}: ok ({} microfrontends, {})",
                            path,
                            table.entries().len(),
                            config.shell.environment
                        );
                    }
                    Err(e) => {
                        eprintln!("{:?}: {}", path, e);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    })
}

fn print_frame(frame: &FrameResponse, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(frame)?);
    } else {
        println!("{}", frame.src);
        println!(
            "  microfrontend: {} (sub-path {}, {})",
            frame.microfrontend, frame.sub_path, frame.environment
        );
    }
    Ok(())
}

fn print_routes(table: &RouteTable, environment: Environment, format: &str) -> anyhow::Result<()> {
    let entries: Vec<MicrofrontendResponse> = table
        .entries()
        .iter()
        .map(|entry| MicrofrontendResponse::from_entry(entry, environment))
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<12} {:<22} {}", "Frame", "Host path", format!("Source ({})", environment));
    println!("{}", "-".repeat(72));
    for entry in entries {
        for route in entry.routes {
            println!("{:<12} {:<22} {}", entry.id, route.host_path, route.src);
        }
    }
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
