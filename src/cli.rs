//! CLI interface for trip-planner

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use crate::agents::AgentPool;
use crate::config::Config;
use crate::planner::bus::MessageBus;
use crate::planner::coordinator::Coordinator;
use crate::types::{DateRange, TripRequest};

#[derive(Parser)]
#[command(name = "trip-planner")]
#[command(about = "Multi-agent travel itinerary planner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a trip and print the itinerary
    Plan {
        /// Destination city
        destination: String,
        /// Origin city (default comes from config)
        #[arg(short, long)]
        origin: Option<String>,
        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the trip (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Total budget ceiling
        #[arg(short, long)]
        budget: Decimal,
        /// Number of travelers
        #[arg(short, long, default_value = "1")]
        travelers: u32,
        /// Trip vibe (e.g. "beach relaxation", "luxury getaway")
        #[arg(short, long, default_value = "comfortable travel")]
        vibe: String,
        /// Preference keywords (repeatable)
        #[arg(short, long)]
        prefer: Vec<String>,
        /// Override the collection window in seconds
        #[arg(short, long)]
        window: Option<u64>,
        /// Print the itinerary as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Configure the planner
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the collection window in seconds
        #[arg(long)]
        set_window: Option<u64>,
        /// Set the chat model for hotel and activity lookups
        #[arg(long)]
        set_model: Option<String>,
        /// Set the default origin city
        #[arg(long)]
        set_origin: Option<String>,
    },
    /// Start the planning server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            destination,
            origin,
            start,
            end,
            budget,
            travelers,
            vibe,
            prefer,
            window,
            json,
        } => {
            let config = Config::load()?;
            let request = TripRequest {
                origin: origin.unwrap_or_else(|| config.planner.default_origin.clone()),
                destination,
                dates: DateRange::new(start, end),
                budget_ceiling: budget,
                travelers,
                vibe,
                preferences: prefer,
            };
            let window = window.unwrap_or(config.planner.collect_window_secs);
            plan_trip(&config, &request, Duration::from_secs(window), json).await?;
        }
        Commands::Config {
            show,
            set_window,
            set_model,
            set_origin,
        } => {
            if let Some(secs) = set_window {
                crate::config::set_collect_window(secs)?;
            } else if let Some(model) = set_model {
                crate::config::set_llm_model(&model)?;
            } else if let Some(origin) = set_origin {
                crate::config::set_default_origin(&origin)?;
            } else if show {
                crate::config::show_config()?;
            } else {
                println!("Configuration options:");
                println!("  --show                 Display current configuration");
                println!("  --set-window <secs>    Set the result collection window");
                println!("  --set-model <id>       Set the chat model for lookups");
                println!("  --set-origin <city>    Set the default origin city");
                println!();
                println!("Provider credentials are read from the environment:");
                println!("  AMADEUS_CLIENT_ID / AMADEUS_CLIENT_SECRET  flight search");
                println!("  GROQ_API_KEY                               hotel and activity lookups");
                println!("  OPENWEATHER_API_KEY                        weather forecast");
            }
        }
        Commands::Serve { port, host } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            crate::server::run(config).await?;
        }
    }

    Ok(())
}

async fn plan_trip(
    config: &Config,
    request: &TripRequest,
    window: Duration,
    json: bool,
) -> Result<()> {
    let bus = Arc::new(MessageBus::new());
    let coordinator = Coordinator::new(bus.clone()).with_collect_window(window);
    let mut pool = AgentPool::spawn(bus, crate::agents::from_config(config)).await;

    let result = coordinator.plan(request).await;
    pool.shutdown().await;

    let itinerary = result.context("Planning failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&itinerary)?);
    } else {
        println!("{}", itinerary.render_report());
    }
    Ok(())
}
