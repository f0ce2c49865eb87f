//! Trip Planner - Multi-agent travel itinerary planning library
//!
//! A coordinator fans a trip request out to specialist agents over an
//! in-process message bus:
//! - Flight search via Amadeus (with estimated fallback)
//! - Hotel and activity suggestions via a Groq-hosted chat model
//! - Budget allocation keyed on the trip vibe
//! - Weather forecast via OpenWeather
//!
//! Results are collected under a timeout and merged into a single
//! itinerary; roles that fail or miss the window are reported as missing.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trip_planner::agents::{self, AgentPool};
//! use trip_planner::config::Config;
//! use trip_planner::planner::bus::MessageBus;
//! use trip_planner::planner::coordinator::Coordinator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let bus = Arc::new(MessageBus::new());
//!     let coordinator = Coordinator::new(bus.clone());
//!     let _pool = AgentPool::spawn(bus, agents::from_config(&config)).await;
//!     let itinerary = coordinator.plan(&request).await?;
//!     println!("{}", itinerary.render_report());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod types;
pub mod error;
pub mod config;
pub mod planner;
pub mod providers;
pub mod agents;
pub mod server;
pub mod cli;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::PlanningError;
pub use types::{DateRange, TripRequest};

pub use planner::{
    bus::MessageBus,
    coordinator::{cancel_pair, Coordinator, PlanCancel},
    itinerary::Itinerary,
    roles::AgentRole,
};

pub use agents::{Agent, AgentPool};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Multi-agent travel planner", NAME, VERSION)
}
