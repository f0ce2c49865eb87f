//! Trip Planner - Multi-agent travel itinerary planner
//!
//! Fans a trip request out to specialist agents (flights, hotels,
//! activities, budget, weather) and merges their results into one plan.

use trip_planner::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=info for debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    cli::run().await
}
