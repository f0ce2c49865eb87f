//! Flight agent
//!
//! Searches Amadeus flight offers for the route. When the provider is
//! not configured, errors out or finds nothing, the agent falls back to
//! estimated fares rather than failing the whole plan.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::agents::Agent;
use crate::planner::roles::AgentRole;
use crate::planner::task::{
    AgentResult, AgentTask, DataSource, FlightOption, FlightTask, RolePayload, TaskSpec,
};
use crate::providers::AmadeusClient;

/// City name to IATA code table for the supported region
const IATA_CODES: &[(&str, &str)] = &[
    ("mumbai", "BOM"),
    ("delhi", "DEL"),
    ("bangalore", "BLR"),
    ("goa", "GOI"),
    ("manali", "KUU"),
    ("jaipur", "JAI"),
    ("kolkata", "CCU"),
    ("chennai", "MAA"),
    ("hyderabad", "HYD"),
    ("pune", "PNQ"),
    ("kochi", "COK"),
    ("ahmedabad", "AMD"),
];

/// Resolve a city name to an IATA code, falling back to the first three
/// letters uppercased
pub fn iata_code(city: &str) -> String {
    let lower = city.trim().to_lowercase();
    IATA_CODES
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| lower.chars().take(3).collect::<String>().to_uppercase())
}

pub struct FlightAgent {
    provider: Option<AmadeusClient>,
}

impl FlightAgent {
    pub fn new(provider: Option<AmadeusClient>) -> Self {
        Self { provider }
    }

    async fn search(&self, spec: &FlightTask) -> Vec<FlightOption> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };
        let per_person_budget = spec.fare_budget / Decimal::from(spec.travelers.max(1));
        match provider
            .search_flights(
                &iata_code(&spec.origin),
                &iata_code(&spec.destination),
                spec.dates.start,
                spec.travelers,
                per_person_budget,
            )
            .await
        {
            Ok(flights) => flights.into_iter().take(3).collect(),
            Err(e) => {
                warn!(error = %e, "flight provider search failed");
                Vec::new()
            }
        }
    }

    /// Estimated fares for when no live offer is available: roughly 30%
    /// of the per-person fare budget, two carriers
    fn estimated(&self, spec: &FlightTask) -> Vec<FlightOption> {
        let per_person = spec.fare_budget / Decimal::from(spec.travelers.max(1));
        let base = per_person * dec!(0.3);
        let route = format!(
            "{} -> {}",
            iata_code(&spec.origin),
            iata_code(&spec.destination)
        );
        vec![
            FlightOption {
                airline: "Air India".to_string(),
                flight_number: "AI101".to_string(),
                route: route.clone(),
                departure_time: "08:00".to_string(),
                arrival_time: "10:00".to_string(),
                duration: "2h".to_string(),
                cabin_class: "Economy".to_string(),
                price: base,
                stops: 0,
                source: DataSource::Estimated,
            },
            FlightOption {
                airline: "IndiGo".to_string(),
                flight_number: "6E205".to_string(),
                route,
                departure_time: "14:00".to_string(),
                arrival_time: "16:00".to_string(),
                duration: "2h".to_string(),
                cabin_class: "Economy".to_string(),
                price: base * dec!(0.9),
                stops: 0,
                source: DataSource::Estimated,
            },
        ]
    }
}

#[async_trait]
impl Agent for FlightAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Flight
    }

    async fn handle(&self, task: &AgentTask) -> AgentResult {
        let TaskSpec::Flight(spec) = &task.spec else {
            return AgentResult::failure(task.request_id, self.role(), "expected a flight task");
        };
        let mut flights = self.search(spec).await;
        if flights.is_empty() {
            flights = self.estimated(spec);
        }
        AgentResult::success(task.request_id, RolePayload::Flights(flights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateRange, TripRequest};
    use uuid::Uuid;

    fn task() -> AgentTask {
        let request = TripRequest {
            origin: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            dates: DateRange::new(
                "2026-11-23".parse().unwrap(),
                "2026-11-27".parse().unwrap(),
            ),
            budget_ceiling: dec!(80000),
            travelers: 2,
            vibe: "comfortable travel".to_string(),
            preferences: vec![],
        };
        AgentTask::project(Uuid::new_v4(), AgentRole::Flight, "results:x", &request)
    }

    #[test]
    fn iata_lookup_and_fallback() {
        assert_eq!(iata_code("Mumbai"), "BOM");
        assert_eq!(iata_code("GOA"), "GOI");
        assert_eq!(iata_code("Leh"), "LEH");
    }

    #[tokio::test]
    async fn unconfigured_provider_returns_estimates() {
        let agent = FlightAgent::new(None);
        let result = agent.handle(&task()).await;
        match result.outcome {
            crate::planner::task::ResultOutcome::Success(RolePayload::Flights(flights)) => {
                assert_eq!(flights.len(), 2);
                assert!(flights.iter().all(|f| f.source == DataSource::Estimated));
                // 25% flight share of 80000 over 2 travelers, 30% estimate
                assert_eq!(flights[0].price, dec!(3000));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_spec_is_a_failure() {
        let agent = FlightAgent::new(None);
        let mut t = task();
        t.spec = TaskSpec::Weather(crate::planner::task::WeatherTask {
            destination: "Goa".to_string(),
            dates: DateRange::new(
                "2026-11-23".parse().unwrap(),
                "2026-11-27".parse().unwrap(),
            ),
        });
        assert!(!agent.handle(&t).await.is_success());
    }
}
