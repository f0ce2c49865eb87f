//! Agent tasks and results
//!
//! An [`AgentTask`] is a trip request projected down to one role's
//! concern: the flight agent never sees hotel budgets and vice versa.
//! Results come back as tagged variants keyed by role and correlated to
//! the originating request by its id.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::planner::budget::{strategy_for_vibe, BudgetBreakdown};
use crate::planner::roles::AgentRole;
use crate::types::{DateRange, TripRequest};

/// Where a payload's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Fetched from the live provider API
    Live,
    /// Synthesized fallback when the provider was unavailable or empty
    Estimated,
}

/// One bookable flight option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub flight_number: String,
    pub route: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub cabin_class: String,
    /// Fare per traveler
    pub price: Decimal,
    pub stops: u32,
    pub source: DataSource,
}

/// One hotel option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub price_per_night: Decimal,
    pub rating: f32,
    pub location: String,
    pub amenities: Vec<String>,
}

/// One suggested activity, pinned to a trip day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOption {
    /// 1-based day of the trip
    pub day: u32,
    pub title: String,
    pub description: String,
    pub estimated_cost: Decimal,
}

/// Forecast for one trip day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub summary: String,
    pub high_c: f32,
    pub low_c: f32,
}

/// Success payload, shaped by role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolePayload {
    Flights(Vec<FlightOption>),
    Hotels(Vec<HotelOption>),
    Activities(Vec<ActivityOption>),
    Budget(BudgetBreakdown),
    Weather(Vec<WeatherDay>),
}

impl RolePayload {
    pub fn role(&self) -> AgentRole {
        match self {
            RolePayload::Flights(_) => AgentRole::Flight,
            RolePayload::Hotels(_) => AgentRole::Hotel,
            RolePayload::Activities(_) => AgentRole::Activity,
            RolePayload::Budget(_) => AgentRole::Budget,
            RolePayload::Weather(_) => AgentRole::Weather,
        }
    }
}

/// Per-role slice of the trip request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSpec {
    Flight(FlightTask),
    Hotel(HotelTask),
    Activity(ActivityTask),
    Budget(BudgetTask),
    Weather(WeatherTask),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightTask {
    pub origin: String,
    pub destination: String,
    pub dates: DateRange,
    pub travelers: u32,
    /// Total fare budget for all travelers
    pub fare_budget: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelTask {
    pub destination: String,
    pub dates: DateRange,
    pub travelers: u32,
    pub nightly_budget: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTask {
    pub destination: String,
    pub days: u32,
    pub travelers: u32,
    pub vibe: String,
    pub preferences: Vec<String>,
    pub activity_budget: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTask {
    pub ceiling: Decimal,
    pub vibe: String,
    pub travelers: u32,
    pub duration_days: u32,
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherTask {
    pub destination: String,
    pub dates: DateRange,
}

/// A task dispatched to one role agent. Owned by the coordinator until
/// published, then by the agent for the duration of processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTask {
    pub request_id: Uuid,
    pub role: AgentRole,
    /// Topic the result must be published to
    pub reply_to: String,
    pub spec: TaskSpec,
}

impl AgentTask {
    /// Project a trip request down to one role's concern.
    ///
    /// Dispatch-time budget slices come from the vibe allocation strategy,
    /// the same table the budget agent reports from, so the fan-out never
    /// has to wait on the budget result.
    pub fn project(
        request_id: Uuid,
        role: AgentRole,
        reply_to: impl Into<String>,
        request: &TripRequest,
    ) -> Self {
        let strategy = strategy_for_vibe(&request.vibe);
        let nights = Decimal::from(request.dates.nights());
        let spec = match role {
            AgentRole::Flight => TaskSpec::Flight(FlightTask {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                dates: request.dates,
                travelers: request.travelers,
                fare_budget: request.budget_ceiling * strategy.flights,
            }),
            AgentRole::Hotel => TaskSpec::Hotel(HotelTask {
                destination: request.destination.clone(),
                dates: request.dates,
                travelers: request.travelers,
                nightly_budget: (request.budget_ceiling * strategy.accommodation) / nights,
            }),
            AgentRole::Activity => TaskSpec::Activity(ActivityTask {
                destination: request.destination.clone(),
                days: request.dates.days() as u32,
                travelers: request.travelers,
                vibe: request.vibe.clone(),
                preferences: request.preferences.clone(),
                activity_budget: request.budget_ceiling * strategy.activities,
            }),
            AgentRole::Budget => TaskSpec::Budget(BudgetTask {
                ceiling: request.budget_ceiling,
                vibe: request.vibe.clone(),
                travelers: request.travelers,
                duration_days: request.dates.days() as u32,
                origin: request.origin.clone(),
                destination: request.destination.clone(),
            }),
            AgentRole::Weather => TaskSpec::Weather(WeatherTask {
                destination: request.destination.clone(),
                dates: request.dates,
            }),
        };
        Self {
            request_id,
            role,
            reply_to: reply_to.into(),
            spec,
        }
    }
}

/// Success or failure, as reported by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOutcome {
    Success(RolePayload),
    Failure { reason: String },
}

/// Result of one agent task, keyed by role and request id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub request_id: Uuid,
    pub role: AgentRole,
    pub outcome: ResultOutcome,
}

impl AgentResult {
    pub fn success(request_id: Uuid, payload: RolePayload) -> Self {
        Self {
            request_id,
            role: payload.role(),
            outcome: ResultOutcome::Success(payload),
        }
    }

    pub fn failure(request_id: Uuid, role: AgentRole, reason: impl Into<String>) -> Self {
        Self {
            request_id,
            role,
            outcome: ResultOutcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ResultOutcome::Success(_))
    }
}
