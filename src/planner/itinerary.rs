//! Itinerary assembly
//!
//! The merged travel plan. Built once from whatever payloads arrived
//! before the collection window closed and never mutated afterwards; a
//! retry produces a fresh itinerary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::planner::budget::BudgetBreakdown;
use crate::planner::roles::AgentRole;
use crate::planner::task::{ActivityOption, FlightOption, HotelOption, RolePayload, WeatherDay};
use crate::types::{DateRange, TripRequest};

/// The merged, possibly partial, travel plan returned to the requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub request_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub dates: DateRange,
    pub travelers: u32,
    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub activities: Vec<ActivityOption>,
    pub weather: Vec<WeatherDay>,
    pub budget: Option<BudgetBreakdown>,
    /// Derived group cost: cheapest fare x travelers + cheapest hotel x
    /// nights + activity costs
    pub total_cost: Decimal,
    /// Flagged when the derived cost exceeds the request ceiling.
    /// The plan is still returned.
    pub over_budget: bool,
    /// Required roles that failed or timed out; empty means complete
    pub missing_roles: Vec<AgentRole>,
}

impl Itinerary {
    /// Merge collected payloads into a plan. Success payloads are combined
    /// by simple union; the budget payload only labels the plan, observed
    /// costs are never overridden by it.
    pub fn assemble(
        request: &TripRequest,
        request_id: Uuid,
        mut payloads: HashMap<AgentRole, RolePayload>,
    ) -> Self {
        let flights = match payloads.remove(&AgentRole::Flight) {
            Some(RolePayload::Flights(f)) => f,
            _ => Vec::new(),
        };
        let hotels = match payloads.remove(&AgentRole::Hotel) {
            Some(RolePayload::Hotels(h)) => h,
            _ => Vec::new(),
        };
        let activities = match payloads.remove(&AgentRole::Activity) {
            Some(RolePayload::Activities(a)) => a,
            _ => Vec::new(),
        };
        let weather = match payloads.remove(&AgentRole::Weather) {
            Some(RolePayload::Weather(w)) => w,
            _ => Vec::new(),
        };
        let budget = match payloads.remove(&AgentRole::Budget) {
            Some(RolePayload::Budget(b)) => Some(b),
            _ => None,
        };

        let missing_roles: Vec<AgentRole> = AgentRole::required()
            .iter()
            .copied()
            .filter(|role| match role {
                AgentRole::Flight => flights.is_empty(),
                AgentRole::Hotel => hotels.is_empty(),
                AgentRole::Activity => activities.is_empty(),
                AgentRole::Budget => budget.is_none(),
                AgentRole::Weather => false,
            })
            .collect();

        let nights = Decimal::from(request.dates.nights());
        let travelers = Decimal::from(request.travelers);
        let flight_cost = flights
            .iter()
            .map(|f| f.price)
            .min()
            .map(|fare| fare * travelers)
            .unwrap_or(Decimal::ZERO);
        let hotel_cost = hotels
            .iter()
            .map(|h| h.price_per_night)
            .min()
            .map(|rate| rate * nights)
            .unwrap_or(Decimal::ZERO);
        let activity_cost: Decimal = activities.iter().map(|a| a.estimated_cost).sum();
        let total_cost = flight_cost + hotel_cost + activity_cost;

        Self {
            request_id,
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            dates: request.dates,
            travelers: request.travelers,
            flights,
            hotels,
            activities,
            weather,
            budget,
            total_cost,
            over_budget: total_cost > request.budget_ceiling,
            missing_roles,
        }
    }

    /// Complete only if every required role reported success
    pub fn is_complete(&self) -> bool {
        self.missing_roles.is_empty()
    }

    /// Human-readable plan for CLI output
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Trip plan: {} -> {} ({}, {} travelers)\n",
            self.origin, self.destination, self.dates, self.travelers
        ));
        if !self.is_complete() {
            let missing: Vec<&str> = self.missing_roles.iter().map(|r| r.display_name()).collect();
            out.push_str(&format!("PARTIAL PLAN - missing: {}\n", missing.join(", ")));
        }

        if !self.flights.is_empty() {
            out.push_str("\nFlights:\n");
            for f in &self.flights {
                out.push_str(&format!(
                    "  {} {} | {} | {} -> {} | {} | {} stop(s) | {} per person\n",
                    f.airline,
                    f.flight_number,
                    f.route,
                    f.departure_time,
                    f.arrival_time,
                    f.duration,
                    f.stops,
                    f.price
                ));
            }
        }
        if !self.hotels.is_empty() {
            out.push_str("\nHotels:\n");
            for h in &self.hotels {
                out.push_str(&format!(
                    "  {} ({:.1}) - {} | {} per night | {}\n",
                    h.name,
                    h.rating,
                    h.location,
                    h.price_per_night,
                    h.amenities.join(", ")
                ));
            }
        }
        if !self.activities.is_empty() {
            out.push_str("\nActivities:\n");
            for a in &self.activities {
                out.push_str(&format!(
                    "  Day {}: {} - {} ({})\n",
                    a.day, a.title, a.description, a.estimated_cost
                ));
            }
        }
        if !self.weather.is_empty() {
            out.push_str("\nWeather:\n");
            for w in &self.weather {
                out.push_str(&format!(
                    "  {}: {} ({:.0}C / {:.0}C)\n",
                    w.date, w.summary, w.high_c, w.low_c
                ));
            }
        }
        if let Some(b) = &self.budget {
            out.push_str(&format!(
                "\nBudget ({}): flights {} | stay {} | activities {} | food & transport {} | buffer {}\n",
                b.strategy, b.flights, b.accommodation, b.activities, b.food_transport, b.buffer
            ));
        }
        out.push_str(&format!("\nEstimated total cost: {}", self.total_cost));
        if self.over_budget {
            out.push_str("  [OVER BUDGET]");
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::task::DataSource;
    use rust_decimal_macros::dec;

    fn request() -> TripRequest {
        TripRequest {
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
        }
    }

    fn flight(price: Decimal) -> FlightOption {
        FlightOption {
            airline: "IndiGo".to_string(),
            flight_number: "6E205".to_string(),
            route: "BOM -> GOI".to_string(),
            departure_time: "08:00".to_string(),
            arrival_time: "09:20".to_string(),
            duration: "1h20m".to_string(),
            cabin_class: "Economy".to_string(),
            price,
            stops: 0,
            source: DataSource::Live,
        }
    }

    fn hotel(rate: Decimal) -> HotelOption {
        HotelOption {
            name: "Taj Holiday Village".to_string(),
            price_per_night: rate,
            rating: 4.4,
            location: "Candolim".to_string(),
            amenities: vec!["pool".to_string()],
        }
    }

    fn all_payloads() -> HashMap<AgentRole, RolePayload> {
        let mut m = HashMap::new();
        m.insert(
            AgentRole::Flight,
            RolePayload::Flights(vec![flight(dec!(6000)), flight(dec!(5000))]),
        );
        m.insert(AgentRole::Hotel, RolePayload::Hotels(vec![hotel(dec!(7000))]));
        m.insert(
            AgentRole::Activity,
            RolePayload::Activities(vec![ActivityOption {
                day: 1,
                title: "Beach day".to_string(),
                description: "Calangute".to_string(),
                estimated_cost: dec!(2000),
            }]),
        );
        m.insert(
            AgentRole::Budget,
            RolePayload::Budget(BudgetBreakdown::from_strategy(
                dec!(80000),
                "comfortable travel",
            )),
        );
        m
    }

    #[test]
    fn complete_when_all_required_roles_present() {
        let it = Itinerary::assemble(&request(), Uuid::new_v4(), all_payloads());
        assert!(it.is_complete());
        assert!(it.missing_roles.is_empty());
        // cheapest fare 5000 x 2 + 7000 x 4 nights + 2000
        assert_eq!(it.total_cost, dec!(40000));
        assert!(!it.over_budget);
    }

    #[test]
    fn missing_weather_does_not_mark_partial() {
        let it = Itinerary::assemble(&request(), Uuid::new_v4(), all_payloads());
        assert!(it.weather.is_empty());
        assert!(it.is_complete());
    }

    #[test]
    fn missing_required_role_marks_partial() {
        let mut payloads = all_payloads();
        payloads.remove(&AgentRole::Hotel);
        let it = Itinerary::assemble(&request(), Uuid::new_v4(), payloads);
        assert!(!it.is_complete());
        assert_eq!(it.missing_roles, vec![AgentRole::Hotel]);
        // other payloads still present
        assert_eq!(it.flights.len(), 2);
        assert_eq!(it.activities.len(), 1);
    }

    #[test]
    fn over_budget_is_flagged_not_dropped() {
        let mut req = request();
        req.budget_ceiling = dec!(30000);
        let it = Itinerary::assemble(&req, Uuid::new_v4(), all_payloads());
        assert!(it.over_budget);
        assert!(it.is_complete());
    }

    #[test]
    fn cost_at_ceiling_is_not_over_budget() {
        let mut req = request();
        req.budget_ceiling = dec!(40000);
        let it = Itinerary::assemble(&req, Uuid::new_v4(), all_payloads());
        assert_eq!(it.total_cost, req.budget_ceiling);
        assert!(!it.over_budget);
    }

    #[test]
    fn report_mentions_partial_and_over_budget() {
        let mut req = request();
        req.budget_ceiling = dec!(10000);
        let mut payloads = all_payloads();
        payloads.remove(&AgentRole::Budget);
        let it = Itinerary::assemble(&req, Uuid::new_v4(), payloads);
        let report = it.render_report();
        assert!(report.contains("PARTIAL PLAN"));
        assert!(report.contains("Budget"));
        assert!(report.contains("[OVER BUDGET]"));
    }
}
