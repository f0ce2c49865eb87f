//! Shared types used across modules
//!
//! The trip request model lives here because the planner, agents and
//! server all consume it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PlanningError;

/// Inclusive travel date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of nights between start and end
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    /// Trip length in days, counting both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A normalized travel request. Immutable once submitted to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub dates: DateRange,
    /// Total spending ceiling for the whole trip
    pub budget_ceiling: Decimal,
    pub travelers: u32,
    /// Free-form travel style, e.g. "mountain adventure with comfortable stays"
    #[serde(default = "default_vibe")]
    pub vibe: String,
    /// Preference tags, e.g. ["vegetarian", "no-early-flights"]
    #[serde(default)]
    pub preferences: Vec<String>,
}

pub(crate) fn default_vibe() -> String {
    "comfortable travel".to_string()
}

impl TripRequest {
    /// Reject malformed requests before anything is dispatched
    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.origin.trim().is_empty() {
            return Err(PlanningError::InvalidRequest("origin is required".into()));
        }
        if self.destination.trim().is_empty() {
            return Err(PlanningError::InvalidRequest(
                "destination is required".into(),
            ));
        }
        if self.dates.end < self.dates.start {
            return Err(PlanningError::InvalidRequest(format!(
                "end date {} is before start date {}",
                self.dates.end, self.dates.start
            )));
        }
        if self.travelers == 0 {
            return Err(PlanningError::InvalidRequest(
                "at least one traveler is required".into(),
            ));
        }
        if self.budget_ceiling <= Decimal::ZERO {
            return Err(PlanningError::InvalidRequest(
                "budget ceiling must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request() -> TripRequest {
        TripRequest {
            origin: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            dates: DateRange::new(date("2026-11-23"), date("2026-11-27")),
            budget_ceiling: dec!(80000),
            travelers: 2,
            vibe: default_vibe(),
            preferences: vec![],
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn empty_destination_rejected() {
        let mut req = request();
        req.destination = " ".to_string();
        assert!(matches!(
            req.validate(),
            Err(PlanningError::InvalidRequest(_))
        ));
    }

    #[test]
    fn inverted_dates_rejected() {
        let mut req = request();
        req.dates = DateRange::new(date("2026-11-27"), date("2026-11-23"));
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_travelers_rejected() {
        let mut req = request();
        req.travelers = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn non_positive_budget_rejected() {
        let mut req = request();
        req.budget_ceiling = Decimal::ZERO;
        assert!(req.validate().is_err());
    }

    #[test]
    fn nights_and_days() {
        let range = DateRange::new(date("2026-11-23"), date("2026-11-27"));
        assert_eq!(range.nights(), 4);
        assert_eq!(range.days(), 5);
    }

    #[test]
    fn single_day_trip_counts_one_night() {
        let range = DateRange::new(date("2026-11-23"), date("2026-11-23"));
        assert_eq!(range.nights(), 1);
    }
}
