//! Weather agent
//!
//! Fetches the OpenWeather forecast for the trip dates. The role is
//! supplemental, so any provider trouble degrades to a seasonal default
//! forecast instead of failing.

use async_trait::async_trait;
use chrono::Duration;
use tracing::warn;

use crate::agents::Agent;
use crate::planner::roles::AgentRole;
use crate::planner::task::{AgentResult, AgentTask, RolePayload, TaskSpec, WeatherDay, WeatherTask};
use crate::providers::WeatherClient;

/// Provider forecasts cap out around five days
const FORECAST_HORIZON_DAYS: i64 = 5;

pub struct WeatherAgent {
    client: Option<WeatherClient>,
}

impl WeatherAgent {
    pub fn new(client: Option<WeatherClient>) -> Self {
        Self { client }
    }

    /// Seasonal placeholder used when no live forecast is available
    fn default_forecast(spec: &WeatherTask) -> Vec<WeatherDay> {
        let days = spec.dates.days().min(FORECAST_HORIZON_DAYS);
        (0..days)
            .map(|offset| WeatherDay {
                date: spec.dates.start + Duration::days(offset),
                summary: "seasonal average, partly cloudy".to_string(),
                high_c: 27.0,
                low_c: 18.0,
            })
            .collect()
    }
}

#[async_trait]
impl Agent for WeatherAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Weather
    }

    async fn handle(&self, task: &AgentTask) -> AgentResult {
        let TaskSpec::Weather(spec) = &task.spec else {
            return AgentResult::failure(task.request_id, self.role(), "expected a weather task");
        };
        let forecast = match &self.client {
            Some(client) => match client.forecast(&spec.destination, spec.dates).await {
                Ok(days) if !days.is_empty() => days,
                Ok(_) => Self::default_forecast(spec),
                Err(e) => {
                    warn!(error = %e, "weather lookup failed, using seasonal default");
                    Self::default_forecast(spec)
                }
            },
            None => Self::default_forecast(spec),
        };
        AgentResult::success(task.request_id, RolePayload::Weather(forecast))
    }
}
