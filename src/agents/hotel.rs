//! Hotel agent
//!
//! Asks the LLM provider for real hotels in the destination within the
//! nightly budget, expecting a JSON array back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::agents::Agent;
use crate::planner::roles::AgentRole;
use crate::planner::task::{AgentResult, AgentTask, HotelOption, HotelTask, RolePayload, TaskSpec};
use crate::providers::llm::extract_json_array;
use crate::providers::LlmClient;

/// Hotel entry as the LLM returns it
#[derive(Debug, Deserialize)]
struct HotelJson {
    name: String,
    price: f64,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    location: String,
    #[serde(default)]
    amenities: Vec<String>,
}

pub struct HotelAgent {
    llm: Option<LlmClient>,
}

impl HotelAgent {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    fn prompt(spec: &HotelTask) -> String {
        format!(
            r#"I need information about REAL hotels in {destination} suitable for {travelers} travelers.
Budget: approximately {budget} INR per night.
Travel dates: {dates}.

Provide 3 actual hotel options that exist in {destination} with realistic names, prices per night in INR, locations, amenities and guest ratings.

Return ONLY a valid JSON array with this exact structure:
[
  {{
    "name": "Real Hotel Name",
    "price": 5000,
    "rating": 4.2,
    "location": "Specific Area, {destination}",
    "amenities": ["wifi", "pool"]
  }}
]"#,
            destination = spec.destination,
            travelers = spec.travelers,
            budget = spec.nightly_budget.round(),
            dates = spec.dates,
        )
    }

    async fn scout(&self, spec: &HotelTask) -> anyhow::Result<Vec<HotelOption>> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("hotel provider not configured"))?;
        let response = llm.complete(&Self::prompt(spec), 1024).await?;
        debug!(destination = %spec.destination, "hotel response received");
        let raw: Vec<HotelJson> = serde_json::from_value(extract_json_array(&response)?)?;
        if raw.is_empty() {
            anyhow::bail!("provider returned no hotels");
        }
        Ok(raw
            .into_iter()
            .map(|h| HotelOption {
                name: h.name,
                price_per_night: Decimal::from_f64_retain(h.price).unwrap_or_default(),
                rating: h.rating,
                location: h.location,
                amenities: h.amenities,
            })
            .collect())
    }
}

#[async_trait]
impl Agent for HotelAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Hotel
    }

    async fn handle(&self, task: &AgentTask) -> AgentResult {
        let TaskSpec::Hotel(spec) = &task.spec else {
            return AgentResult::failure(task.request_id, self.role(), "expected a hotel task");
        };
        match self.scout(spec).await {
            Ok(hotels) => AgentResult::success(task.request_id, RolePayload::Hotels(hotels)),
            Err(e) => AgentResult::failure(task.request_id, self.role(), e.to_string()),
        }
    }
}
