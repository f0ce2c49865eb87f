//! Activity agent
//!
//! Asks the LLM provider for a day-by-day activity list matching the
//! traveler's vibe and activity budget.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::agents::Agent;
use crate::planner::roles::AgentRole;
use crate::planner::task::{
    ActivityOption, ActivityTask, AgentResult, AgentTask, RolePayload, TaskSpec,
};
use crate::providers::llm::extract_json_array;
use crate::providers::LlmClient;

#[derive(Debug, Deserialize)]
struct ActivityJson {
    day: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cost: f64,
}

pub struct ActivityAgent {
    llm: Option<LlmClient>,
}

impl ActivityAgent {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    fn prompt(spec: &ActivityTask) -> String {
        let preferences = if spec.preferences.is_empty() {
            "none".to_string()
        } else {
            spec.preferences.join(", ")
        };
        format!(
            r#"Plan activities for a {days}-day trip to {destination} for {travelers} travelers.
Travel style: {vibe}.
Preferences: {preferences}.
Total activity budget for the group: {budget} INR.

Suggest one or two real activities per day that fit the style and budget.

Return ONLY a valid JSON array with this exact structure:
[
  {{
    "day": 1,
    "title": "Activity name",
    "description": "One sentence on what it is and where",
    "cost": 1500
  }}
]"#,
            days = spec.days,
            destination = spec.destination,
            travelers = spec.travelers,
            vibe = spec.vibe,
            preferences = preferences,
            budget = spec.activity_budget.round(),
        )
    }

    async fn suggest(&self, spec: &ActivityTask) -> anyhow::Result<Vec<ActivityOption>> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("activity provider not configured"))?;
        let response = llm.complete(&Self::prompt(spec), 2048).await?;
        debug!(destination = %spec.destination, "activity response received");
        let raw: Vec<ActivityJson> = serde_json::from_value(extract_json_array(&response)?)?;
        if raw.is_empty() {
            anyhow::bail!("provider returned no activities");
        }
        Ok(raw
            .into_iter()
            .map(|a| ActivityOption {
                day: a.day.max(1),
                title: a.title,
                description: a.description,
                estimated_cost: Decimal::from_f64_retain(a.cost).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl Agent for ActivityAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Activity
    }

    async fn handle(&self, task: &AgentTask) -> AgentResult {
        let TaskSpec::Activity(spec) = &task.spec else {
            return AgentResult::failure(task.request_id, self.role(), "expected an activity task");
        };
        match self.suggest(spec).await {
            Ok(activities) => {
                AgentResult::success(task.request_id, RolePayload::Activities(activities))
            }
            Err(e) => AgentResult::failure(task.request_id, self.role(), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spec() -> ActivityTask {
        ActivityTask {
            destination: "Manali".to_string(),
            days: 5,
            travelers: 2,
            vibe: "mountain adventure".to_string(),
            preferences: vec!["trekking".to_string()],
            activity_budget: dec!(20000),
        }
    }

    #[test]
    fn prompt_mentions_vibe_and_preferences() {
        let prompt = ActivityAgent::prompt(&spec());
        assert!(prompt.contains("mountain adventure"));
        assert!(prompt.contains("trekking"));
        assert!(prompt.contains("5-day"));
    }

    #[test]
    fn zero_day_entries_are_clamped() {
        let raw = ActivityJson {
            day: 0,
            title: "Paragliding".to_string(),
            description: String::new(),
            cost: 3000.0,
        };
        let option = ActivityOption {
            day: raw.day.max(1),
            title: raw.title,
            description: raw.description,
            estimated_cost: Decimal::from_f64_retain(raw.cost).unwrap_or_default(),
        };
        assert_eq!(option.day, 1);
    }

    #[tokio::test]
    async fn unconfigured_provider_is_a_failure() {
        use crate::types::{DateRange, TripRequest};
        let request = TripRequest {
            origin: "Delhi".to_string(),
            destination: "Manali".to_string(),
            dates: DateRange::new(
                "2026-11-23".parse().unwrap(),
                "2026-11-27".parse().unwrap(),
            ),
            budget_ceiling: dec!(60000),
            travelers: 2,
            vibe: "mountain adventure".to_string(),
            preferences: vec![],
        };
        let task = AgentTask::project(
            uuid::Uuid::new_v4(),
            AgentRole::Activity,
            "results:x",
            &request,
        );
        let agent = ActivityAgent::new(None);
        assert!(!agent.handle(&task).await.is_success());
    }
}
