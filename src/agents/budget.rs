//! Budget agent
//!
//! Allocates the spending ceiling across categories using the vibe
//! strategy table. Purely computational, no network call.

use async_trait::async_trait;

use crate::agents::Agent;
use crate::planner::budget::BudgetBreakdown;
use crate::planner::roles::AgentRole;
use crate::planner::task::{AgentResult, AgentTask, RolePayload, TaskSpec};

pub struct BudgetAgent;

impl BudgetAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BudgetAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for BudgetAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Budget
    }

    async fn handle(&self, task: &AgentTask) -> AgentResult {
        let TaskSpec::Budget(spec) = &task.spec else {
            return AgentResult::failure(task.request_id, self.role(), "expected a budget task");
        };
        let breakdown = BudgetBreakdown::from_strategy(spec.ceiling, &spec.vibe);
        AgentResult::success(task.request_id, RolePayload::Budget(breakdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateRange, TripRequest};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn allocates_by_vibe() {
        let request = TripRequest {
            origin: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            dates: DateRange::new(
                "2026-11-23".parse().unwrap(),
                "2026-11-27".parse().unwrap(),
            ),
            budget_ceiling: dec!(100000),
            travelers: 2,
            vibe: "luxury premium experience".to_string(),
            preferences: vec![],
        };
        let task = AgentTask::project(Uuid::new_v4(), AgentRole::Budget, "results:x", &request);
        let result = BudgetAgent::new().handle(&task).await;
        match result.outcome {
            crate::planner::task::ResultOutcome::Success(RolePayload::Budget(b)) => {
                // luxury allocates half the ceiling to accommodation
                assert_eq!(b.accommodation, dec!(50000));
                assert_eq!(b.total, dec!(100000));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
