//! Agent role definitions
//!
//! Planning fans a request out to one agent per role. Flight, Hotel,
//! Activity and Budget gate completeness; Weather only enriches the plan.

use serde::{Deserialize, Serialize};

/// Role an agent fills in the planning fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Flight,
    Hotel,
    Activity,
    Budget,
    Weather,
}

impl AgentRole {
    /// Every role the coordinator dispatches to
    pub fn all() -> &'static [AgentRole] {
        &[
            AgentRole::Flight,
            AgentRole::Hotel,
            AgentRole::Activity,
            AgentRole::Budget,
            AgentRole::Weather,
        ]
    }

    /// Roles that must succeed for an itinerary to count as complete
    pub fn required() -> &'static [AgentRole] {
        &[
            AgentRole::Flight,
            AgentRole::Hotel,
            AgentRole::Activity,
            AgentRole::Budget,
        ]
    }

    /// Whether this role gates itinerary completeness
    pub fn is_required(&self) -> bool {
        Self::required().contains(self)
    }

    /// Bus topic this role's agent listens on
    pub fn topic(&self) -> &'static str {
        match self {
            AgentRole::Flight => "tasks:flight",
            AgentRole::Hotel => "tasks:hotel",
            AgentRole::Activity => "tasks:activity",
            AgentRole::Budget => "tasks:budget",
            AgentRole::Weather => "tasks:weather",
        }
    }

    /// Display name for this role
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Flight => "Flight",
            AgentRole::Hotel => "Hotel",
            AgentRole::Activity => "Activity",
            AgentRole::Budget => "Budget",
            AgentRole::Weather => "Weather",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_is_not_required() {
        assert!(!AgentRole::Weather.is_required());
        assert!(AgentRole::Flight.is_required());
        assert!(AgentRole::Budget.is_required());
    }

    #[test]
    fn topics_are_distinct() {
        let topics: std::collections::HashSet<_> =
            AgentRole::all().iter().map(|r| r.topic()).collect();
        assert_eq!(topics.len(), AgentRole::all().len());
    }
}
