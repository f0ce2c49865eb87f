//! Trip planning core: coordinator, message bus, roles, tasks and merge

pub mod budget;
pub mod bus;
pub mod coordinator;
pub mod itinerary;
pub mod roles;
pub mod task;

// Re-export commonly used types
pub use budget::{strategy_for_vibe, AllocationStrategy, BudgetBreakdown};
pub use bus::{Envelope, MessageBus, Subscription};
pub use coordinator::{cancel_pair, Coordinator, PlanCancel, DEFAULT_COLLECT_WINDOW};
pub use itinerary::Itinerary;
pub use roles::AgentRole;
pub use task::{AgentResult, AgentTask, ResultOutcome, RolePayload, TaskSpec};
