//! Error types for the planning pipeline
//!
//! Agent-level failures never surface here: the coordinator absorbs them
//! into missing-role markers. Only a request that produced no usable data
//! at all escalates to the caller. An over-budget plan is a flagged
//! itinerary, not an error.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by [`Coordinator::plan`](crate::planner::Coordinator::plan)
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Malformed request, rejected before any task was dispatched
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),

    /// Every required agent either failed or timed out
    #[error("all agents failed for request {request_id}")]
    AllAgentsFailed { request_id: Uuid },

    /// The message bus shut down while a plan was in flight
    #[error("message channel closed")]
    ChannelClosed,
}
