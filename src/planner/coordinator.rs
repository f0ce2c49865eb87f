//! Planning coordinator
//!
//! Fans a validated trip request out to all role agents at once, collects
//! results on a per-request reply topic until every dispatched role has
//! reported or the collection window elapses, then merges the payloads
//! into an itinerary. Failures and timeouts both leave a role missing;
//! results arriving after the window closes are discarded.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::PlanningError;
use crate::planner::bus::{Envelope, MessageBus};
use crate::planner::itinerary::Itinerary;
use crate::planner::roles::AgentRole;
use crate::planner::task::{AgentTask, ResultOutcome, RolePayload};
use crate::types::TripRequest;

/// Default collection window, matching the original workflow watchdog
pub const DEFAULT_COLLECT_WINDOW: Duration = Duration::from_secs(120);

/// Handle for cancelling an in-flight `plan` call
pub struct PlanCancel(watch::Sender<bool>);

impl PlanCancel {
    /// Close the collection window immediately. In-flight agent calls are
    /// not awaited; whatever already arrived is returned.
    pub fn cancel(&self) {
        let _ = self.0.send(true);
    }
}

/// Create a cancel handle and the receiver to pass to
/// [`Coordinator::plan_with_cancel`]
pub fn cancel_pair() -> (PlanCancel, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (PlanCancel(tx), rx)
}

/// Resolves only once cancellation is requested; pends forever otherwise
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            // Cancel handle dropped without firing; cancellation can no
            // longer happen
            std::future::pending::<()>().await;
        }
    }
}

/// Fans requests out to role agents and merges their results
pub struct Coordinator {
    bus: Arc<MessageBus>,
    collect_window: Duration,
}

impl Coordinator {
    pub fn new(bus: Arc<MessageBus>) -> Self {
        Self {
            bus,
            collect_window: DEFAULT_COLLECT_WINDOW,
        }
    }

    pub fn with_collect_window(mut self, window: Duration) -> Self {
        self.collect_window = window;
        self
    }

    pub fn bus(&self) -> Arc<MessageBus> {
        self.bus.clone()
    }

    /// Plan a trip. Returns a complete or partial itinerary, or an error
    /// when the request is malformed or no required role produced data.
    pub async fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanningError> {
        let (_cancel, rx) = cancel_pair();
        self.plan_with_cancel(request, rx).await
    }

    /// Plan a trip with caller-driven cancellation. Cancelling stops the
    /// wait immediately and assembles whatever partial results arrived.
    pub async fn plan_with_cancel(
        &self,
        request: &TripRequest,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<Itinerary, PlanningError> {
        request.validate()?;
        let request_id = Uuid::new_v4();
        let reply_to = format!("results:{}", request_id);

        info!(
            %request_id,
            origin = %request.origin,
            destination = %request.destination,
            "planning trip"
        );

        // Subscribe before dispatch so no result can be lost
        let mut results = self.bus.subscribe(&reply_to).await;

        let mut reported: HashSet<AgentRole> = HashSet::new();
        for role in AgentRole::all() {
            let task = AgentTask::project(request_id, *role, &reply_to, request);
            if let Err(e) = self.bus.publish(role.topic(), Envelope::Task(task)).await {
                // No agent for this role; count it as already failed so the
                // window does not wait on it
                warn!(%role, error = %e, "task dispatch failed");
                reported.insert(*role);
            }
        }

        let expected = AgentRole::all().len();
        let deadline = Instant::now() + self.collect_window;
        let mut collected: HashMap<AgentRole, RolePayload> = HashMap::new();

        while reported.len() < expected {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    warn!(%request_id, "collection window elapsed");
                    break;
                }
                _ = cancelled(&mut cancel) => {
                    info!(%request_id, "plan cancelled by caller");
                    break;
                }
                msg = results.recv() => match msg {
                    Some(Envelope::Result(result)) => {
                        if result.request_id != request_id {
                            debug!(%result.request_id, "discarding stale result");
                            continue;
                        }
                        if !reported.insert(result.role) {
                            debug!(role = %result.role, "duplicate result dropped");
                            continue;
                        }
                        match result.outcome {
                            ResultOutcome::Success(payload) => {
                                debug!(role = %result.role, "role reported success");
                                collected.insert(result.role, payload);
                            }
                            ResultOutcome::Failure { reason } => {
                                warn!(role = %result.role, %reason, "role reported failure");
                            }
                        }
                    }
                    Some(_) => continue,
                    None => return Err(PlanningError::ChannelClosed),
                }
            }
        }

        // Window closed; anything still in flight is discarded with the topic
        self.bus.remove_topic(&reply_to).await;

        if !collected.keys().any(|r| r.is_required()) {
            return Err(PlanningError::AllAgentsFailed { request_id });
        }

        let itinerary = Itinerary::assemble(request, request_id, collected);
        info!(
            %request_id,
            complete = itinerary.is_complete(),
            over_budget = itinerary.over_budget,
            total_cost = %itinerary.total_cost,
            "itinerary assembled"
        );
        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DateRange;
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

    #[tokio::test]
    async fn invalid_request_rejected_before_dispatch() {
        let bus = Arc::new(MessageBus::new());
        let coordinator = Coordinator::new(bus.clone());
        let mut req = request();
        req.destination = String::new();
        let err = coordinator.plan(&req).await.unwrap_err();
        assert!(matches!(err, PlanningError::InvalidRequest(_)));
        // Nothing was published: the only topic ever created is the reply
        // topic, and it is removed again, so invalid requests leave none
        assert_eq!(bus.topic_count().await, 0);
    }

    #[tokio::test]
    async fn no_agents_at_all_fails_fast() {
        // No subscribers: every dispatch fails, so the coordinator must
        // return without waiting out the window
        let coordinator =
            Coordinator::new(Arc::new(MessageBus::new())).with_collect_window(Duration::from_secs(30));
        let start = std::time::Instant::now();
        let err = coordinator.plan(&request()).await.unwrap_err();
        assert!(matches!(err, PlanningError::AllAgentsFailed { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
