//! Role agents
//!
//! Each agent resolves one facet of a trip request by calling a single
//! external data source. Agents are stateless across invocations and
//! never raise to the coordinator: every failure becomes a
//! `Failure { reason }` result.

pub mod activity;
pub mod budget;
pub mod flight;
pub mod hotel;
pub mod weather;

pub use activity::ActivityAgent;
pub use budget::BudgetAgent;
pub use flight::FlightAgent;
pub use hotel::HotelAgent;
pub use weather::WeatherAgent;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::planner::bus::{Envelope, MessageBus};
use crate::planner::roles::AgentRole;
use crate::planner::task::{AgentResult, AgentTask};

/// A role-specific worker. `handle` must not panic or error out; external
/// failures map to `AgentResult::failure`.
#[async_trait]
pub trait Agent: Send + Sync + 'static {
    fn role(&self) -> AgentRole;
    async fn handle(&self, task: &AgentTask) -> AgentResult;
}

/// Runs agent receive loops on the bus.
///
/// Each agent subscribes to its role topic; every incoming task is handled
/// on its own tokio task so one slow provider call never blocks the next
/// request for that role.
pub struct AgentPool {
    bus: Arc<MessageBus>,
    roles: Vec<AgentRole>,
    handles: Vec<JoinHandle<()>>,
}

impl AgentPool {
    /// Subscribe and start a loop for every agent
    pub async fn spawn(bus: Arc<MessageBus>, agents: Vec<Arc<dyn Agent>>) -> Self {
        let mut handles = Vec::new();
        let mut roles = Vec::new();
        for agent in agents {
            let role = agent.role();
            let mut sub = bus.subscribe(role.topic()).await;
            let loop_bus = bus.clone();
            info!(%role, "agent listening");
            handles.push(tokio::spawn(async move {
                while let Some(msg) = sub.recv().await {
                    match msg {
                        Envelope::Task(task) => {
                            if task.role != role {
                                warn!(%role, task_role = %task.role, "task for wrong role dropped");
                                continue;
                            }
                            let agent = agent.clone();
                            let bus = loop_bus.clone();
                            tokio::spawn(async move {
                                let result = agent.handle(&task).await;
                                if let Err(e) =
                                    bus.publish(&task.reply_to, Envelope::Result(result)).await
                                {
                                    // Reply topic gone: the window already closed
                                    warn!(%role, error = %e, "late result dropped");
                                }
                            });
                        }
                        Envelope::Shutdown => {
                            info!(%role, "agent shutting down");
                            break;
                        }
                        Envelope::Result(_) => {
                            warn!(%role, "unexpected result on task topic");
                        }
                    }
                }
            }));
            roles.push(role);
        }
        Self { bus, roles, handles }
    }

    /// Ask every agent loop to exit, then abort whatever is left
    pub async fn shutdown(&mut self) {
        for role in &self.roles {
            let _ = self.bus.publish(role.topic(), Envelope::Shutdown).await;
            self.bus.remove_topic(role.topic()).await;
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn agent_count(&self) -> usize {
        self.roles.len()
    }
}

/// Build the standard agent set from configured providers.
///
/// Agents whose provider is not configured still spawn; they fall back to
/// estimates (flight, weather) or report failure (hotel, activity).
pub fn from_config(config: &crate::config::Config) -> Vec<Arc<dyn Agent>> {
    use crate::providers::{AmadeusClient, LlmClient, ProviderConfig, WeatherClient};

    let amadeus = config
        .providers
        .amadeus_credentials()
        .map(|(id, secret)| AmadeusClient::new(id, secret));
    let llm = config
        .providers
        .groq_key()
        .map(|key| LlmClient::new(ProviderConfig::groq(key, config.providers.llm_model.clone())));
    let weather = config.providers.openweather_key().map(WeatherClient::new);

    vec![
        Arc::new(FlightAgent::new(amadeus)),
        Arc::new(HotelAgent::new(llm.clone())),
        Arc::new(ActivityAgent::new(llm)),
        Arc::new(BudgetAgent::default()),
        Arc::new(WeatherAgent::new(weather)),
    ]
}

impl Drop for AgentPool {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}
