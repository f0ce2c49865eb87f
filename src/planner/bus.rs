//! In-process message bus
//!
//! Topic-keyed publish/subscribe between the coordinator and the role
//! agents. Messages published to one topic arrive in publish order; no
//! ordering is promised across topics. Duplicate delivery is tolerated,
//! the coordinator deduplicates by request id and role when merging.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{mpsc, Mutex};

use crate::planner::task::{AgentResult, AgentTask};

/// Message carried on the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Envelope {
    /// Task assignment from the coordinator to a role agent
    Task(AgentTask),
    /// Partial result from a role agent back to the coordinator
    Result(AgentResult),
    /// Ask an agent loop to exit
    Shutdown,
}

/// Receiving end of a topic
pub struct Subscription {
    pub topic: String,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl Subscription {
    /// Receive the next message on this topic
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    /// Try to receive without blocking
    pub fn try_recv(&mut self) -> Result<Envelope, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }
}

/// Pub/sub bus connecting the coordinator and the agents
pub struct MessageBus {
    topics: Mutex<HashMap<String, mpsc::UnboundedSender<Envelope>>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
        }
    }

    /// Create (or replace) the subscriber for a topic
    pub async fn subscribe(&self, topic: impl Into<String>) -> Subscription {
        let topic = topic.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut topics = self.topics.lock().await;
        topics.insert(topic.clone(), tx);
        Subscription { topic, rx }
    }

    /// Publish a message to a topic
    pub async fn publish(&self, topic: &str, msg: Envelope) -> Result<(), String> {
        let topics = self.topics.lock().await;
        match topics.get(topic) {
            Some(tx) => tx
                .send(msg)
                .map_err(|e| format!("send to '{}' failed: {:?}", topic, e)),
            None => Err(format!("no subscriber for topic '{}'", topic)),
        }
    }

    /// Drop a topic; pending messages stay readable by the subscriber
    pub async fn remove_topic(&self, topic: &str) {
        let mut topics = self.topics.lock().await;
        topics.remove(topic);
    }

    pub async fn topic_exists(&self, topic: &str) -> bool {
        let topics = self.topics.lock().await;
        topics.contains_key(topic)
    }

    pub async fn topic_count(&self) -> usize {
        let topics = self.topics.lock().await;
        topics.len()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::roles::AgentRole;
    use crate::planner::task::ResultOutcome;
    use uuid::Uuid;

    fn failure(role: AgentRole, reason: &str) -> Envelope {
        Envelope::Result(AgentResult {
            request_id: Uuid::new_v4(),
            role,
            outcome: ResultOutcome::Failure {
                reason: reason.to_string(),
            },
        })
    }

    #[tokio::test]
    async fn publish_to_missing_topic_errors() {
        let bus = MessageBus::new();
        let err = bus
            .publish("nowhere", failure(AgentRole::Flight, "x"))
            .await
            .unwrap_err();
        assert!(err.contains("nowhere"));
    }

    #[tokio::test]
    async fn messages_arrive_in_publish_order() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe("tasks:flight").await;
        for reason in ["first", "second", "third"] {
            bus.publish("tasks:flight", failure(AgentRole::Flight, reason))
                .await
                .unwrap();
        }
        for expected in ["first", "second", "third"] {
            match sub.recv().await.unwrap() {
                Envelope::Result(AgentResult {
                    outcome: ResultOutcome::Failure { reason },
                    ..
                }) => assert_eq!(reason, expected),
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn pending_messages_survive_topic_removal() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe("t").await;
        bus.publish("t", Envelope::Shutdown).await.unwrap();
        bus.remove_topic("t").await;
        assert!(!bus.topic_exists("t").await);
        assert!(matches!(sub.recv().await, Some(Envelope::Shutdown)));
        // Sender dropped with the topic, channel now closes
        assert!(sub.recv().await.is_none());
    }
}
