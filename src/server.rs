//! HTTP planning API
//!
//! Small axum surface over the coordinator: submit a trip request, get the
//! assembled itinerary back as JSON.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agents::AgentPool;
use crate::config::Config;
use crate::error::PlanningError;
use crate::planner::coordinator::Coordinator;
use crate::types::TripRequest;

#[derive(Clone)]
pub struct ServerState {
    coordinator: Arc<Coordinator>,
}

impl ServerState {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}

/// Run the planning server until interrupted
pub async fn run(config: Config) -> Result<()> {
    let bus = Arc::new(crate::planner::bus::MessageBus::new());
    let coordinator = Arc::new(
        Coordinator::new(bus).with_collect_window(std::time::Duration::from_secs(
            config.planner.collect_window_secs,
        )),
    );
    let mut pool = AgentPool::spawn(coordinator.bus(), crate::agents::from_config(&config)).await;
    info!(agents = pool.agent_count(), "agent pool started");

    let app = router(ServerState { coordinator });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "planning server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    pool.shutdown().await;
    Ok(())
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/plan", post(plan))
        .route("/status", get(status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn plan(
    State(state): State<ServerState>,
    Json(request): Json<TripRequest>,
) -> Result<Response, ApiError> {
    let itinerary = state.coordinator.plan(&request).await.map_err(ApiError)?;
    Ok(Json(itinerary).into_response())
}

async fn status(State(state): State<ServerState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "active_topics": state.coordinator.bus().topic_count().await,
    }))
}

struct ApiError(PlanningError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlanningError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PlanningError::AllAgentsFailed { .. } => StatusCode::BAD_GATEWAY,
            PlanningError::ChannelClosed => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> ServerState {
        let bus = Arc::new(crate::planner::bus::MessageBus::new());
        ServerState {
            coordinator: Arc::new(Coordinator::new(bus)),
        }
    }

    #[test]
    fn error_status_mapping() {
        let resp = ApiError(PlanningError::InvalidRequest("empty origin".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(PlanningError::AllAgentsFailed { request_id: uuid::Uuid::new_v4() })
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn status_reports_ok() {
        let app = router(test_state());
        let resp = app
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_plan_request_is_rejected() {
        let app = router(test_state());
        let body = serde_json::json!({
            "origin": "",
            "destination": "Goa",
            "dates": { "start": "2026-11-23", "end": "2026-11-27" },
            "budget_ceiling": "80000",
            "travelers": 2
        });
        let resp = app
            .oneshot(
                Request::post("/plan")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
