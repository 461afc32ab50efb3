use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;

use crate::dashboard::Dashboard;
use crate::panel::Panel;
use crate::view_model::ViewModel;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/view-model", get(view_model))
        .route("/api/dashboard", get(dashboard_panel))
        .route("/api/refresh", post(refresh))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn view_model(State(state): State<AppState>) -> Json<ViewModel> {
    let vm = state.dashboard.current().await;
    Json(ViewModel::clone(&vm))
}

async fn dashboard_panel(State(state): State<AppState>) -> Json<Panel> {
    let vm = state.dashboard.current().await;
    let loading = state.dashboard.is_loading();
    Json(Panel::build(&vm, loading, Utc::now()))
}

async fn refresh(State(state): State<AppState>) -> Json<ViewModel> {
    let vm = state.dashboard.refresh().await;
    Json(ViewModel::clone(&vm))
}
