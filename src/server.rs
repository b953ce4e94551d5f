use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde::Deserialize;

use crate::cache::ScheduleCache;
use crate::error::Result;
use crate::fetch::fetch_schedule;
use crate::ics::schedule_ics;
use crate::schedule::Schedule;
use crate::view::build_view;

pub const SCHEDULE_PATH: &str = "/schedule";

pub struct AppState {
    pub upstream: String,
    pub cache: ScheduleCache,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SCHEDULE_PATH, get(handle_schedule))
        .fallback(|| async { Redirect::permanent(SCHEDULE_PATH) })
        .with_state(state)
}

#[derive(Deserialize)]
struct ScheduleQuery {
    #[serde(default)]
    ics: bool,
}

async fn handle_schedule(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Response {
    let schedule = match load_schedule(&state).await {
        Ok(schedule) => schedule,
        Err(err) => {
            error!("failed to load maintenance schedule: {err}");
            return (
                StatusCode::BAD_GATEWAY,
                "Failed to load maintenance schedule",
            )
                .into_response();
        }
    };

    if query.ics {
        return (
            [("content-type", "text/calendar")],
            schedule_ics(&schedule).to_string(),
        )
            .into_response();
    }

    Json(build_view(&schedule)).into_response()
}

async fn load_schedule(state: &AppState) -> Result<Arc<Schedule>> {
    if let Some(schedule) = state.cache.get().await {
        return Ok(schedule);
    }

    let schedule = fetch_schedule(&state.upstream).await?;

    Ok(state.cache.store(schedule).await)
}
