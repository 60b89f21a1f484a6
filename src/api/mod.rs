use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::balldontlie::{League, SportsApi};
use crate::config::ApiKey;
use crate::error::ServiceError;
use crate::standings::{StandingsEntry, TeamPerformanceResolver};

#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<ApiKey>,
    pub sdk: Arc<dyn SportsApi>,
    pub resolver: TeamPerformanceResolver,
}

/// Build the Axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test-sports", get(test_sports_handler))
        .route("/test-config", get(test_config_handler))
        .route("/team/:team_id/performance", get(team_performance_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// GET /test-sports
///
/// Lists teams in every league to confirm the key works against each.
async fn test_sports_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, String>>, (StatusCode, Json<serde_json::Value>)> {
    let Some(api_key) = state.api_key.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "No API key" })),
        ));
    };

    let probes = League::ALL.iter().map(|league| {
        let sdk = Arc::clone(&state.sdk);
        async move {
            let outcome = match sdk.list_teams(api_key, *league).await {
                Ok(teams) => {
                    info!("{} connectivity ok ({} teams)", league, teams);
                    "Working".to_string()
                }
                Err(e) => {
                    warn!("{} connectivity failed: {}", league, e);
                    format!("Failed: {}", e)
                }
            };
            (league.as_str().to_string(), outcome)
        }
    });

    Ok(Json(join_all(probes).await.into_iter().collect()))
}

#[derive(Debug, Serialize, PartialEq)]
struct ConfigReport {
    api_key_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key_first_6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key_last_4: Option<String>,
}

impl ConfigReport {
    fn new(api_key: Option<&ApiKey>) -> Self {
        ConfigReport {
            api_key_loaded: api_key.is_some(),
            api_key_length: api_key.map(ApiKey::len),
            api_key_first_6: api_key.map(|k| k.prefix(6)),
            api_key_last_4: api_key.map(|k| k.suffix(4)),
        }
    }
}

/// GET /test-config
async fn test_config_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ConfigReport::new(state.api_key.as_ref()))
}

#[derive(Debug, Deserialize)]
struct SeasonQuery {
    season: Option<String>,
}

/// GET /team/:team_id/performance?season=2024
///
/// Extractor rejections are reported through `ServiceError` so every failure
/// carries a JSON `error` body.
async fn team_performance_handler(
    State(state): State<Arc<AppState>>,
    team_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<StandingsEntry>, ServiceError> {
    let Path(team_id) = team_id
        .map_err(|_| ServiceError::CallerInput("Team id must be an integer".into()))?;
    let Query(query) = query.map_err(|rejection| {
        ServiceError::CallerInput(format!("Invalid query string: {}", rejection.body_text()))
    })?;

    state
        .resolver
        .resolve(team_id, query.season.as_deref())
        .await
        .map(Json)
}
