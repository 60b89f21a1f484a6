use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{find_team, records_from_json, StandingsEntry, StandingsRecord};
use crate::balldontlie::{RawStandingsApi, SportsApi};
use crate::config::ApiKey;
use crate::error::ServiceError;

/// Looks up one team's season record, falling back to the raw standings
/// endpoint when the typed client cannot decode the response.
#[derive(Clone)]
pub struct TeamPerformanceResolver {
    api_key: Option<ApiKey>,
    sdk: Arc<dyn SportsApi>,
    raw: Arc<dyn RawStandingsApi>,
}

impl TeamPerformanceResolver {
    pub fn new(
        api_key: Option<ApiKey>,
        sdk: Arc<dyn SportsApi>,
        raw: Arc<dyn RawStandingsApi>,
    ) -> Self {
        TeamPerformanceResolver { api_key, sdk, raw }
    }

    pub async fn resolve(
        &self,
        team_id: i64,
        season: Option<&str>,
    ) -> Result<StandingsEntry, ServiceError> {
        let season = parse_season(season)?;
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ServiceError::Configuration("API key not configured".into()))?;

        let records = self.fetch_standings(api_key, season).await?;
        debug!(
            "Scanning {} standings rows for team {} (season {})",
            records.len(),
            team_id,
            season
        );

        find_team(records, team_id).ok_or(ServiceError::TeamNotInCollection)
    }

    async fn fetch_standings(
        &self,
        api_key: &ApiKey,
        season: i32,
    ) -> Result<Vec<StandingsRecord>, ServiceError> {
        match self.sdk.get_standings(api_key, season).await {
            Ok(payload) => Ok(payload
                .into_rows()
                .into_iter()
                .map(StandingsRecord::Structured)
                .collect()),
            Err(e) if e.is_structural() => {
                warn!(
                    "Typed standings decode failed for season {}, falling back to raw request: {}",
                    season, e
                );
                self.fetch_raw(api_key, season).await
            }
            Err(e) => {
                warn!("Standings request failed for season {}: {}", season, e);
                Err(e.into())
            }
        }
    }

    async fn fetch_raw(
        &self,
        api_key: &ApiKey,
        season: i32,
    ) -> Result<Vec<StandingsRecord>, ServiceError> {
        let resp = self.raw.get_standings(api_key, season).await.map_err(|e| {
            warn!("Raw standings request failed: {:#}", e);
            ServiceError::UpstreamRequestFailed { status: None }
        })?;

        if !resp.is_success() {
            warn!("Raw standings request returned status {}", resp.status);
            return Err(ServiceError::UpstreamRequestFailed {
                status: Some(resp.status),
            });
        }

        let body: serde_json::Value = serde_json::from_str(&resp.body).map_err(|e| {
            ServiceError::Unclassified(format!("invalid JSON from standings endpoint: {}", e))
        })?;

        let records = records_from_json(body).ok_or_else(|| {
            ServiceError::Unclassified("standings response is not a list".into())
        })?;
        info!(
            "Raw fallback returned {} standings rows for season {}",
            records.len(),
            season
        );
        Ok(records)
    }
}

fn parse_season(season: Option<&str>) -> Result<i32, ServiceError> {
    let season = season
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::CallerInput("Season parameter is required".into()))?;

    season
        .parse()
        .map_err(|_| ServiceError::CallerInput("Season parameter must be an integer".into()))
}
