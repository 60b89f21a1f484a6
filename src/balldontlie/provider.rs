use anyhow::Result;
use async_trait::async_trait;

use super::models::{League, StandingsPayload};
use crate::config::ApiKey;
use crate::error::ProviderError;

/// Typed access to the balldontlie API.
#[async_trait]
pub trait SportsApi: Send + Sync {
    /// Count the teams in a league. Used as a connectivity probe.
    async fn list_teams(&self, api_key: &ApiKey, league: League) -> Result<usize, ProviderError>;

    /// Fetch MLB standings for one season.
    async fn get_standings(
        &self,
        api_key: &ApiKey,
        season: i32,
    ) -> Result<StandingsPayload, ProviderError>;
}

/// Status and body of an undecoded standings request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Plain HTTP access to the standings endpoint, bypassing typed decoding.
#[async_trait]
pub trait RawStandingsApi: Send + Sync {
    async fn get_standings(&self, api_key: &ApiKey, season: i32) -> Result<RawResponse>;
}
