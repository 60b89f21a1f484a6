//! In-memory stand-ins for the balldontlie clients, with call counters.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::balldontlie::models::{League, MlbStanding, MlbTeam, StandingsPayload};
use crate::balldontlie::provider::{RawResponse, RawStandingsApi, SportsApi};
use crate::config::ApiKey;
use crate::error::ProviderError;

pub fn standing(
    id: i64,
    name: &str,
    wins: Option<u32>,
    losses: Option<u32>,
    win_percent: Option<f64>,
) -> MlbStanding {
    MlbStanding {
        team: MlbTeam {
            id,
            display_name: Some(name.to_string()),
            full_name: None,
        },
        wins,
        losses,
        win_percent,
        win_percentage: None,
    }
}

/// What the fake typed client does on `get_standings`.
#[derive(Debug)]
pub enum SdkBehavior {
    Rows(Vec<MlbStanding>),
    Schema,
    Authentication,
    RateLimited,
    Validation,
    NotFound,
    Server,
    Api,
}

pub struct FakeSdk {
    behavior: SdkBehavior,
    failing_leagues: Vec<League>,
    standings_calls: AtomicUsize,
    teams_calls: AtomicUsize,
}

impl FakeSdk {
    pub fn new(behavior: SdkBehavior) -> Self {
        FakeSdk {
            behavior,
            failing_leagues: Vec::new(),
            standings_calls: AtomicUsize::new(0),
            teams_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_leagues(mut self, leagues: &[League]) -> Self {
        self.failing_leagues = leagues.to_vec();
        self
    }

    pub fn standings_calls(&self) -> usize {
        self.standings_calls.load(Ordering::SeqCst)
    }

    pub fn teams_calls(&self) -> usize {
        self.teams_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SportsApi for FakeSdk {
    async fn list_teams(&self, _api_key: &ApiKey, league: League) -> Result<usize, ProviderError> {
        self.teams_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_leagues.contains(&league) {
            return Err(ProviderError::Authentication(format!(
                "no {} access on this tier",
                league
            )));
        }
        Ok(30)
    }

    async fn get_standings(
        &self,
        _api_key: &ApiKey,
        _season: i32,
    ) -> Result<StandingsPayload, ProviderError> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        let msg = || "fake".to_string();
        match &self.behavior {
            SdkBehavior::Rows(rows) => Ok(StandingsPayload::Wrapped { data: rows.clone() }),
            SdkBehavior::Schema => Err(ProviderError::Schema("missing field `team`".into())),
            SdkBehavior::Authentication => Err(ProviderError::Authentication(msg())),
            SdkBehavior::RateLimited => Err(ProviderError::RateLimited(msg())),
            SdkBehavior::Validation => Err(ProviderError::Validation(msg())),
            SdkBehavior::NotFound => Err(ProviderError::NotFound(msg())),
            SdkBehavior::Server => Err(ProviderError::Server {
                status: 500,
                message: msg(),
            }),
            SdkBehavior::Api => Err(ProviderError::Api {
                status: 403,
                message: msg(),
            }),
        }
    }
}

pub struct FakeRaw {
    response: Option<RawResponse>,
    calls: AtomicUsize,
}

impl FakeRaw {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::with(Some(RawResponse {
            status: 200,
            body: body.to_string(),
        }))
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::with(Some(RawResponse {
            status,
            body: body.to_string(),
        }))
    }

    /// Every request fails before a response arrives.
    pub fn unreachable() -> Self {
        Self::with(None)
    }

    fn with(response: Option<RawResponse>) -> Self {
        FakeRaw {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RawStandingsApi for FakeRaw {
    async fn get_standings(&self, _api_key: &ApiKey, _season: i32) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }
}
