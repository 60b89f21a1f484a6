use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::models::{League, ListResponse, StandingsPayload};
use super::provider::{RawResponse, RawStandingsApi, SportsApi};
use crate::config::ApiKey;
use crate::error::ProviderError;

const STANDINGS_PATH: &str = "mlb/v1/standings";

fn build_http(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Parse the base URL so relative paths append to it instead of replacing
/// its last segment.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut normalized = base_url.trim_end_matches('/').to_string();
    normalized.push('/');
    Url::parse(&normalized).with_context(|| format!("Invalid API base URL: {}", base_url))
}

fn standings_url(base: &Url, season: i32) -> Result<Url, url::ParseError> {
    let mut url = base.join(STANDINGS_PATH)?;
    url.query_pairs_mut()
        .append_pair("season", &season.to_string());
    Ok(url)
}

/// Typed balldontlie client.
#[derive(Clone)]
pub struct BalldontlieClient {
    http: Client,
    base_url: Url,
}

impl BalldontlieClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(BalldontlieClient {
            http: build_http(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, api_key: &ApiKey) -> Result<T, ProviderError> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, api_key.as_str())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        decode_body(&body)
    }
}

#[async_trait]
impl SportsApi for BalldontlieClient {
    async fn list_teams(&self, api_key: &ApiKey, league: League) -> Result<usize, ProviderError> {
        let url = self.base_url.join(league.teams_path())?;
        let teams: ListResponse<IgnoredAny> = self.get_json(url, api_key).await?;
        Ok(teams.data.len())
    }

    async fn get_standings(
        &self,
        api_key: &ApiKey,
        season: i32,
    ) -> Result<StandingsPayload, ProviderError> {
        let url = standings_url(&self.base_url, season)?;
        self.get_json(url, api_key).await
    }
}

/// Standings client that returns the response untouched.
#[derive(Clone)]
pub struct RawStandingsClient {
    http: Client,
    base_url: Url,
}

impl RawStandingsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(RawStandingsClient {
            http: build_http(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl RawStandingsApi for RawStandingsClient {
    async fn get_standings(&self, api_key: &ApiKey, season: i32) -> Result<RawResponse> {
        let url = standings_url(&self.base_url, season).context("Failed to build standings URL")?;
        debug!("GET {} (raw)", url);

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, api_key.as_str())
            .send()
            .await
            .context("Raw standings request failed")?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .context("Failed to read raw standings response")?;

        Ok(RawResponse { status, body })
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Schema(e.to_string()))
}

/// Map a non-success status onto the provider's error taxonomy.
fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let message = error_message(status, body);
    match status.as_u16() {
        401 => ProviderError::Authentication(message),
        429 => ProviderError::RateLimited(message),
        400 | 422 => ProviderError::Validation(message),
        404 => ProviderError::NotFound(message),
        code if status.is_server_error() => ProviderError::Server {
            status: code,
            message,
        },
        code => ProviderError::Api {
            status: code,
            message,
        },
    }
}

/// Prefer the API's own `error`/`message` field, fall back to the raw body.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v["error"]
                .as_str()
                .or_else(|| v["message"].as_str())
                .map(str::to_string)
        });

    match from_json {
        Some(msg) => msg,
        None if body.trim().is_empty() => status.to_string(),
        None => body.trim().chars().take(200).collect(),
    }
}
