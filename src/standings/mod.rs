//! Normalized standings rows and the lookup that produces them.
//!
//! Upstream rows come in two representations: typed [`MlbStanding`] values
//! decoded by the SDK client, and loose JSON objects from the raw endpoint.
//! Both normalize into the same [`StandingsEntry`].

pub mod resolver;

pub use resolver::TeamPerformanceResolver;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::balldontlie::MlbStanding;

/// One team's season record as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsEntry {
    pub team_id: i64,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
}

/// An upstream standings row in whichever shape it arrived.
#[derive(Debug, Clone)]
pub enum StandingsRecord {
    Structured(MlbStanding),
    Map(Map<String, Value>),
}

impl StandingsRecord {
    /// Normalize into a [`StandingsEntry`]. `None` when the row carries no
    /// usable team id.
    pub fn normalize(&self) -> Option<StandingsEntry> {
        match self {
            StandingsRecord::Structured(row) => Some(normalize_structured(row)),
            StandingsRecord::Map(map) => normalize_map(map),
        }
    }
}

fn normalize_structured(row: &MlbStanding) -> StandingsEntry {
    let team_name = first_non_empty([
        row.team.display_name.as_deref(),
        row.team.full_name.as_deref(),
    ]);

    StandingsEntry {
        team_id: row.team.id,
        team_name,
        wins: row.wins.unwrap_or(0),
        losses: row.losses.unwrap_or(0),
        win_percentage: first_non_zero([row.win_percent, row.win_percentage]),
    }
}

fn normalize_map(map: &Map<String, Value>) -> Option<StandingsEntry> {
    let team = map.get("team").and_then(Value::as_object);

    let team_id = team
        .and_then(|t| t.get("id"))
        .or_else(|| map.get("team_id"))
        .and_then(as_i64)?;

    let team_name = first_non_empty([
        team.and_then(|t| t.get("display_name")).and_then(Value::as_str),
        team.and_then(|t| t.get("full_name")).and_then(Value::as_str),
    ]);

    Some(StandingsEntry {
        team_id,
        team_name,
        wins: map.get("wins").and_then(as_u32).unwrap_or(0),
        losses: map.get("losses").and_then(as_u32).unwrap_or(0),
        win_percentage: first_non_zero([
            map.get("win_percent").and_then(as_f64),
            map.get("win_percentage").and_then(as_f64),
        ]),
    })
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn first_non_zero<const N: usize>(candidates: [Option<f64>; N]) -> f64 {
    candidates
        .into_iter()
        .flatten()
        .find(|v| *v != 0.0 && v.is_finite())
        .unwrap_or(0.0)
}

// The raw endpoint has been seen sending numbers as strings.

fn as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Counts may arrive as `90`, `90.0` or `"90"`. Anything that is not a
/// whole number in `u32` range yields `None`.
fn as_u32(v: &Value) -> Option<u32> {
    if let Some(n) = v.as_u64() {
        return u32::try_from(n).ok();
    }
    as_f64(v)
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

fn as_f64(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Scan `records` in order and return the first entry for `team_id`.
/// Stops at the first match.
pub fn find_team<I>(records: I, team_id: i64) -> Option<StandingsEntry>
where
    I: IntoIterator<Item = StandingsRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.normalize())
        .find(|entry| entry.team_id == team_id)
}

/// Turn a raw JSON body into records: the `data` field when present,
/// otherwise the body itself. Non-object elements are skipped.
pub fn records_from_json(body: Value) -> Option<Vec<StandingsRecord>> {
    let collection = match body {
        Value::Object(mut obj) if obj.contains_key("data") => obj.remove("data")?,
        other => other,
    };

    match collection {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(StandingsRecord::Map(map)),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}
