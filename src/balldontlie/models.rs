use serde::Deserialize;
use std::fmt;

/// Leagues probed by the connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Nba,
    Mlb,
    Nfl,
}

impl League {
    pub const ALL: [League; 3] = [League::Nba, League::Mlb, League::Nfl];

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nba => "nba",
            League::Mlb => "mlb",
            League::Nfl => "nfl",
        }
    }

    /// Path of the teams listing, relative to the API base URL.
    pub fn teams_path(&self) -> &'static str {
        match self {
            // NBA predates the per-sport prefix
            League::Nba => "v1/teams",
            League::Mlb => "mlb/v1/teams",
            League::Nfl => "nfl/v1/teams",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard `{"data": [...]}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// MLB team embedded in a standings row.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MlbTeam {
    pub id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// One row of `GET /mlb/v1/standings`. Fields the lookup does not report
/// are left undecoded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MlbStanding {
    pub team: MlbTeam,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub win_percent: Option<f64>,
    /// Older payloads spell it out.
    #[serde(default)]
    pub win_percentage: Option<f64>,
}

/// Standings arrive either wrapped in the usual envelope or as a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StandingsPayload {
    Wrapped { data: Vec<MlbStanding> },
    Bare(Vec<MlbStanding>),
}

impl StandingsPayload {
    pub fn into_rows(self) -> Vec<MlbStanding> {
        match self {
            StandingsPayload::Wrapped { data } => data,
            StandingsPayload::Bare(rows) => rows,
        }
    }
}
