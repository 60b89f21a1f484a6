pub mod client;
pub mod models;
pub mod provider;

pub use client::{BalldontlieClient, RawStandingsClient};
pub use models::{League, MlbStanding};
pub use provider::{RawStandingsApi, SportsApi};
