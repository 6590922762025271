//! Pages through the AniList GraphQL API and saves the anime media it returns
//! as one JSON array.

use std::time::Duration;

pub mod config;
mod error;
mod macros;
pub mod persist;
pub mod policy;
pub mod process;
pub mod query;
pub mod range;
pub mod request;

pub use error::{Error, PageFetchError, PersistError, Result};

/// One media entry as returned by the API. Never interpreted, only collected.
pub type Record = serde_json::Value;

const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";
const DEFAULT_PAGE_RANGE: &str = "1-20";
const PER_PAGE: u32 = 50;
/// AniList refuses larger pages.
const MAX_PER_PAGE: u32 = 50;
const PAGE_INTERVAL: Duration = Duration::from_millis(300);
const COOL_DOWN_EVERY: usize = 20;
const COOL_DOWN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
