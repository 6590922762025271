use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::policy::RateLimitPolicy;
use crate::query::QueryTemplate;
use crate::range::PageRange;
use crate::{
    Error, Result, ANILIST_ENDPOINT, COOL_DOWN, COOL_DOWN_EVERY, DEFAULT_PAGE_RANGE, MAX_PER_PAGE,
    PAGE_INTERVAL, PER_PAGE, REQUEST_TIMEOUT,
};

#[derive(Debug, Parser)]
#[command(name = "anifetch")]
#[command(about = "Bulk-download AniList anime metadata into a JSON file")]
pub struct Cli {
    /// Pages to fetch, as `<start>-<end>`
    #[arg(default_value = DEFAULT_PAGE_RANGE, allow_hyphen_values = true)]
    pub range: String,

    /// Media entries per page (1-50)
    #[arg(long, default_value_t = PER_PAGE)]
    pub per_page: u32,

    #[arg(long, env = "ANIFETCH_ENDPOINT", default_value = ANILIST_ENDPOINT)]
    pub endpoint: String,

    /// Field selection to request for each media entry
    #[arg(long, value_enum, default_value_t = QueryTemplate::Full)]
    pub fields: QueryTemplate,

    /// Wait after every page, in milliseconds
    #[arg(long, default_value_t = PAGE_INTERVAL.as_millis() as u64)]
    pub delay_ms: u64,

    /// Cool down after this many pages (0 disables)
    #[arg(long, default_value_t = COOL_DOWN_EVERY)]
    pub cool_down_every: usize,

    #[arg(long, default_value_t = COOL_DOWN.as_secs())]
    pub cool_down_secs: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Output file (default: anime-<start>-<end>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything a run needs, resolved and validated.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub range: PageRange,
    pub policy: RateLimitPolicy,
    pub endpoint: String,
    pub per_page: u32,
    pub template: QueryTemplate,
    pub timeout: Duration,
    pub output: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> Result<FetchConfig> {
        let range: PageRange = self.range.parse()?;

        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(Error::Config(format!(
                "--per-page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("--timeout-secs must be at least 1".into()));
        }

        Ok(FetchConfig {
            range,
            policy: RateLimitPolicy {
                interval: Duration::from_millis(self.delay_ms),
                batch_size: self.cool_down_every,
                cool_down: Duration::from_secs(self.cool_down_secs),
            },
            endpoint: self.endpoint,
            per_page: self.per_page,
            template: self.fields,
            timeout: Duration::from_secs(self.timeout_secs),
            output: self
                .output
                .unwrap_or_else(|| PathBuf::from(range.file_name())),
        })
    }
}
