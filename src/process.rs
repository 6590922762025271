use std::collections::{BTreeMap, BTreeSet};

use chrono::Local;
use tokio::time::sleep;

use crate::config::FetchConfig;
use crate::error::PageFetchError;
use crate::persist::write_records;
use crate::policy::RateLimitPolicy;
use crate::range::{PageRange, PageRequest};
use crate::request::{AniListClient, PageSource};
use crate::{info_time, warn_time, Record, Result};

/// What a single page request produced.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Vec<Record>),
    Failure(PageFetchError),
}

impl From<core::result::Result<Vec<Record>, PageFetchError>> for FetchOutcome {
    fn from(value: core::result::Result<Vec<Record>, PageFetchError>) -> Self {
        match value {
            Ok(records) => FetchOutcome::Success(records),
            Err(err) => FetchOutcome::Failure(err),
        }
    }
}

/// Accumulated state of one run. Records keep page order.
#[derive(Debug, Default)]
pub struct RunResult {
    pub records: Vec<Record>,
    pub failed: BTreeMap<PageRequest, PageFetchError>,
}

impl RunResult {
    pub fn absorb(&mut self, page: PageRequest, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Success(records) => self.records.extend(records),
            FetchOutcome::Failure(err) => {
                self.failed.insert(page, err);
            }
        }
    }

    pub fn failed_pages(&self) -> BTreeSet<PageRequest> {
        self.failed.keys().copied().collect()
    }

    pub fn retryable_failures(&self) -> usize {
        self.failed.values().filter(|e| e.is_retryable()).count()
    }
}

/// Fetches every page of `range` strictly one after another, waiting as the policy demands.
/// Failed pages are recorded and skipped, never retried.
pub async fn fetch_pages<S>(source: &S, range: &PageRange, policy: &RateLimitPolicy) -> RunResult
where
    S: PageSource + ?Sized,
{
    let total = range.page_count();
    let mut result = RunResult::default();

    for (index, page) in range.pages().enumerate() {
        info_time!("Fetching page {} ({}/{})...", page, index + 1, total);

        let outcome = FetchOutcome::from(source.fetch_page(page).await);
        match &outcome {
            FetchOutcome::Success(records) if records.is_empty() => {
                info_time!("Page {page} returned no items")
            }
            FetchOutcome::Success(records) => {
                info_time!("Page {} fetched successfully ({} items)", page, records.len())
            }
            FetchOutcome::Failure(err) => warn_time!("Failed to fetch page {}: {}", page, err),
        }
        result.absorb(page, outcome);

        let pause = policy.pause_after(index, total);
        sleep(pause.interval).await;
        if let Some(cool_down) = pause.cool_down {
            info_time!("Pausing for {:?} to avoid rate limiting...", cool_down);
            sleep(cool_down).await;
        }
    }

    result
}

/// Fetches the configured range from AniList and writes the records to the output file.
pub async fn run(config: &FetchConfig) -> Result<RunResult> {
    let start_time = Local::now();
    let client = AniListClient::new(
        config.endpoint.clone(),
        config.per_page,
        config.template,
        config.timeout,
    )?;

    info_time!(
        "Started fetching pages {} ({} pages, {} per page)",
        config.range,
        config.range.page_count(),
        config.per_page
    );
    let result = fetch_pages(&client, &config.range, &config.policy).await;
    info_time!(start_time, "Finished fetching all pages.");

    write_records(&config.output, &result.records).await?;
    report(config, &result);

    Ok(result)
}

fn report(config: &FetchConfig, result: &RunResult) {
    info_time!("Data saved to {}", config.output.display());
    info_time!("Total items fetched: {}", result.records.len());
    if !result.failed.is_empty() {
        let pages = result
            .failed
            .keys()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        warn_time!("Failed pages: {}", pages);
        warn_time!(
            "{} of {} failed pages may succeed on a re-run",
            result.retryable_failures(),
            result.failed.len()
        );
    }
}
