// SPDX-License-Identifier: Apache-2.0

use crate::config::AggregatorConfig;
use crate::error::QueryError;
use crate::merge::merge_by_identity;
use crate::transport::SourceTransport;
use crate::validate::{AcceptAll, RecordValidator};
use flotilla_model::{
    AggregateQueryReport, RecordQuery, RepoAnnouncement, SourceQueryResult, SourceUrl,
};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Merged records plus the per-source report for one fan-out. The halves are
/// separable because callers cache them on different schedules.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct AggregateOutcome {
    pub records: Vec<RepoAnnouncement>,
    pub report: AggregateQueryReport,
}

impl AggregateOutcome {
    #[must_use]
    pub fn into_parts(self) -> (Vec<RepoAnnouncement>, AggregateQueryReport) {
        (self.records, self.report)
    }
}

/// Fans one query out to every source concurrently and merges whatever came
/// back. Each source gets its own timeout and its own report row; one source
/// failing never interrupts the others, and the aggregator always waits for
/// every source to settle. Only zero successes surfaces as an error.
///
/// This is deliberately not a first-success race: partial coverage with an
/// honest report beats a fast answer from one source. For the racing shape
/// see [`crate::race_first_success`].
pub struct QueryAggregator {
    transport: Arc<dyn SourceTransport>,
    validator: Arc<dyn RecordValidator<RepoAnnouncement>>,
    config: AggregatorConfig,
}

impl QueryAggregator {
    #[must_use]
    pub fn new(transport: Arc<dyn SourceTransport>) -> Self {
        Self {
            transport,
            validator: Arc::new(AcceptAll),
            config: AggregatorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn RecordValidator<RepoAnnouncement>>) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Queries every source, never fewer. Report rows follow the source list
    /// order regardless of completion order, and `queried_at_epoch_seconds`
    /// is taken before the first fetch starts.
    pub async fn query_all_sources(
        &self,
        sources: &[SourceUrl],
        query: &RecordQuery,
    ) -> Result<AggregateOutcome, QueryError> {
        if sources.is_empty() {
            return Err(QueryError::NoSources);
        }
        let queried_at = unix_now_seconds();

        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            let transport = Arc::clone(&self.transport);
            let validator = Arc::clone(&self.validator);
            let config = self.config.clone();
            let source = source.clone();
            let query = query.clone();
            handles.push(tokio::spawn(async move {
                fetch_one_source(transport, validator, config, source, query).await
            }));
        }

        let mut results = Vec::with_capacity(sources.len());
        let mut batches = Vec::new();
        for (handle, source) in handles.into_iter().zip(sources) {
            match handle.await {
                Ok((result, records)) => {
                    debug!(
                        source = %result.source,
                        status = result.status.as_str(),
                        latency_ms = result.latency_ms,
                        records = result.record_count,
                        "source settled"
                    );
                    if !records.is_empty() {
                        batches.push(records);
                    }
                    results.push(result);
                }
                Err(err) => {
                    warn!(source = %source, "source task failed: {err}");
                    results.push(SourceQueryResult::failed(
                        source.clone(),
                        0,
                        "source task failed",
                    ));
                }
            }
        }

        let report = AggregateQueryReport::from_results(queried_at, results);
        if report.all_failed() {
            error!(
                total = report.total_count,
                "every source failed for query [{query}]"
            );
            return Err(QueryError::AllSourcesFailed {
                sources: sources.to_vec(),
                query: query.clone(),
                report,
            });
        }

        let records = merge_by_identity(batches);
        debug!(
            responded = report.responded_count,
            total = report.total_count,
            merged = records.len(),
            "aggregated query complete"
        );
        Ok(AggregateOutcome { records, report })
    }
}

async fn fetch_one_source(
    transport: Arc<dyn SourceTransport>,
    validator: Arc<dyn RecordValidator<RepoAnnouncement>>,
    config: AggregatorConfig,
    source: SourceUrl,
    query: RecordQuery,
) -> (SourceQueryResult, Vec<RepoAnnouncement>) {
    let started = Instant::now();
    let outcome = tokio::time::timeout(
        config.per_source_timeout,
        transport.fetch_records(&source, &query, config.per_source_timeout),
    )
    .await;
    let latency_ms = elapsed_ms(started);
    match outcome {
        Ok(Ok(records)) => {
            let mut kept = Vec::with_capacity(records.len().min(config.max_records_per_source));
            for record in records {
                if kept.len() >= config.max_records_per_source {
                    warn!(
                        source = %source,
                        limit = config.max_records_per_source,
                        "source exceeded record cap, truncating"
                    );
                    break;
                }
                match validator.validate(&record) {
                    Ok(()) => kept.push(record),
                    Err(err) => {
                        warn!(source = %source, record = %record.id, "dropping invalid record: {err}");
                    }
                }
            }
            let record_count = kept.len() as u64;
            (
                SourceQueryResult::success(source, latency_ms, record_count),
                kept,
            )
        }
        Ok(Err(err)) => (
            SourceQueryResult::failed(source, latency_ms, &err.to_string()),
            Vec::new(),
        ),
        Err(_) => {
            let detail = format!(
                "timed out after {}ms",
                config.per_source_timeout.as_millis()
            );
            (
                SourceQueryResult::failed(source, latency_ms, &detail),
                Vec::new(),
            )
        }
    }
}

fn unix_now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
