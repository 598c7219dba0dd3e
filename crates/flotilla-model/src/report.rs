// SPDX-License-Identifier: Apache-2.0

use crate::source::{SourceUrl, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Failed,
}

impl SourceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// One source's outcome for a single aggregated query. Failures live here as
/// data; only the zero-successes case is an error at the aggregator level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct SourceQueryResult {
    pub source: SourceUrl,
    pub status: SourceStatus,
    pub latency_ms: u64,
    pub record_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl SourceQueryResult {
    #[must_use]
    pub fn success(source: SourceUrl, latency_ms: u64, record_count: u64) -> Self {
        Self {
            source,
            status: SourceStatus::Success,
            latency_ms,
            record_count,
            error_detail: None,
        }
    }

    #[must_use]
    pub fn failed(source: SourceUrl, latency_ms: u64, error_detail: &str) -> Self {
        Self {
            source,
            status: SourceStatus::Failed,
            latency_ms,
            record_count: 0,
            error_detail: Some(error_detail.to_string()),
        }
    }

    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        match self.status {
            SourceStatus::Success => {
                if self.error_detail.is_some() {
                    return Err(ValidationError(
                        "successful source result must not carry error_detail".to_string(),
                    ));
                }
            }
            SourceStatus::Failed => {
                if self.error_detail.is_none() {
                    return Err(ValidationError(
                        "failed source result must carry error_detail".to_string(),
                    ));
                }
                if self.record_count != 0 {
                    return Err(ValidationError(
                        "failed source result must not count records".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Per-query status report, one row per queried source in source list order.
/// Cacheable on its own, separately from the merged records it came with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct AggregateQueryReport {
    pub results: Vec<SourceQueryResult>,
    pub queried_at_epoch_seconds: u64,
    pub responded_count: u64,
    pub total_count: u64,
}

impl AggregateQueryReport {
    #[must_use]
    pub fn from_results(queried_at_epoch_seconds: u64, results: Vec<SourceQueryResult>) -> Self {
        let total_count = results.len() as u64;
        let responded_count = results
            .iter()
            .filter(|result| result.status == SourceStatus::Success)
            .count() as u64;
        Self {
            results,
            queried_at_epoch_seconds,
            responded_count,
            total_count,
        }
    }

    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.responded_count == 0
    }

    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.total_count != self.results.len() as u64 {
            return Err(ValidationError(
                "report total_count must equal number of results".to_string(),
            ));
        }
        let successes = self
            .results
            .iter()
            .filter(|result| result.status == SourceStatus::Success)
            .count() as u64;
        if self.responded_count != successes {
            return Err(ValidationError(
                "report responded_count must equal number of successful results".to_string(),
            ));
        }
        if self.responded_count > self.total_count {
            return Err(ValidationError(
                "report responded_count must not exceed total_count".to_string(),
            ));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for result in &self.results {
            if !seen.insert(result.source.as_str()) {
                return Err(ValidationError(format!(
                    "report sources must be unique, repeated: {}",
                    result.source
                )));
            }
            result.validate_strict()?;
        }
        Ok(())
    }
}
