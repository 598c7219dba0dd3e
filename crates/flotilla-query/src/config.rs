// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

pub const DEFAULT_PER_SOURCE_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_MAX_RECORDS_PER_SOURCE: usize = 4096;

/// Aggregator limits. The timeout bounds each source attempt on its own;
/// the record cap truncates a single source's validated batch so one noisy
/// endpoint cannot flood a merge.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub per_source_timeout: Duration,
    pub max_records_per_source: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            per_source_timeout: DEFAULT_PER_SOURCE_TIMEOUT,
            max_records_per_source: DEFAULT_MAX_RECORDS_PER_SOURCE,
        }
    }
}
