// SPDX-License-Identifier: Apache-2.0

use flotilla_model::{AggregateQueryReport, RecordQuery, SourceUrl};
use std::fmt::{Display, Formatter};

/// Errors from [`crate::QueryAggregator::query_all_sources`]. Individual
/// source failures are report data, not errors; only zero successes (or an
/// empty source list) reaches this type.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum QueryError {
    NoSources,
    AllSourcesFailed {
        sources: Vec<SourceUrl>,
        query: RecordQuery,
        report: AggregateQueryReport,
    },
}

impl QueryError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoSources => "no_sources",
            Self::AllSourcesFailed { .. } => "all_sources_failed",
        }
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSources => {
                write!(f, "no_sources: at least one source is required")
            }
            Self::AllSourcesFailed { sources, query, .. } => {
                let listed = sources
                    .iter()
                    .map(SourceUrl::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "all_sources_failed: every source failed for query [{query}]: {listed}"
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors from [`crate::race_first_success`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum RaceError {
    NoGateways,
    AllGatewaysFailed { details: Vec<(SourceUrl, String)> },
}

impl RaceError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoGateways => "no_gateways",
            Self::AllGatewaysFailed { .. } => "all_gateways_failed",
        }
    }
}

impl Display for RaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoGateways => write!(f, "no_gateways: at least one gateway is required"),
            Self::AllGatewaysFailed { details } => {
                let listed = details
                    .iter()
                    .map(|(gateway, detail)| format!("{gateway}: {detail}"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                write!(f, "all_gateways_failed: {listed}")
            }
        }
    }
}

impl std::error::Error for RaceError {}
