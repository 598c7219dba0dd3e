// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Federated query fan-out and gateway racing.
//!
//! Two retrieval shapes live here and they are intentionally different.
//! [`QueryAggregator`] asks every source, waits for all of them, and reports
//! each one's outcome alongside the merged records. [`race_first_success`]
//! returns as soon as any gateway answers. Picking the racing shape for a
//! federated query silently narrows results to one source's view, so each
//! doc comment spells out which shape it is.

mod aggregate;
mod config;
mod error;
mod merge;
mod race;
mod transport;
mod validate;

pub use aggregate::{AggregateOutcome, QueryAggregator};
pub use config::{AggregatorConfig, DEFAULT_MAX_RECORDS_PER_SOURCE, DEFAULT_PER_SOURCE_TIMEOUT};
pub use error::{QueryError, RaceError};
pub use merge::merge_by_identity;
pub use race::race_first_success;
pub use transport::{SourceTransport, TransportError};
pub use validate::{AcceptAll, RecordValidator, StructuralValidator};

pub const CRATE_NAME: &str = "flotilla-query";
