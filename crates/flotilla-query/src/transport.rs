// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use flotilla_model::{RecordQuery, RepoAnnouncement, SourceUrl};
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Injected fetch for one source. The aggregator already wraps each call in
/// `timeout`; the duration is passed through so implementations can set
/// matching socket deadlines. Retry policy, if any, lives here or in the
/// caller, never in the aggregator.
#[async_trait]
pub trait SourceTransport: Send + Sync + 'static {
    async fn fetch_records(
        &self,
        source: &SourceUrl,
        query: &RecordQuery,
        timeout: Duration,
    ) -> Result<Vec<RepoAnnouncement>, TransportError>;
}
