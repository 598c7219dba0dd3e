// SPDX-License-Identifier: Apache-2.0

use crate::error::RaceError;
use crate::transport::TransportError;
use flotilla_model::SourceUrl;
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Races `fetch` across every gateway and returns the first success together
/// with the gateway that produced it. Losers are aborted once a winner
/// lands. When every gateway fails, the per-gateway details come back in
/// gateway list order regardless of completion order.
///
/// This is the content-retrieval shape: the bytes are the same everywhere,
/// so waiting for more than one answer buys nothing. Federated queries need
/// every source's answer; use [`crate::QueryAggregator`] for those.
pub async fn race_first_success<T, F, Fut>(
    gateways: &[SourceUrl],
    fetch: F,
) -> Result<(SourceUrl, T), RaceError>
where
    T: Send + 'static,
    F: Fn(SourceUrl) -> Fut,
    Fut: Future<Output = Result<T, TransportError>> + Send + 'static,
{
    if gateways.is_empty() {
        return Err(RaceError::NoGateways);
    }

    let mut tasks = JoinSet::new();
    for gateway in gateways {
        let gateway = gateway.clone();
        let attempt = fetch(gateway.clone());
        tasks.spawn(async move { (gateway, attempt.await) });
    }

    let mut failures: Vec<(SourceUrl, String)> = Vec::with_capacity(gateways.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((gateway, Ok(value))) => {
                debug!(gateway = %gateway, "gateway race won");
                tasks.abort_all();
                return Ok((gateway, value));
            }
            Ok((gateway, Err(err))) => {
                failures.push((gateway, err.to_string()));
            }
            Err(err) => {
                if !err.is_cancelled() {
                    warn!("gateway task failed: {err}");
                }
            }
        }
    }

    failures.sort_by_key(|(gateway, _)| {
        gateways
            .iter()
            .position(|candidate| candidate == gateway)
            .unwrap_or(usize::MAX)
    });
    Err(RaceError::AllGatewaysFailed { details: failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn gateway(host: &str) -> SourceUrl {
        SourceUrl::parse(&format!("https://{host}")).expect("gateway url")
    }

    #[tokio::test]
    async fn empty_gateway_list_is_rejected() {
        let err = race_first_success(&[], |_gateway| async {
            Ok::<Vec<u8>, TransportError>(Vec::new())
        })
        .await
        .expect_err("no gateways");
        assert_eq!(err.code(), "no_gateways");
    }

    #[tokio::test]
    async fn first_success_wins_and_aborts_losers() {
        let completions = Arc::new(AtomicU64::new(0));
        let gateways = vec![gateway("fast.example"), gateway("slow.example")];
        let counter = Arc::clone(&completions);
        let (winner, value) = race_first_success(&gateways, move |gateway| {
            let counter = Arc::clone(&counter);
            async move {
                if gateway.as_str().contains("slow") {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<String, TransportError>(gateway.as_str().to_string())
            }
        })
        .await
        .expect("fast gateway succeeded");
        assert_eq!(winner.as_str(), "https://fast.example");
        assert_eq!(value, "https://fast.example");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slower_success_still_wins_when_faster_fails() {
        let gateways = vec![gateway("broken.example"), gateway("working.example")];
        let (winner, value) = race_first_success(&gateways, |gateway| async move {
            if gateway.as_str().contains("broken") {
                return Err(TransportError("410 gone".to_string()));
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(b"payload".to_vec())
        })
        .await
        .expect("second gateway succeeded");
        assert_eq!(winner.as_str(), "https://working.example");
        assert_eq!(value, b"payload".to_vec());
    }

    #[tokio::test]
    async fn all_gateways_failing_reports_each_in_list_order() {
        let gateways = vec![
            gateway("a.example"),
            gateway("b.example"),
            gateway("c.example"),
        ];
        let err = race_first_success(&gateways, |gateway| async move {
            let delay = if gateway.as_str().contains("a.") { 30 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Err::<Vec<u8>, _>(TransportError(format!("{gateway} down")))
        })
        .await
        .expect_err("all failed");
        assert_eq!(err.code(), "all_gateways_failed");
        match err {
            RaceError::AllGatewaysFailed { details } => {
                let order: Vec<&str> = details.iter().map(|(g, _)| g.as_str()).collect();
                assert_eq!(
                    order,
                    vec!["https://a.example", "https://b.example", "https://c.example"]
                );
                assert!(details.iter().all(|(_, detail)| detail.ends_with("down")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
