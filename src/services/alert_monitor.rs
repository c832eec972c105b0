use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{
    AppState,
    models::{Edge, TrackedCoin},
};

const FALLBACK_INTERVAL: Duration = Duration::from_secs(5);

/// Outcome of one pass over the tracked coins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanReport {
    pub checked: usize,
    pub skipped: usize,
    pub notified: Vec<(String, Edge)>,
}

pub fn spawn_price_watcher(state: AppState, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = if state.settings.poll_interval.is_zero() {
            FALLBACK_INTERVAL
        } else {
            state.settings.poll_interval
        };
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("[alert-monitor] started, interval {:?}", period);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            let report = run_scan(&state).await;
            if !report.notified.is_empty() {
                tracing::info!(
                    "[alert-monitor] scan done: checked={} skipped={} notified={}",
                    report.checked,
                    report.skipped,
                    report.notified.len()
                );
            }
        }

        tracing::info!("[alert-monitor] stopped");
    })
}

pub async fn run_scan(state: &AppState) -> ScanReport {
    let mut report = ScanReport::default();

    let coins = state.tracking.snapshot().await;
    if coins.is_empty() {
        return report;
    }

    let mut ready_low_edge: Vec<(TrackedCoin, f64)> = Vec::new();
    let mut ready_high_edge: Vec<(TrackedCoin, f64)> = Vec::new();

    for coin in coins {
        let price = match state.market.get_price(&coin.coin_name).await {
            Ok(Some(p)) if p.is_finite() => p,
            Ok(_) => {
                tracing::debug!("[alert-monitor] no price for {}", coin.coin_name);
                report.skipped += 1;
                continue;
            }
            // already logged by the client; retried next scan
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };
        report.checked += 1;

        match coin.crossed_edge(price) {
            Ok(Some(Edge::Low)) => ready_low_edge.push((coin, price)),
            Ok(Some(Edge::High)) => ready_high_edge.push((coin, price)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("[alert-monitor] {} skipped: {}", coin.coin_name, e);
            }
        }
    }

    for (coin, scan_price) in ready_low_edge {
        if notify_crossing(state, &coin, Edge::Low, scan_price).await {
            report.notified.push((coin.coin_name, Edge::Low));
        }
    }

    for (coin, scan_price) in ready_high_edge {
        if notify_crossing(state, &coin, Edge::High, scan_price).await {
            report.notified.push((coin.coin_name, Edge::High));
        }
    }

    report
}

async fn notify_crossing(state: &AppState, coin: &TrackedCoin, edge: Edge, scan_price: f64) -> bool {
    // Whoever removes the record owns the notification. A record re-tracked
    // since the snapshot was judged on stale thresholds and is left alone.
    let Some(record) = state
        .tracking
        .untrack_if(&coin.coin_name, coin.tracked_at)
        .await
    else {
        return false;
    };

    let current = match state.market.get_price(&record.coin_name).await {
        Ok(Some(p)) => p,
        _ => scan_price,
    };

    let text = edge_message(&record, edge, current);

    if let Err(e) = state.messenger.send_message(record.owner, &text, None).await {
        tracing::error!(
            "[alert-monitor] failed to notify chat {} about {}: {}",
            record.owner,
            record.coin_name,
            e
        );
    }

    true
}

pub fn edge_message(coin: &TrackedCoin, edge: Edge, current_price: f64) -> String {
    format!(
        "Цена за монету {} достигла {} значения {}. Текущее: {}",
        coin.coin_name,
        edge.label(),
        coin.threshold(edge),
        current_price
    )
}
